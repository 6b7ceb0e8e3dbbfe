// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Evaluation configuration system

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "pcc-eval.toml";

/// Location of `pc_error` relative to the codec's experiment directories
pub const DEFAULT_PC_ERROR_PATH: &str = "../../evaluator/geo_dist/build/pc_error";

/// Evaluation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Distance tool executable
    pub pc_error_path: PathBuf,
    /// Kill the distance tool after this many seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Append to a log that already exists instead of refusing to run
    pub allow_existing_log: bool,
    /// Also write a JSON summary here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_summary: Option<PathBuf>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            pc_error_path: PathBuf::from(DEFAULT_PC_ERROR_PATH),
            timeout_secs: None,
            allow_existing_log: false,
            json_summary: None,
        }
    }
}

impl EvalConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: EvalConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// An explicit `path` must exist; otherwise `pcc-eval.toml` is used when
    /// present and the defaults when it is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_env()?;
        Ok(config)
    }

    /// Apply `PC_ERROR_PATH`, `PCC_EVAL_TIMEOUT_SECS` and `PCC_EVAL_ALLOW_EXISTING_LOG`
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(pc_error) = std::env::var("PC_ERROR_PATH") {
            self.pc_error_path = PathBuf::from(pc_error);
        }

        if let Ok(timeout) = std::env::var("PCC_EVAL_TIMEOUT_SECS") {
            let secs = timeout
                .parse()
                .with_context(|| format!("PCC_EVAL_TIMEOUT_SECS is not a number: {timeout}"))?;
            self.timeout_secs = Some(secs);
        }

        if let Ok(allow) = std::env::var("PCC_EVAL_ALLOW_EXISTING_LOG") {
            self.allow_existing_log = parse_flag(&allow)
                .with_context(|| format!("PCC_EVAL_ALLOW_EXISTING_LOG is not a boolean: {allow}"))?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`, ignoring case
fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("unrecognized flag value '{other}'"),
    }
}
