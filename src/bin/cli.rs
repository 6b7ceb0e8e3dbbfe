// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point cloud compression evaluation CLI

use anyhow::{Context, Result};
use clap::Parser;
use pcc_eval::cli::{init_logging, Reporter};
use pcc_eval::evaluation::{self, EvalPaths};
use pcc_eval::EvalConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pcc-eval")]
#[command(
    about = "Compare an original point cloud with its decompressed reconstruction",
    long_about = None
)]
struct Cli {
    /// Path to ground truth point cloud
    ori_path: PathBuf,

    /// Path to compressed bin_file
    bin_path: PathBuf,

    /// Path to decompressed point cloud
    dec_path: PathBuf,

    /// Path to evaluation results log
    log_path: PathBuf,

    /// Distance tool executable (overrides config and PC_ERROR_PATH)
    #[arg(long, value_name = "PATH")]
    pc_error: Option<PathBuf>,

    /// Kill the distance tool after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Append to an existing log instead of refusing to run
    #[arg(long)]
    append: bool,

    /// Also write a JSON summary
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Configuration file (defaults to ./pcc-eval.toml when present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        Reporter::report_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = EvalConfig::load(cli.config.as_deref())?;
    if let Some(pc_error) = cli.pc_error {
        config.pc_error_path = pc_error;
    }
    if cli.timeout.is_some() {
        config.timeout_secs = cli.timeout;
    }
    if cli.append {
        config.allow_existing_log = true;
    }
    if cli.json.is_some() {
        config.json_summary = cli.json;
    }

    let paths = EvalPaths {
        original: cli.ori_path,
        binary: cli.bin_path,
        decoded: cli.dec_path,
        log: cli.log_path,
    };

    let report = evaluation::evaluate(&config, &paths)
        .with_context(|| format!("Evaluation of {} failed", paths.decoded.display()))?;

    if cli.verbose {
        Reporter::report_evaluation(&report, &paths.log);
    } else {
        Reporter::success(&format!("Appended evaluation to {}", paths.log.display()));
    }

    Ok(())
}
