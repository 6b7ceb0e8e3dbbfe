// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Evaluation pipeline comparing an original cloud with its decoded reconstruction

pub mod distance;
pub mod emd;
pub mod metrics;
pub mod reporter;
pub mod runner;

pub use distance::{DistanceKind, DistanceMetric, DistanceReport};
pub use emd::{earth_movers_distance, emd_samples};
pub use metrics::SizeMetrics;
pub use reporter::{EvaluationReport, Reporter};
pub use runner::{PcErrorRunner, ToolOutput};

use crate::config::EvalConfig;
use crate::error::{EvalError, Result};
use crate::io::read_point_cloud;
use std::path::PathBuf;

/// Files involved in one codec run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalPaths {
    /// Ground-truth point cloud
    pub original: PathBuf,
    /// Compressed bitstream, only its size is used
    pub binary: PathBuf,
    /// Decompressed point cloud
    pub decoded: PathBuf,
    /// Evaluation log to append to
    pub log: PathBuf,
}

/// Check the inputs exist and, unless reuse is allowed, that the log does not.
///
/// Runs before any other work so a rejected run touches nothing.
pub fn check_preconditions(paths: &EvalPaths, allow_existing_log: bool) -> Result<()> {
    for input in [&paths.original, &paths.decoded] {
        if !input.exists() {
            return Err(EvalError::InputNotFound(input.clone()));
        }
    }

    if !allow_existing_log && paths.log.exists() {
        return Err(EvalError::LogExists(paths.log.clone()));
    }

    Ok(())
}

/// Compute every metric without touching the log.
pub fn compute_report(config: &EvalConfig, paths: &EvalPaths) -> Result<EvaluationReport> {
    let runner = PcErrorRunner::new(config.pc_error_path.clone()).with_timeout(config.timeout());
    log::info!(
        "Running {} on {} vs {}",
        runner.program().display(),
        paths.original.display(),
        paths.decoded.display()
    );
    let output = runner.run(&paths.original, &paths.decoded)?;
    let distances = DistanceReport::parse(&output.stdout)?;

    let original = read_point_cloud(&paths.original)?;
    let decoded = read_point_cloud(&paths.decoded)?;
    let emd = earth_movers_distance(&original, &decoded);

    let sizes = SizeMetrics::from_files(&paths.original, &paths.binary, original.len())?;
    log::debug!(
        "Compression ratio {} at {} bpp",
        sizes.compression_ratio,
        sizes.bits_per_point
    );

    Ok(EvaluationReport {
        timestamp: Reporter::timestamp(),
        original_path: paths.original.clone(),
        binary_path: paths.binary.clone(),
        decoded_path: paths.decoded.clone(),
        original_points: original.len(),
        decoded_points: decoded.len(),
        sizes,
        distances,
        earth_movers_distance: emd,
        tool_time_ms: output.duration.as_millis(),
    })
}

/// Main evaluation entry point.
///
/// Every metric is computed and every other output written before the log is
/// opened, so the log either receives the full block or is left untouched.
pub fn evaluate(config: &EvalConfig, paths: &EvalPaths) -> Result<EvaluationReport> {
    check_preconditions(paths, config.allow_existing_log)?;

    let report = compute_report(config, paths)?;

    if let Some(ref json_path) = config.json_summary {
        Reporter::write_json(&report, json_path)?;
    }
    Reporter::append_log(&report, &paths.log)?;

    Ok(report)
}
