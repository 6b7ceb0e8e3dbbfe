// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Report generation (text log and JSON)

use super::distance::{DistanceKind, DistanceReport};
use super::metrics::SizeMetrics;
use crate::error::{EvalError, Result};
use crate::utils::py_float;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SEPARATOR: &str = "======================================";

/// Complete result of one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub timestamp: String,
    pub original_path: PathBuf,
    pub binary_path: PathBuf,
    pub decoded_path: PathBuf,
    pub original_points: usize,
    pub decoded_points: usize,
    pub sizes: SizeMetrics,
    pub distances: DistanceReport,
    /// Present only when both clouds have the same number of points
    pub earth_movers_distance: Option<f64>,
    pub tool_time_ms: u128,
}

impl EvaluationReport {
    /// Render the log block.
    ///
    /// The layout is parsed by downstream tooling and must stay byte-stable.
    /// The EMD line is the last line and has no trailing newline.
    pub fn render_log(&self) -> String {
        let mut out = String::new();

        out.push_str("Point Cloud Compression Evaluation\n");
        out.push_str(&format!("ply1: {}\n", self.original_path.display()));
        out.push_str(&format!("ply2: {}\n", self.decoded_path.display()));
        out.push_str(SEPARATOR);
        out.push('\n');

        out.push_str(&format!("ori_file size (kB)  : {}\n", py_float(self.sizes.original_kb)));
        out.push_str(&format!("bin_file size (kB)  : {}\n", py_float(self.sizes.binary_kb)));
        out.push_str(&format!(
            "compression ratio   : {}\n",
            py_float(self.sizes.compression_ratio)
        ));
        out.push_str(&format!(
            "bpp (bits per point): {}\n",
            py_float(self.sizes.bits_per_point)
        ));
        out.push_str(SEPARATOR);
        out.push('\n');

        for kind in [DistanceKind::PointToPoint, DistanceKind::PointToPlane] {
            for (metric, value) in self.distances.of_kind(kind) {
                out.push_str(&format!("{}: {}\n", metric.report_name(), value));
            }
            out.push_str(SEPARATOR);
            out.push('\n');
        }

        if let Some(emd) = self.earth_movers_distance {
            out.push_str(&format!("Earth Mover's dist.            : {}", py_float(emd)));
        }

        out
    }
}

/// Report writer
pub struct Reporter;

impl Reporter {
    /// Append the rendered log block, creating the file if needed
    pub fn append_log(report: &EvaluationReport, path: &Path) -> Result<()> {
        let write_err = |source| EvalError::LogWrite {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(write_err)?;
        file.write_all(report.render_log().as_bytes())
            .map_err(write_err)?;
        file.flush().map_err(write_err)?;

        log::info!("Appended evaluation to {}", path.display());
        Ok(())
    }

    /// Write JSON report
    pub fn write_json(report: &EvaluationReport, path: &Path) -> Result<()> {
        let write_err = |source| EvalError::SummaryWrite {
            path: path.to_path_buf(),
            source,
        };

        let json = serde_json::to_string_pretty(report).map_err(|e| write_err(e.into()))?;
        fs::write(path, json).map_err(write_err)?;
        log::info!("Wrote JSON summary to {}", path.display());
        Ok(())
    }

    pub fn timestamp() -> String {
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}
