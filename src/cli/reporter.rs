// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::evaluation::{DistanceKind, EvaluationReport};
use crate::utils::py_float;
use colored::*;
use std::path::Path;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Print a run summary to stdout
    pub fn report_evaluation(report: &EvaluationReport, log_path: &Path) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!(
            "{} {} {} {}",
            "Evaluated:".bold(),
            report.original_path.display().to_string().cyan(),
            "vs".bright_black(),
            report.decoded_path.display().to_string().cyan()
        );
        println!("{}", "━".repeat(80).bright_black());

        println!("\n{}", "Compression:".bold());
        Self::print_metric("Original", &format!("{} kB", py_float(report.sizes.original_kb)));
        Self::print_metric("Binary", &format!("{} kB", py_float(report.sizes.binary_kb)));
        Self::print_metric("Ratio", &py_float(report.sizes.compression_ratio));
        Self::print_metric("Bits/point", &py_float(report.sizes.bits_per_point));

        for (title, kind) in [
            ("Point-to-point:", DistanceKind::PointToPoint),
            ("Point-to-plane:", DistanceKind::PointToPlane),
        ] {
            println!("\n{}", title.bold());
            for (metric, value) in report.distances.of_kind(kind) {
                Self::print_metric(metric.report_name().trim_end(), value.trim());
            }
        }

        println!("\n{}", "Distribution:".bold());
        Self::print_metric(
            "Points",
            &format!("{} vs {}", report.original_points, report.decoded_points),
        );
        match report.earth_movers_distance {
            Some(emd) => Self::print_metric("EMD", &py_float(emd)),
            None => println!(
                "  {} {}",
                "EMD:".bright_black(),
                "skipped (point counts differ)".yellow()
            ),
        }

        println!(
            "\n  {} {}",
            "Distance tool:".bright_black(),
            Self::format_millis(report.tool_time_ms).yellow()
        );
        println!(
            "  {} {}",
            "Log:".bright_black(),
            log_path.display().to_string().cyan()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn print_metric(name: &str, value: &str) {
        println!(
            "  {} {}",
            format!("{}:", name).bright_black(),
            value.cyan()
        );
    }

    fn format_millis(ms: u128) -> String {
        if ms < 1000 {
            format!("{}ms", ms)
        } else {
            format!("{:.2}s", ms as f64 / 1000.0)
        }
    }
}
