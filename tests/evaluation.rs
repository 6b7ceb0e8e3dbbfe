// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Integration tests for the evaluation pipeline
//!
//! A shell script stands in for `pc_error`, so these only run on unix.

#![cfg(unix)]

use pcc_eval::evaluation::{self, DistanceMetric, EvalPaths};
use pcc_eval::{EvalConfig, EvalError};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const PC_ERROR_OUTPUT: &str = "\
PCC quality measurement software, version 0.13.5
A->B,ACD1,p2point,0.000187503
A->B,ACD1,p2plane,9.6071e-05
B->A,ACD2,p2point,0.000194212
B->A,ACD2,p2plane,0.000101283
Symmetric,CD,p2point,0.000190857
Symmetric,CD-PSNR,p2point,64.0453
Symmetric,CD,p2plane,9.86772e-05
Symmetric,CD-PSNR,p2plane,66.9105
Symmetric,hF,p2point,0.0021389
Symmetric,hF,p2plane,0.00163871
Job done!
";

struct Fixture {
    dir: TempDir,
    paths: EvalPaths,
    tool: PathBuf,
    marker: PathBuf,
}

impl Fixture {
    fn new(original_points: usize, decoded_points: usize) -> Self {
        Self::with_tool_output(original_points, decoded_points, PC_ERROR_OUTPUT)
    }

    fn with_tool_output(original_points: usize, decoded_points: usize, output: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let paths = EvalPaths {
            original: dir.path().join("ori.ply"),
            binary: dir.path().join("cloud.bin"),
            decoded: dir.path().join("dec.ply"),
            log: dir.path().join("eval.log"),
        };

        write_ply(&paths.original, original_points, 0.0);
        write_ply(&paths.decoded, decoded_points, 0.001);
        fs::write(&paths.binary, vec![0u8; 1500]).unwrap();

        let marker = dir.path().join("tool-ran");
        let stdout = dir.path().join("pc_error.out");
        fs::write(&stdout, output).unwrap();

        let tool = dir.path().join("pc_error");
        fs::write(
            &tool,
            format!(
                "#!/bin/sh\ntouch '{}'\ncat '{}'\n",
                marker.display(),
                stdout.display()
            ),
        )
        .unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        Self {
            dir,
            paths,
            tool,
            marker,
        }
    }

    fn config(&self) -> EvalConfig {
        EvalConfig {
            pc_error_path: self.tool.clone(),
            ..EvalConfig::default()
        }
    }

    fn log(&self) -> String {
        fs::read_to_string(&self.paths.log).unwrap()
    }
}

fn write_ply(path: &Path, points: usize, jitter: f64) {
    let mut ply = format!(
        "ply\nformat ascii 1.0\nelement vertex {points}\n\
         property float x\nproperty float y\nproperty float z\nend_header\n"
    );
    for i in 0..points {
        let t = i as f64;
        ply.push_str(&format!(
            "{} {} {}\n",
            (t * 0.1).sin() + jitter,
            (t * 0.07).cos(),
            t / points as f64 - jitter
        ));
    }
    fs::write(path, ply).unwrap();
}

#[test]
fn test_full_report_with_equal_point_counts() {
    let fixture = Fixture::new(500, 500);

    let report = evaluation::evaluate(&fixture.config(), &fixture.paths).unwrap();
    assert_eq!(report.original_points, 500);
    assert_eq!(report.decoded_points, 500);
    assert!(report.earth_movers_distance.is_some());
    assert_eq!(report.distances.get(DistanceMetric::CdPsnrP2Plane), "66.9105");

    let log = fixture.log();
    assert!(log.starts_with("Point Cloud Compression Evaluation\n"));
    assert!(log.contains(&format!("ply1: {}\n", fixture.paths.original.display())));
    assert!(log.contains(&format!("ply2: {}\n", fixture.paths.decoded.display())));
    assert!(log.contains("bin_file size (kB)  : 1.5\n"));
    assert!(log.contains("bpp (bits per point): 24.0\n"));
    assert!(log.contains("Asym. Chamfer dist. (1->2) p2pl: 9.6071e-05\n"));
    assert!(log.contains("Hausdorff distance         p2pt: 0.0021389\n"));
    assert_eq!(log.matches("======================================\n").count(), 4);

    let last_line = log.lines().last().unwrap();
    assert!(last_line.starts_with("Earth Mover's dist.            : "));
    assert!(!log.ends_with('\n'));
}

#[test]
fn test_unequal_point_counts_omit_emd() {
    let fixture = Fixture::new(500, 480);

    let report = evaluation::evaluate(&fixture.config(), &fixture.paths).unwrap();
    assert_eq!(report.earth_movers_distance, None);

    let log = fixture.log();
    assert!(!log.contains("Earth Mover"));
    assert!(log.ends_with("Hausdorff distance         p2pl: 0.00163871\n======================================\n"));
}

#[test]
fn test_existing_log_aborts_before_any_work() {
    let fixture = Fixture::new(10, 10);
    fs::write(&fixture.paths.log, "previous run\n").unwrap();

    let result = evaluation::evaluate(&fixture.config(), &fixture.paths);
    assert!(matches!(result, Err(EvalError::LogExists(_))));
    assert!(!fixture.marker.exists(), "distance tool must not run");
    assert_eq!(fixture.log(), "previous run\n");
}

#[test]
fn test_append_mode_reuses_log() {
    let fixture = Fixture::new(10, 10);
    let config = EvalConfig {
        allow_existing_log: true,
        ..fixture.config()
    };

    evaluation::evaluate(&config, &fixture.paths).unwrap();
    let first = fixture.log();
    evaluation::evaluate(&config, &fixture.paths).unwrap();

    assert_eq!(fixture.log(), format!("{first}{first}"));
}

#[test]
fn test_missing_metric_leaves_no_log() {
    let output = PC_ERROR_OUTPUT.replace("Symmetric,CD-PSNR,p2point,64.0453\n", "");
    let fixture = Fixture::with_tool_output(10, 10, &output);

    match evaluation::evaluate(&fixture.config(), &fixture.paths) {
        Err(EvalError::MissingMetrics(missing)) => {
            assert_eq!(missing, vec!["Symmetric,CD-PSNR,p2point,"]);
        }
        other => panic!("expected missing metric, got {:?}", other),
    }
    assert!(!fixture.paths.log.exists());
}

#[test]
fn test_missing_binary_leaves_no_log() {
    let fixture = Fixture::new(10, 10);
    fs::remove_file(&fixture.paths.binary).unwrap();

    let result = evaluation::evaluate(&fixture.config(), &fixture.paths);
    assert!(matches!(result, Err(EvalError::Stat { .. })));
    assert!(!fixture.paths.log.exists());
}

#[test]
fn test_rerun_is_byte_identical() {
    let fixture = Fixture::new(200, 200);
    evaluation::evaluate(&fixture.config(), &fixture.paths).unwrap();

    let second = EvalPaths {
        log: fixture.dir.path().join("eval-2.log"),
        ..fixture.paths.clone()
    };
    evaluation::evaluate(&fixture.config(), &second).unwrap();

    assert_eq!(fixture.log(), fs::read_to_string(&second.log).unwrap());
}

#[test]
fn test_json_summary_is_written_on_request() {
    let fixture = Fixture::new(20, 20);
    let json_path = fixture.dir.path().join("summary.json");
    let config = EvalConfig {
        json_summary: Some(json_path.clone()),
        ..fixture.config()
    };

    let report = evaluation::evaluate(&config, &fixture.paths).unwrap();
    let parsed: pcc_eval::EvaluationReport =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed.distances, report.distances);
    assert_eq!(parsed.original_points, 20);
}

#[test]
fn test_failed_summary_leaves_no_log() {
    let fixture = Fixture::new(10, 10);
    let config = EvalConfig {
        json_summary: Some(fixture.dir.path().join("missing-dir").join("summary.json")),
        ..fixture.config()
    };

    let result = evaluation::evaluate(&config, &fixture.paths);
    assert!(matches!(result, Err(EvalError::SummaryWrite { .. })));
    assert!(!fixture.paths.log.exists());
}

#[test]
fn test_cli_exits_nonzero_on_existing_log() {
    let fixture = Fixture::new(10, 10);
    fs::write(&fixture.paths.log, "").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_pcc-eval"))
        .arg(&fixture.paths.original)
        .arg(&fixture.paths.binary)
        .arg(&fixture.paths.decoded)
        .arg(&fixture.paths.log)
        .arg("--pc-error")
        .arg(&fixture.tool)
        .current_dir(fixture.dir.path())
        .env_remove("PCC_EVAL_ALLOW_EXISTING_LOG")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
    assert!(!fixture.marker.exists());
}

#[test]
fn test_cli_writes_log() {
    let fixture = Fixture::new(10, 10);

    let status = Command::new(env!("CARGO_BIN_EXE_pcc-eval"))
        .arg(&fixture.paths.original)
        .arg(&fixture.paths.binary)
        .arg(&fixture.paths.decoded)
        .arg(&fixture.paths.log)
        .arg("--pc-error")
        .arg(&fixture.tool)
        .current_dir(fixture.dir.path())
        .env_remove("PC_ERROR_PATH")
        .status()
        .unwrap();

    assert!(status.success());
    assert!(fixture.log().contains("CD-PSNR                    p2pt: 64.0453\n"));
}
