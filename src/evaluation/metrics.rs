// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Compression size metrics

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File sizes of one codec run and the rates derived from them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeMetrics {
    pub original_kb: f64,
    pub binary_kb: f64,
    /// Binary size over original size, smaller is better
    pub compression_ratio: f64,
    pub bits_per_point: f64,
}

impl SizeMetrics {
    /// Derive the metrics from raw byte counts (1 kB = 1000 bytes).
    ///
    /// Nothing is rounded. Fails on a zero point count.
    pub fn new(original_bytes: u64, binary_bytes: u64, point_count: usize) -> Result<Self> {
        if point_count == 0 {
            return Err(EvalError::EmptyPointCloud);
        }

        let original_kb = original_bytes as f64 / 1000.0;
        let binary_kb = binary_bytes as f64 / 1000.0;

        Ok(Self {
            original_kb,
            binary_kb,
            compression_ratio: binary_kb / original_kb,
            bits_per_point: binary_kb * 1000.0 * 8.0 / point_count as f64,
        })
    }

    /// Stat both files and derive the metrics
    pub fn from_files(original: &Path, binary: &Path, point_count: usize) -> Result<Self> {
        Self::new(file_size(original)?, file_size(binary)?, point_count)
    }
}

fn file_size(path: &Path) -> Result<u64> {
    std::fs::metadata(path)
        .map(|meta| meta.len())
        .map_err(|source| EvalError::Stat {
            path: path.to_path_buf(),
            source,
        })
}
