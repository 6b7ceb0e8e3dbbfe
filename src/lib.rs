// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point cloud compression evaluation
//!
//! Compares an original point cloud with its compressed-then-decompressed
//! reconstruction: distance metrics from the external `pc_error` tool, an
//! Earth Mover's Distance between the two clouds, and size/rate figures for
//! the compressed bitstream. Results are appended to a text log.

pub mod cli;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod geometry;
pub mod io;
pub mod utils;

pub use config::EvalConfig;
pub use error::{EvalError, Result};
pub use evaluation::{evaluate, EvalPaths, EvaluationReport};
pub use geometry::PointCloud;
pub use io::read_point_cloud;
