// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error taxonomy for an evaluation run

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Everything that can abort an evaluation run.
///
/// None of these are recovered internally. A point-count mismatch between the
/// two clouds is deliberately absent: it only skips the EMD section.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("{} does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("{} already exists", .0.display())]
    LogExists(PathBuf),

    #[error("failed to launch distance tool {}", .path.display())]
    ToolLaunch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for distance tool {}", .path.display())]
    ToolWait {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read output of distance tool {}", .path.display())]
    ToolRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("distance tool did not finish within {0:?}")]
    ToolTimeout(Duration),

    #[error("missing metrics in distance tool output: {}", .0.join(", "))]
    MissingMetrics(Vec<&'static str>),

    #[error("failed to read PLY file {}", .path.display())]
    PlyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} has no vertex element", .0.display())]
    MissingVertexElement(PathBuf),

    #[error("{}: vertex property '{property}' is missing or not a scalar", .path.display())]
    MissingVertexProperty {
        path: PathBuf,
        property: &'static str,
    },

    #[error("point cloud has no points")]
    EmptyPointCloud,

    #[error("failed to stat {}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write log {}", .path.display())]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write JSON summary {}", .path.display())]
    SummaryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, EvalError>;
