// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - point cloud loading

mod ply;

pub use ply::read_point_cloud;
