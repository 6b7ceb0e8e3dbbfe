// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - point cloud representation

mod point_cloud;

pub use point_cloud::PointCloud;
