// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem: logging setup and terminal output

pub mod logging;
pub mod reporter;

pub use logging::init_logging;
pub use reporter::Reporter;
