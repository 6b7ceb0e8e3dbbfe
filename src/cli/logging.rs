// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Logger setup for the command-line tools

use chrono::Local;
use env_logger::{Builder, Env};
use std::io::Write;

/// Install the global logger.
///
/// Lines look like `2025-01-01 12:00:00.123 INFO pcc_eval::evaluation - message`.
/// `RUST_LOG` takes precedence over the `verbose` default.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };

    let _ = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.module_path().unwrap_or("pcc_eval"),
                record.args()
            )
        })
        .try_init();
}
