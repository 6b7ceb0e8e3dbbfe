// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Process runner for the `pc_error` distance tool

use crate::error::{EvalError, Result};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured output of one tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: String,
    pub status: ExitStatus,
    pub duration: Duration,
}

/// Runner for the external point-cloud distance tool
pub struct PcErrorRunner {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl PcErrorRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run `pc_error -a <original> -b <decoded> -d` and capture stdout.
    ///
    /// Stderr is discarded. A non-zero exit is not an error here: whatever the
    /// tool printed is still returned and the metric parser decides whether it
    /// is complete.
    pub fn run(&self, original: &Path, decoded: &Path) -> Result<ToolOutput> {
        let start = Instant::now();

        let mut child = Command::new(&self.program)
            .arg("-a")
            .arg(original)
            .arg("-b")
            .arg(decoded)
            .arg("-d")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| self.launch_error(source))?;

        // Drain stdout concurrently so a chatty tool never blocks on a full pipe
        let pipe = child.stdout.take();
        let reader = thread::spawn(move || match pipe {
            Some(pipe) => drain(pipe),
            None => Ok(Vec::new()),
        });

        let status = match self.timeout {
            Some(timeout) => self.wait_with_deadline(&mut child, timeout)?,
            None => child.wait().map_err(|source| self.wait_error(source))?,
        };

        let stdout = self.join_reader(reader)?;
        let duration = start.elapsed();

        if !status.success() {
            log::warn!(
                "{} exited with status {}; metrics may be incomplete",
                self.program.display(),
                status
            );
        }
        log::debug!("{} finished in {:?}", self.program.display(), duration);

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            status,
            duration,
        })
    }

    fn wait_with_deadline(&self, child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
        let deadline = Instant::now() + timeout;

        loop {
            if let Some(status) = child.try_wait().map_err(|source| self.wait_error(source))? {
                return Ok(status);
            }

            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(EvalError::ToolTimeout(timeout));
            }

            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Partial stdout is never returned: a truncated value would be logged as-is.
    fn join_reader(&self, reader: JoinHandle<io::Result<Vec<u8>>>) -> Result<Vec<u8>> {
        let read = reader
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("stdout reader panicked")));

        read.map_err(|source| EvalError::ToolRead {
            path: self.program.clone(),
            source,
        })
    }

    fn launch_error(&self, source: io::Error) -> EvalError {
        EvalError::ToolLaunch {
            path: self.program.clone(),
            source,
        }
    }

    fn wait_error(&self, source: io::Error) -> EvalError {
        EvalError::ToolWait {
            path: self.program.clone(),
            source,
        }
    }
}

fn drain(mut pipe: impl Read) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(buf)
}
