// src/pool/command.rs

//! Pool client backed by the `pool-exists` / `pool-get` tools
//!
//! Both tools locate the pool through `POOL_DIR`, which is set on each child
//! process only.

use super::{PoolClient, PoolConfig};
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

pub const POOL_DIR_ENV: &str = "POOL_DIR";
pub const POOL_EXISTS: &str = "pool-exists";
pub const POOL_GET: &str = "pool-get";

/// An external program plus any leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    program: OsString,
    args: Vec<OsString>,
}

impl Tool {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument passed before the per-call arguments
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn command(&self, pool: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).env(POOL_DIR_ENV, pool);
        cmd
    }

    fn display(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

/// Production pool client
#[derive(Debug, Clone)]
pub struct CommandPool {
    config: PoolConfig,
    exists_tool: Tool,
    get_tool: Tool,
}

impl CommandPool {
    /// Client using `pool-exists` and `pool-get` from `PATH`
    pub fn new(config: PoolConfig) -> Self {
        Self::with_tools(config, Tool::new(POOL_EXISTS), Tool::new(POOL_GET))
    }

    /// Client using explicit tools
    pub fn with_tools(config: PoolConfig, exists_tool: Tool, get_tool: Tool) -> Self {
        Self {
            config,
            exists_tool,
            get_tool,
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }
}

impl PoolClient for CommandPool {
    fn exists(&self, name: &str) -> Result<bool> {
        let status = self
            .exists_tool
            .command(self.config.path())
            .arg(name)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                Error::Configuration(format!(
                    "Failed to run {}: {}",
                    self.exists_tool.display(),
                    e
                ))
            })?;

        debug!("{} {}: {}", POOL_EXISTS, name, status.success());
        Ok(status.success())
    }

    fn fetch(&self, names: &[String], dest: &Path) -> Result<()> {
        let failed = |diagnostic: String| Error::PoolFetch {
            names: names.to_vec(),
            dest: dest.to_path_buf(),
            diagnostic,
        };

        debug!(
            "{} --strict -i- {} ({} packages)",
            POOL_GET,
            dest.display(),
            names.len()
        );

        let mut child = self
            .get_tool
            .command(self.config.path())
            .args(["--strict", "-i-"])
            .arg(dest)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("Failed to run {}: {}", self.get_tool.display(), e)))?;

        // Names go in from a separate thread while this one drains stdout
        // and stderr; the tool may write before it has read everything.
        let stdin = child.stdin.take();
        let payload = names.join("\n");
        let writer = thread::spawn(move || -> io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(payload.as_bytes())?;
            }
            // stdin closes here so the tool sees EOF
            Ok(())
        });

        let output = child.wait_with_output();
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("package list writer panicked")));
        let output = output
            .map_err(|e| failed(format!("Failed to wait for {}: {}", self.get_tool.display(), e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            return Err(failed(stderr.trim().to_string()));
        }
        if !output.status.success() {
            return Err(failed(format!("{} exited with {}", self.get_tool.display(), output.status)));
        }
        // A tool that exits cleanly without reading every name still failed
        if let Err(e) = written {
            return Err(failed(format!("Failed to write package list: {}", e)));
        }

        Ok(())
    }
}
