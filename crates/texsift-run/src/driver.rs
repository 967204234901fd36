use anyhow::{Context, Result};
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::Command;

use texsift_log::LogFilter;

use crate::stream;

/// Configuration for invoking an external TeX engine.
pub struct Compiler {
    pub program: String,
    pub args: Vec<String>,
}

impl Compiler {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Resolves the engine binary on `PATH` without running it, so a
    /// missing program can be reported up front.
    pub fn locate(&self) -> Result<PathBuf, which::Error> {
        which::which(&self.program)
    }

    /// Spawns the engine with stdout and stderr joined into one pipe,
    /// pumps the combined stream through `filter` into `sink`, and
    /// returns the engine's exit code once the stream is exhausted.
    ///
    /// The pipe's OS buffering is the only coupling between producer and
    /// consumer: the engine blocks when the filter falls behind, the
    /// filter blocks on read while the engine is quiet.
    pub fn run<W: Write>(&self, filter: LogFilter, sink: &mut W, color: bool) -> Result<i32> {
        let (reader, writer) = io::pipe().context("creating the output pipe")?;
        let stderr = writer.try_clone().context("sharing the output pipe")?;

        log::debug!("spawning {} {:?}", self.program, self.args);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdout(writer)
            .stderr(stderr)
            .spawn()
            .with_context(|| format!("launching `{}`", self.program))?;

        stream::pump(BufReader::new(reader), filter, sink, color)
            .context("filtering engine output")?;

        let status = child
            .wait()
            .with_context(|| format!("waiting for `{}`", self.program))?;
        log::debug!("{} exited with {status}", self.program);
        Ok(status.code().unwrap_or(1))
    }
}
