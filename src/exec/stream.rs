//! Stage stream endpoints and their conversions.
//!
//! Every endpoint is owned by exactly one stage. Conversion into `Stdio`
//! (external stages) or readers/writers (builtin stages) consumes the
//! endpoint, so pipe ends close by `Drop` on every path.

use std::fs::File;
use std::io::{self, Read, Write};
use std::process::Stdio;

use os_pipe::{PipeReader, PipeWriter};

/// Where a stage reads its standard input from.
#[derive(Debug)]
pub enum StageInput {
    /// The shell's own standard input (first stage only).
    Inherit,
    /// Read end of the pipe from the previous stage.
    Pipe(PipeReader),
}

impl StageInput {
    pub fn into_stdio(self) -> Stdio {
        match self {
            StageInput::Inherit => Stdio::inherit(),
            StageInput::Pipe(r) => Stdio::from(r),
        }
    }
}

/// Where a stage writes one of its output streams.
#[derive(Debug)]
pub enum StageOutput {
    /// The shell's inherited standard output.
    Inherit,
    /// The shell's inherited standard error.
    InheritErr,
    /// Write end of the pipe to the next stage.
    Pipe(PipeWriter),
    /// An opened redirection target.
    File(File),
}

impl StageOutput {
    pub fn into_stdio(self) -> Stdio {
        match self {
            StageOutput::Inherit | StageOutput::InheritErr => Stdio::inherit(),
            StageOutput::Pipe(w) => Stdio::from(w),
            StageOutput::File(f) => Stdio::from(f),
        }
    }

    pub fn into_writer(self) -> Box<dyn Write + Send> {
        match self {
            StageOutput::Inherit => Box::new(io::stdout()),
            StageOutput::InheritErr => Box::new(io::stderr()),
            StageOutput::Pipe(w) => Box::new(w),
            StageOutput::File(f) => Box::new(f),
        }
    }
}

/// The full stream set for one stage.
#[derive(Debug)]
pub struct StageIo {
    pub stdin: StageInput,
    pub stdout: StageOutput,
    pub stderr: StageOutput,
}

impl StageIo {
    /// Split into the parts a builtin stage uses: an optional pipe reader
    /// (inherited terminal input is never consumed by a builtin) and the
    /// two writers.
    pub fn into_builtin_parts(
        self,
    ) -> (
        Option<Box<dyn Read + Send>>,
        Box<dyn Write + Send>,
        Box<dyn Write + Send>,
    ) {
        let input = match self.stdin {
            StageInput::Inherit => None,
            StageInput::Pipe(r) => Some(Box::new(r) as Box<dyn Read + Send>),
        };
        (input, self.stdout.into_writer(), self.stderr.into_writer())
    }
}
