//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while sampling a live process
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to read {path}: {source}")]
    ProcRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed stat line for task {tid}: {reason}")]
    MalformedStat { tid: u32, reason: String },

    #[error("Failed to signal process {pid}: {source}")]
    Signal {
        pid: i32,
        #[source]
        source: nix::Error,
    },

    #[error("Process {0} has no threads left to sample")]
    NoThreads(i32),
}

/// Errors that can occur during capture parsing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid capture format: {0}")]
    InvalidFormat(String),

    #[error("Capture contains no snapshots")]
    EmptyCapture,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    #[error("Failed to generate flamegraph: {0}")]
    GenerationFailed(String),

    #[error("Empty stack data")]
    EmptyStacks,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
