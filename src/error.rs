use std::path::PathBuf;

use thiserror::Error;

/// Construction-time failure: the certification source is missing,
/// unreadable, or does not match the expected schema.
///
/// Only loading raises this. Queries never fail — an unknown run or
/// luminosity block is simply "not certified" and returns `false`.
#[derive(Debug, Error)]
pub enum DataFormatError {
    /// File missing or unreadable.
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not a JSON object of string run keys to arrays of two-element
    /// non-negative integer pairs.
    #[error("parsing certification JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A key in the JSON object is not a decimal run number.
    #[error("run key {0:?} is not a decimal run number")]
    RunKey(String),

    /// An interval with `start > end`.
    #[error("run {run}: invalid interval [{start}, {end}] (start > end)")]
    Interval { run: u32, start: u32, end: u32 },
}
