use std::io;

use thiserror::Error;

/// Errors raised while loading a configuration.
///
/// Every parse error carries the 1-based number of the offending source
/// line, counting blank and comment lines.
#[derive(Error, Debug)]
pub enum Error {
    /// The underlying reader failed (or produced invalid UTF-8).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A line starting with `[` which is too short, has no closing `]`,
    /// or names an empty section.
    #[error("invalid section at line {line}")]
    InvalidSection { line: usize },

    /// A line which is neither a section header nor a `key = value` pair.
    #[error("invalid format at line {line}")]
    InvalidFormat { line: usize },

    /// A `key = value` pair appearing before any section header.
    #[error("key without section at line {line}")]
    KeyWithoutSection { line: usize },

    /// A `key = value` pair whose key is blank.
    #[error("empty key at line {line}")]
    EmptyKey { line: usize },
}

impl Error {
    /// Source line of a parse error; `None` for I/O failures.
    pub fn line(&self) -> Option<usize> {
        match *self {
            Error::Io(_) => None,
            Error::InvalidSection { line }
            | Error::InvalidFormat { line }
            | Error::KeyWithoutSection { line }
            | Error::EmptyKey { line } => Some(line),
        }
    }
}

/// Lookup failures from `Document::get`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchError {
    #[error("No such configuration section")]
    NoSuchSection,
    #[error("No such configuration key")]
    NoSuchKey,
}

pub type Result<T> = std::result::Result<T, Error>;
