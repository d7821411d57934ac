//! Error types raised while decoding records and loading game data.

use std::path::PathBuf;

use thiserror::Error;

use crate::format::{Cipher, FieldName};

/// Structural failures of the decode pipeline. Decoding is all-or-nothing, so any of these
/// means no summary was produced for the record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unsupported record format: {tag:?}")]
    UnsupportedFormat { tag: String },

    #[error("record is truncated: expected at least {expected} bytes, found {actual}")]
    TruncatedInput { expected: usize, actual: usize },

    #[error("field {field:?} at offset {offset} (width {width}) reads past the {len} byte record")]
    FieldDecodeOverflow {
        field: FieldName,
        offset: usize,
        width: usize,
        len: usize,
    },

    #[error("field {field:?} has an encoding that does not fit it")]
    InvalidDescriptor { field: FieldName },

    #[error("{cipher} cipher needs {extent} bytes but the record is {len}")]
    CipherOverflow {
        cipher: Cipher,
        extent: usize,
        len: usize,
    },
}

/// Failures while reading the supplied lookup tables from disk.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
