// In: src/error.rs

//! This module defines the single, unified error type for the entire riptide
//! library, plus the translation layer between raw codec status values and
//! that type. It uses the `thiserror` crate to provide ergonomic,
//! context-aware error handling.

use thiserror::Error;
use zstd::zstd_safe;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RiptideError>;

#[derive(Error, Debug)]
pub enum RiptideError {
    /// A bad, missing or conflicting codec option.
    #[error("invalid codec configuration: {0}")]
    Config(String),

    /// An operation was invoked with the wrong shape (e.g. on a closed
    /// session).
    #[error("wrong arguments: {0}")]
    Argument(String),

    /// The native codec reported a failure. Carries the codec's own error
    /// name, the numeric code, and the label of the failing primitive.
    #[error("{op} failed - {name} (code:{code})")]
    Codec {
        op: &'static str,
        name: &'static str,
        code: usize,
    },

    /// A bounded destination could not hold the produced output, or buffer
    /// growth was refused at the platform allocation ceiling. This error is
    /// synthesized by this layer; the codec itself never raises it.
    #[error("{op} failed - destination exceeds {limit} bytes")]
    OutOfSpace { op: &'static str, limit: usize },

    /// An error originating from the caller-supplied sink or source port.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

impl RiptideError {
    /// Wraps a raw codec error code together with the failing operation's
    /// label.
    pub(crate) fn codec(op: &'static str, code: zstd_safe::ErrorCode) -> Self {
        RiptideError::Codec {
            op,
            name: zstd_safe::get_error_name(code),
            code,
        }
    }

    pub(crate) fn out_of_space(op: &'static str, limit: usize) -> Self {
        RiptideError::OutOfSpace { op, limit }
    }
}

/// Passes a non-error codec status through unchanged; resolves an encoded
/// error into [`RiptideError::Codec`].
pub(crate) fn check(op: &'static str, status: zstd_safe::SafeResult) -> Result<usize> {
    status.map_err(|code| RiptideError::codec(op, code))
}
