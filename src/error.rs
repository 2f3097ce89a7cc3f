//! Error taxonomy for range reading and the open handshake.
//!
//! Every failure surfaces to the immediate caller through the async result
//! channel; nothing is logged, swallowed, or retried at this layer.

use thiserror::Error;

/// A host resource that cannot satisfy the range-read contract.
#[derive(Debug, Error)]
#[error("resource cannot serve range reads: {reason}")]
pub struct CapabilityError {
    reason: String,
}

impl CapabilityError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Failure of a single range fetch.
///
/// Delivered instead of a buffer, never alongside one. The reader does not
/// retry; whether a host primitive retries internally is its own business.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The underlying I/O primitive failed.
    #[error("i/o error while fetching range")]
    Io(#[from] std::io::Error),

    /// The host revoked access to the resource after the reader was built.
    #[error("resource revoked by the host")]
    Revoked,

    /// The fetch was given up on before completion.
    #[error("read aborted: {0}")]
    Aborted(String),

    /// Transport-level failure for remote resources.
    #[error("transport error while fetching range: {0}")]
    Transport(String),
}

/// Failure of the open handshake. A failed open never yields a handle.
#[derive(Debug, Error)]
pub enum OpenError {
    /// The resource failed the capability check; no read was issued.
    #[error(transparent)]
    CapabilityMismatch(#[from] CapabilityError),

    /// The parser's own open routine failed. Forwarded verbatim, not
    /// reinterpreted.
    #[error("container open failed: {0}")]
    Parser(#[source] anyhow::Error),
}
