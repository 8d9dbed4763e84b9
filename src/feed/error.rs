// src/feed/error.rs
use thiserror::Error;

use crate::feed::types::ErrorKind;

/// Non-fatal fetch-cycle failures. All variants are caught at the
/// controller boundary and converted into a `Degraded` transition with
/// fallback data; none terminate a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Non-2xx HTTP status or transport failure.
    #[error("network error (status {status:?}): {message}")]
    Network {
        status: Option<u16>,
        message: String,
    },

    /// Response body could not be decoded as JSON.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Fetch and decode succeeded but yielded zero usable records.
    /// Synthesized by the controller, never raised by the client.
    #[error("fetch succeeded but produced no usable records")]
    EmptyResult,
}

impl FeedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FeedError::Network { .. } => ErrorKind::Network,
            FeedError::Parse { .. } => ErrorKind::Parse,
            FeedError::EmptyResult => ErrorKind::EmptyResult,
        }
    }
}
