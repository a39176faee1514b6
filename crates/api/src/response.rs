//! Shared response payloads for API handlers.

use serde::Serialize;

/// Acknowledgement payload for operations that return no entity
/// (e.g. cancelling an enrollment).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
