//! # Request Plumbing
//!
//! Shared message helpers for the catalog and reservation actors.

use tokio::sync::oneshot;

use super::StoreError;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Replies to a request, ignoring callers that stopped waiting.
pub fn reply<T>(respond_to: Response<T>, result: Result<T, StoreError>) {
    let _ = respond_to.send(result);
}
