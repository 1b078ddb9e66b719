//! Client wrappers for the first-run setup endpoints.

use crate::app_lib::{AppError, get_json, post_json_response};
use crate::features::setup::types::{SetupRequest, SetupResponse, SetupStatus};

/// Whether setup has already been completed. An indeterminate answer
/// (network or backend failure) is treated as "not complete" so a transient
/// outage can never block first-run setup.
pub async fn setup_complete() -> bool {
    match get_json::<SetupStatus>("/api/setup/status").await {
        Ok(status) => status.complete,
        Err(_) => false,
    }
}

/// Submits the administrator credentials.
pub async fn submit_setup(request: &SetupRequest) -> Result<SetupResponse, AppError> {
    post_json_response("/api/setup", request).await
}
