//! Client wrappers for the invitation acceptance endpoints.

use crate::app_lib::{AppError, get_json, post_json_response};
use crate::features::invitations::types::{
    AcceptInvitationRequest, AcceptInvitationResponse, Invitation,
};

/// Fetches invitation metadata by its opaque token. Any failure renders the
/// not-found state; the acceptance form is only shown for a valid invitation.
pub async fn fetch_invitation(token: &str) -> Result<Invitation, AppError> {
    get_json(&format!("/api/auth/invitations/accept/{token}")).await
}

/// Accepts the invitation with the chosen password.
pub async fn accept_invitation(
    token: &str,
    password: String,
) -> Result<AcceptInvitationResponse, AppError> {
    let request = AcceptInvitationRequest { password };
    post_json_response(&format!("/api/auth/invitations/accept/{token}"), &request).await
}
