//! Client wrappers for signup, SSO, and login endpoints. These helpers keep
//! request paths in one place and must never log credentials or tokens.

use crate::app_lib::{AppError, get_json, post_json, post_json_response, put_json};
use crate::features::auth::types::{
    LoginRequest, LoginResponse, ResendVerificationRequest, SignupRequest, SignupResponse,
    SsoCheckResponse, SsoLoginRequest, SsoLoginResponse, WrappedKeyUpload,
};

/// Creates an account. The response shape decides whether verification or key
/// enrollment follows.
pub async fn signup(request: &SignupRequest) -> Result<SignupResponse, AppError> {
    post_json_response("/api/auth/signup", request).await
}

/// Checks whether the email domain mandates external identity-provider login.
pub async fn sso_check(domain: &str) -> Result<SsoCheckResponse, AppError> {
    get_json(&format!("/api/auth/sso/check?domain={domain}")).await
}

/// Requests the provider redirect URL for an SSO-required domain.
pub async fn sso_login_url(domain: &str) -> Result<SsoLoginResponse, AppError> {
    let request = SsoLoginRequest {
        domain: domain.to_string(),
    };
    post_json_response("/api/auth/sso/login", &request).await
}

/// Uploads the wrapped vaultspace key. Signup must not navigate onward until
/// this has succeeded.
pub async fn upload_wrapped_key(vaultspace_id: &str, wrapped_key: String) -> Result<(), AppError> {
    let body = WrappedKeyUpload { wrapped_key };
    put_json(&format!("/api/vaultspaces/{vaultspace_id}/key"), &body).await
}

/// Password login; returns the session token to persist.
pub async fn login(request: &LoginRequest) -> Result<LoginResponse, AppError> {
    post_json_response("/api/auth/login", request).await
}

/// Requests a new verification email without leaking account existence.
pub async fn resend_verification(email: &str) -> Result<(), AppError> {
    let request = ResendVerificationRequest {
        email: email.to_string(),
    };
    post_json("/api/auth/resend-verification", &request).await
}
