//! Request/response types for signup, SSO, and login endpoints.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SignupResponse {
    pub token: Option<String>,
    #[serde(default)]
    pub email_verification_required: bool,
    pub user: Option<SignupUser>,
    pub personal_vaultspace: Option<Vaultspace>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SignupUser {
    pub id: String,
    pub email: String,
    /// Base64 salt issued by the server for client-side master key derivation.
    pub master_key_salt: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Vaultspace {
    pub id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SsoProvider {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SsoCheckResponse {
    #[serde(default)]
    pub requires_sso: bool,
    pub provider: Option<SsoProvider>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SsoLoginRequest {
    pub domain: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SsoLoginResponse {
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WrappedKeyUpload {
    /// Base64 `nonce || ciphertext` envelope produced by the key collaborator.
    pub wrapped_key: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ResendVerificationRequest {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_response_parses_full_shape() {
        let response: SignupResponse = serde_json::from_str(
            r#"{
                "token": "tok",
                "user": {"id": "u1", "email": "a@b.co", "master_key_salt": "c2FsdA=="},
                "personal_vaultspace": {"id": "vs1"}
            }"#,
        )
        .unwrap();
        assert_eq!(response.token.as_deref(), Some("tok"));
        assert!(!response.email_verification_required);
        assert_eq!(response.user.unwrap().master_key_salt, "c2FsdA==");
        assert_eq!(response.personal_vaultspace.unwrap().id, "vs1");
    }

    #[test]
    fn signup_response_parses_verification_shape() {
        let response: SignupResponse =
            serde_json::from_str(r#"{"email_verification_required": true}"#).unwrap();
        assert!(response.email_verification_required);
        assert!(response.token.is_none());
    }

    #[test]
    fn sso_check_response_defaults_to_no_requirement() {
        let response: SsoCheckResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.requires_sso);
        assert!(response.provider.is_none());
    }
}
