//! First-run setup types and response classification.
//!
//! Backends have shipped several setup response shapes over time: an
//! immediate session token, an email-verification requirement, and
//! message-only rejections. The response is therefore parsed into an
//! all-optional struct and classified in one place rather than assuming a
//! single canonical shape.

use serde::{Deserialize, Serialize};

/// Fallback when a rejection carries no usable message.
pub const SETUP_FALLBACK_ERROR: &str = "Setup failed. Please try again.";

#[derive(Serialize, Deserialize, Debug)]
pub struct SetupRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct SetupResponse {
    pub token: Option<String>,
    pub user: Option<SetupUser>,
    pub message: Option<String>,
    #[serde(default)]
    pub email_verification_required: bool,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct SetupUser {
    pub id: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetupStatus {
    pub complete: bool,
}

/// Submission lifecycle of the setup form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupPhase {
    Idle,
    Submitting,
    Succeeded,
    VerificationPending,
    Failed(String),
}

/// What a 2xx setup response means for the flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupOutcome {
    /// A token was issued; it must be purged before the login redirect.
    TokenIssued,
    VerificationRequired {
        email: Option<String>,
        user_id: Option<String>,
    },
    /// Accepted by transport but rejected by the backend.
    Rejected(String),
}

/// Classifies a setup response. A non-empty token wins over the verification
/// flag; a response with neither is a rejection carrying its own message.
pub fn classify_setup_response(response: &SetupResponse) -> SetupOutcome {
    if response
        .token
        .as_deref()
        .is_some_and(|token| !token.trim().is_empty())
    {
        return SetupOutcome::TokenIssued;
    }

    if response.email_verification_required {
        let (email, user_id) = response
            .user
            .as_ref()
            .map_or((None, None), |user| (user.email.clone(), user.id.clone()));
        return SetupOutcome::VerificationRequired { email, user_id };
    }

    let message = response
        .message
        .as_deref()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .unwrap_or(SETUP_FALLBACK_ERROR)
        .to_string();
    SetupOutcome::Rejected(message)
}

/// Phase the form enters for a classified response.
pub fn phase_for_outcome(outcome: &SetupOutcome) -> SetupPhase {
    match outcome {
        SetupOutcome::TokenIssued => SetupPhase::Succeeded,
        SetupOutcome::VerificationRequired { .. } => SetupPhase::VerificationPending,
        SetupOutcome::Rejected(message) => SetupPhase::Failed(message.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_variant_wins_even_with_verification_flag() {
        let response: SetupResponse = serde_json::from_str(
            r#"{"token": "tok", "email_verification_required": true}"#,
        )
        .unwrap();
        assert_eq!(classify_setup_response(&response), SetupOutcome::TokenIssued);
    }

    #[test]
    fn blank_token_does_not_count_as_issued() {
        let response = SetupResponse {
            token: Some("   ".to_string()),
            ..SetupResponse::default()
        };
        assert!(matches!(
            classify_setup_response(&response),
            SetupOutcome::Rejected(_)
        ));
    }

    #[test]
    fn verification_variant_carries_user_details() {
        let response: SetupResponse = serde_json::from_str(
            r#"{
                "email_verification_required": true,
                "user": {"id": "u1", "email": "admin@vault.example"}
            }"#,
        )
        .unwrap();
        assert_eq!(
            classify_setup_response(&response),
            SetupOutcome::VerificationRequired {
                email: Some("admin@vault.example".to_string()),
                user_id: Some("u1".to_string()),
            }
        );
    }

    #[test]
    fn verification_variant_without_user_still_classifies() {
        let response: SetupResponse =
            serde_json::from_str(r#"{"email_verification_required": true}"#).unwrap();
        assert_eq!(
            classify_setup_response(&response),
            SetupOutcome::VerificationRequired {
                email: None,
                user_id: None,
            }
        );
    }

    #[test]
    fn message_only_variant_is_rejected_verbatim() {
        let response: SetupResponse =
            serde_json::from_str(r#"{"message": "Setup already completed"}"#).unwrap();
        assert_eq!(
            classify_setup_response(&response),
            SetupOutcome::Rejected("Setup already completed".to_string())
        );
    }

    #[test]
    fn empty_response_falls_back_to_generic_rejection() {
        let response: SetupResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(
            classify_setup_response(&response),
            SetupOutcome::Rejected(SETUP_FALLBACK_ERROR.to_string())
        );
    }

    #[test]
    fn outcomes_map_to_phases() {
        assert_eq!(
            phase_for_outcome(&SetupOutcome::TokenIssued),
            SetupPhase::Succeeded
        );
        assert_eq!(
            phase_for_outcome(&SetupOutcome::VerificationRequired {
                email: None,
                user_id: None,
            }),
            SetupPhase::VerificationPending
        );
        assert_eq!(
            phase_for_outcome(&SetupOutcome::Rejected("no".to_string())),
            SetupPhase::Failed("no".to_string())
        );
    }

    #[test]
    fn setup_request_serializes_confirm_password_in_camel_case() {
        let request = SetupRequest {
            email: "admin@vault.example".to_string(),
            password: "Abcdefgh1234".to_string(),
            confirm_password: "Abcdefgh1234".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("confirmPassword").is_some());
        assert!(value.get("confirm_password").is_none());
    }
}
