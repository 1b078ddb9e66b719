//! Invitation acceptance types.

use serde::{Deserialize, Serialize};

/// Metadata shown before the invited user picks a password.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Invitation {
    pub email: String,
    pub invited_by: Option<String>,
    pub vaultspace_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AcceptInvitationRequest {
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AcceptInvitationResponse {
    pub user: InvitedUser,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InvitedUser {
    pub id: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invitation_parses_with_optional_fields_missing() {
        let invitation: Invitation =
            serde_json::from_str(r#"{"email": "guest@vault.example"}"#).unwrap();
        assert_eq!(invitation.email, "guest@vault.example");
        assert!(invitation.invited_by.is_none());
        assert!(invitation.vaultspace_name.is_none());
    }

    #[test]
    fn accept_response_exposes_user_identity() {
        let response: AcceptInvitationResponse = serde_json::from_str(
            r#"{"user": {"id": "u7", "email": "guest@vault.example"}}"#,
        )
        .unwrap();
        assert_eq!(response.user.id, "u7");
        assert_eq!(response.user.email, "guest@vault.example");
    }
}
