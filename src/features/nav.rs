//! Navigation targets shared by the onboarding flows.

/// Login route carrying the post-setup marker, so the login view can tell a
/// fresh post-setup arrival apart from a stale session.
pub const LOGIN_AFTER_SETUP: &str = "/login?setup=done";

/// Query marker appended by the setup flow.
pub const SETUP_DONE_MARKER: &str = "done";

/// Entry point of the vault application proper. Owned by the main SPA, not
/// this onboarding fragment, so it is reached with a full page navigation.
pub const VAULT_APP_PATH: &str = "/vault";

/// Builds the verification route, carrying the email and user id when known.
pub fn verification_route(email: Option<&str>, user_id: Option<&str>) -> String {
    let mut route = String::from("/verify-email");
    let mut separator = '?';

    if let Some(email) = email.map(str::trim).filter(|email| !email.is_empty()) {
        route.push(separator);
        route.push_str("email=");
        route.push_str(&query_encode(email));
        separator = '&';
    }
    if let Some(user_id) = user_id.map(str::trim).filter(|user_id| !user_id.is_empty()) {
        route.push(separator);
        route.push_str("user=");
        route.push_str(&query_encode(user_id));
    }
    route
}

/// Percent-encodes the characters that would break a query value.
fn query_encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'@' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_route_with_both_parts() {
        assert_eq!(
            verification_route(Some("admin@vault.example"), Some("u1")),
            "/verify-email?email=admin@vault.example&user=u1"
        );
    }

    #[test]
    fn verification_route_with_email_only() {
        assert_eq!(
            verification_route(Some("admin@vault.example"), None),
            "/verify-email?email=admin@vault.example"
        );
    }

    #[test]
    fn verification_route_without_details() {
        assert_eq!(verification_route(None, None), "/verify-email");
        assert_eq!(verification_route(Some("  "), None), "/verify-email");
    }

    #[test]
    fn query_values_are_percent_encoded() {
        assert_eq!(
            verification_route(Some("a b&c=d@e.fr"), None),
            "/verify-email?email=a%20b%26c%3Dd@e.fr"
        );
    }
}
