//! SSO domain requirement probing for the signup form. The probe fires after
//! a 500 ms quiet period; each keystroke cancels the previously scheduled
//! probe, so at most one lookup is in flight per quiet period. In-flight
//! responses are not cancelled; a stale answer can briefly toggle the SSO
//! affordance, which only swaps a form control.

use super::types::{SsoCheckResponse, SsoProvider};

/// Quiet period after the last keystroke before the domain lookup fires.
pub const SSO_PROBE_QUIET_MS: u32 = 500;

/// Domain part of an email, lowercased. `None` until the input has a
/// plausible `local@domain` shape worth probing.
pub fn email_domain(email: &str) -> Option<String> {
    let trimmed = email.trim();
    let (local, domain) = trimmed.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(domain.to_lowercase())
}

/// Provider to surface for an SSO-required domain, `None` for password auth.
pub fn required_provider(response: SsoCheckResponse) -> Option<SsoProvider> {
    if response.requires_sso {
        response.provider
    } else {
        None
    }
}

/// Label for the control that replaces the password form.
pub fn sso_button_label(provider: &SsoProvider) -> String {
    format!("Sign in with {}", provider.name)
}

#[cfg(target_arch = "wasm32")]
pub use probe::SsoProbe;

#[cfg(target_arch = "wasm32")]
mod probe {
    use super::{SSO_PROBE_QUIET_MS, email_domain, required_provider};
    use crate::features::auth::{client, types::SsoProvider};
    use leptos::leptos_dom::helpers::{TimeoutHandle, set_timeout_with_handle};
    use leptos::prelude::*;
    use leptos::task::spawn_local;
    use std::time::Duration;

    /// Debounced, cancellable SSO domain lookup keyed by the email input.
    #[derive(Clone, Copy)]
    pub struct SsoProbe {
        pending: StoredValue<Option<TimeoutHandle>>,
    }

    impl SsoProbe {
        pub fn new() -> Self {
            Self {
                pending: StoredValue::new(None),
            }
        }

        /// Schedules a lookup for the email's domain, cancelling any probe
        /// still waiting out its quiet period. Lookup failures leave the
        /// current affordance untouched.
        pub fn schedule(&self, email: String, set_provider: WriteSignal<Option<SsoProvider>>) {
            if let Some(handle) = self.pending.get_value() {
                handle.clear();
            }

            let Some(domain) = email_domain(&email) else {
                set_provider.set(None);
                return;
            };

            let handle = set_timeout_with_handle(
                move || {
                    spawn_local(async move {
                        if let Ok(response) = client::sso_check(&domain).await {
                            set_provider.set(required_provider(response));
                        }
                    });
                },
                Duration::from_millis(u64::from(SSO_PROBE_QUIET_MS)),
            )
            .ok();
            self.pending.set_value(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_domain_requires_full_address() {
        assert_eq!(email_domain("alice@okta.example"), Some("okta.example".to_string()));
        assert_eq!(email_domain("alice@OKTA.example "), Some("okta.example".to_string()));
        assert_eq!(email_domain("alice"), None);
        assert_eq!(email_domain("alice@"), None);
        assert_eq!(email_domain("@okta.example"), None);
        assert_eq!(email_domain("a@b@c"), None);
    }

    #[test]
    fn sso_required_domain_yields_provider_control() {
        let response: SsoCheckResponse = serde_json::from_str(
            r#"{"requires_sso": true, "provider": {"id": "okta", "name": "Okta"}}"#,
        )
        .unwrap();
        let provider = required_provider(response).unwrap();
        assert_eq!(sso_button_label(&provider), "Sign in with Okta");
    }

    #[test]
    fn password_domains_yield_no_provider() {
        let response = SsoCheckResponse {
            requires_sso: false,
            provider: Some(SsoProvider {
                id: "okta".to_string(),
                name: "Okta".to_string(),
            }),
        };
        assert_eq!(required_provider(response), None);
    }

    #[test]
    fn sso_without_provider_metadata_stays_on_password() {
        let response = SsoCheckResponse {
            requires_sso: true,
            provider: None,
        };
        assert_eq!(required_provider(response), None);
    }
}
