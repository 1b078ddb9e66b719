//! First-run administrator setup. Storage is sanitized on mount (a fresh
//! install must not inherit state from a prior session) and again after a
//! successful setup call, with a verified purge of the session-token key
//! before the login redirect.

use crate::{
    components::{Alert, AlertKind, Button, Spinner},
    features::{
        auth::validate::{normalize_email, valid_email, validate_password_pair},
        nav::{LOGIN_AFTER_SETUP, verification_route},
        setup::{
            client,
            types::{
                SetupOutcome, SetupPhase, SetupRequest, classify_setup_response,
                phase_for_outcome,
            },
        },
    },
};
use crate::app_lib::storage::{SENSITIVE_KEYS, browser_sanitizer};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::hooks::use_navigate;

#[derive(Clone)]
/// Captures the credential draft for the async action without borrowing signals.
struct SetupInput {
    email: String,
    password: String,
    confirm: String,
}

/// Renders the setup form and drives the first-run bootstrap flow.
#[component]
pub fn SetupPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (phase, set_phase) = signal(SetupPhase::Idle);
    let (validation_error, set_validation_error) = signal::<Option<String>>(None);
    let navigate = use_navigate();

    // Simulate a fresh install: nothing from a prior session may leak into
    // the administrator account being provisioned.
    Effect::new(move |_| {
        if let Some(sanitizer) = browser_sanitizer() {
            sanitizer.clear_all();
        }
    });

    // Indeterminate status (network failure) renders the form anyway; a
    // transient outage must not block first-run setup.
    let already_complete = LocalResource::new(|| async { client::setup_complete() });

    let submit_action = Action::new_local(move |input: &SetupInput| {
        let input = input.clone();
        async move {
            let request = SetupRequest {
                email: input.email,
                password: input.password,
                confirm_password: input.confirm,
            };
            client::submit_setup(&request).await
        }
    });

    Effect::new(move |_| {
        let Some(result) = submit_action.value().get() else {
            return;
        };

        // The credential draft is dropped on every terminal outcome.
        set_password.set(String::new());
        set_confirm_password.set(String::new());

        match result {
            Ok(response) => {
                let outcome = classify_setup_response(&response);
                set_phase.set(phase_for_outcome(&outcome));
                match outcome {
                    SetupOutcome::TokenIssued => {
                        // No session token may survive setup; clear, then
                        // verify the sensitive key is really gone.
                        if let Some(sanitizer) = browser_sanitizer() {
                            sanitizer.clear_all();
                            sanitizer.purge_sensitive_keys(SENSITIVE_KEYS);
                        }
                        navigate(LOGIN_AFTER_SETUP, Default::default());
                    }
                    SetupOutcome::VerificationRequired {
                        email: user_email,
                        user_id,
                    } => {
                        let fallback = normalize_email(&email.get_untracked());
                        let target = verification_route(
                            user_email
                                .as_deref()
                                .filter(|value| !value.is_empty())
                                .or(Some(fallback.as_str())),
                            user_id.as_deref(),
                        );
                        navigate(&target, Default::default());
                    }
                    SetupOutcome::Rejected(_) => {}
                }
            }
            Err(err) => set_phase.set(SetupPhase::Failed(err.user_message())),
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if submit_action.pending().get_untracked() {
            return;
        }
        set_validation_error.set(None);

        let email_value = normalize_email(&email.get_untracked());
        let password_value = password.get_untracked();
        let confirm_value = confirm_password.get_untracked();

        if email_value.is_empty() || password_value.is_empty() || confirm_value.is_empty() {
            set_validation_error.set(Some(
                "Email and both password fields are required.".to_string(),
            ));
            return;
        }
        if !valid_email(&email_value) {
            set_validation_error.set(Some("Email address looks invalid.".to_string()));
            return;
        }
        if let Err(err) = validate_password_pair(&password_value, &confirm_value) {
            set_validation_error.set(Some(err.user_message()));
            return;
        }

        set_phase.set(SetupPhase::Submitting);
        submit_action.dispatch(SetupInput {
            email: email_value,
            password: password_value,
            confirm: confirm_value,
        });
    };

    view! {
        <div class="min-h-[70vh] flex items-center justify-center px-6 py-10">
            <form
                class="w-full max-w-md rounded-2xl border border-slate-200 bg-white/90 p-6 shadow-[0_20px_60px_-40px_rgba(15,23,42,0.35)] backdrop-blur sm:p-8"
                on:submit=on_submit
            >
                <div class="space-y-2">
                    <p class="text-[11px] font-semibold uppercase tracking-[0.2em] text-slate-400">
                        "First-run setup"
                    </p>
                    <h1 class="text-2xl font-semibold text-slate-900">
                        "Create the administrator account"
                    </h1>
                    <p class="text-sm text-slate-500">
                        "This account owns the vault. You will sign in with it afterwards."
                    </p>
                </div>

                {move || {
                    (already_complete.get() == Some(true)).then_some(view! {
                        <div class="mt-4">
                            <Alert
                                kind=AlertKind::Info
                                message="This vault is already set up. Sign in instead.".to_string()
                            />
                        </div>
                    })
                }}

                <div class="mt-6 space-y-4">
                    <div>
                        <label class="block mb-2 text-sm font-medium text-slate-700" for="email">
                            "Email"
                        </label>
                        <input
                            id="email"
                            type="email"
                            autofocus
                            class="w-full rounded-xl border border-slate-200 bg-slate-50 px-3 py-2.5 text-sm text-slate-900 focus:border-slate-400 focus:ring-2 focus:ring-slate-200"
                            autocomplete="email"
                            inputmode="email"
                            placeholder="admin@vault.example"
                            required
                            on:input=move |event| set_email.set(event_target_value(&event))
                        />
                    </div>
                    <div>
                        <label class="block mb-2 text-sm font-medium text-slate-700" for="password">
                            "Master password"
                        </label>
                        <input
                            id="password"
                            type="password"
                            class="w-full rounded-xl border border-slate-200 bg-slate-50 px-3 py-2.5 text-sm text-slate-900 focus:border-slate-400 focus:ring-2 focus:ring-slate-200"
                            autocomplete="new-password"
                            required
                            prop:value=password
                            on:input=move |event| set_password.set(event_target_value(&event))
                        />
                    </div>
                    <div>
                        <label
                            class="block mb-2 text-sm font-medium text-slate-700"
                            for="confirm_password"
                        >
                            "Confirm master password"
                        </label>
                        <input
                            id="confirm_password"
                            type="password"
                            class="w-full rounded-xl border border-slate-200 bg-slate-50 px-3 py-2.5 text-sm text-slate-900 focus:border-slate-400 focus:ring-2 focus:ring-slate-200"
                            autocomplete="new-password"
                            required
                            prop:value=confirm_password
                            on:input=move |event| {
                                set_confirm_password.set(event_target_value(&event));
                            }
                        />
                    </div>

                    <Button button_type="submit" disabled=submit_action.pending()>
                        "Create administrator account"
                    </Button>
                </div>

                {move || {
                    submit_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="mt-4"><Spinner /></div> })
                }}
                {move || {
                    validation_error.get().map(|message| view! {
                        <div class="mt-4">
                            <Alert kind=AlertKind::Error message=message />
                        </div>
                    })
                }}
                {move || match phase.get() {
                    SetupPhase::Failed(message) => Some(view! {
                        <div class="mt-4">
                            <Alert kind=AlertKind::Error message=message />
                        </div>
                    }),
                    _ => None,
                }}
            </form>
        </div>
    }
}
