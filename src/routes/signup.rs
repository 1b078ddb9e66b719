//! Registration route. Validates credentials locally, probes the email domain
//! for an SSO requirement while the user types, and enrolls the personal
//! vaultspace key after signup. Navigation only happens once the wrapped key
//! is persisted remotely.

use crate::{
    app_lib::AppError,
    components::{Alert, AlertKind, Button, Spinner},
    features::{
        auth::{
            client,
            keys::{self, KEY_ENROLLMENT_ERROR},
            session::store_session_token,
            sso::{SsoProbe, email_domain, sso_button_label},
            types::{SignupRequest, SsoProvider},
            validate::{normalize_email, valid_email, validate_registration_password},
        },
        nav::verification_route,
    },
};
use crate::app_lib::storage::local_store;
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::hooks::use_navigate;

#[derive(Clone)]
/// Captures signup form input for the async action without borrowing signals.
struct SignupInput {
    email: String,
    password: String,
}

#[derive(Clone)]
enum SignupDone {
    Verify {
        email: Option<String>,
        user_id: Option<String>,
    },
    Enrolled,
}

/// Renders the signup form and drives registration plus key enrollment.
#[component]
pub fn SignUpPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (sso_provider, set_sso_provider) = signal::<Option<SsoProvider>>(None);
    let probe = SsoProbe::new();
    let navigate = use_navigate();

    let signup_action = Action::new_local(move |input: &SignupInput| {
        let input = input.clone();
        async move {
            let request = SignupRequest {
                email: input.email,
                password: input.password.clone(),
            };
            let response = client::signup(&request).await?;

            if response.email_verification_required {
                let (user_email, user_id) = response
                    .user
                    .map_or((None, None), |user| (Some(user.email), Some(user.id)));
                return Ok(SignupDone::Verify {
                    email: user_email,
                    user_id,
                });
            }

            let user = response
                .user
                .ok_or_else(|| AppError::Parse("Signup response was incomplete.".to_string()))?;
            let vaultspace = response
                .personal_vaultspace
                .ok_or_else(|| AppError::Parse("Signup response was incomplete.".to_string()))?;

            // Key enrollment is all-or-nothing; any failure surfaces as one
            // generic error and the user stays on the form.
            let master = keys::derive_master_key(&input.password, &user.master_key_salt)
                .map_err(|_| AppError::Config(KEY_ENROLLMENT_ERROR.to_string()))?;
            let vault_key = keys::generate_vaultspace_key();
            let wrapped = keys::wrap_vaultspace_key(&master, &vault_key)
                .map_err(|_| AppError::Config(KEY_ENROLLMENT_ERROR.to_string()))?;
            client::upload_wrapped_key(&vaultspace.id, wrapped)
                .await
                .map_err(|_| AppError::Config(KEY_ENROLLMENT_ERROR.to_string()))?;

            if let Some(token) = response.token {
                if let Some(store) = local_store() {
                    store_session_token(&store, &token);
                }
            }
            Ok(SignupDone::Enrolled)
        }
    });

    let sso_action = Action::new_local(move |domain: &String| {
        let domain = domain.clone();
        async move {
            let response = client::sso_login_url(&domain).await?;
            Ok::<String, AppError>(response.url)
        }
    });

    Effect::new(move |_| {
        if let Some(result) = signup_action.value().get() {
            // The credential draft is dropped on every terminal outcome.
            set_password.set(String::new());
            set_confirm_password.set(String::new());

            match result {
                Ok(SignupDone::Verify {
                    email: user_email,
                    user_id,
                }) => {
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
                Ok(SignupDone::Enrolled) => navigate("/login", Default::default()),
                Err(err) => set_error.set(Some(err.user_message())),
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = sso_action.value().get() {
            match result {
                Ok(url) => redirect_to(&url),
                Err(err) => set_error.set(Some(err.user_message())),
            }
        }
    });

    let on_email_input = move |event: leptos::ev::Event| {
        let value = event_target_value(&event);
        set_email.set(value.clone());
        probe.schedule(value, set_sso_provider);
    };

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if signup_action.pending().get_untracked() {
            return;
        }
        set_error.set(None);

        let email_value = normalize_email(&email.get_untracked());
        let password_value = password.get_untracked();
        let confirm_value = confirm_password.get_untracked();

        if email_value.is_empty() || password_value.is_empty() || confirm_value.is_empty() {
            set_error.set(Some(
                "Email and both password fields are required.".to_string(),
            ));
            return;
        }
        if !valid_email(&email_value) {
            set_error.set(Some("Email address looks invalid.".to_string()));
            return;
        }
        if let Err(err) = validate_registration_password(&password_value, &confirm_value) {
            set_error.set(Some(err.user_message()));
            return;
        }

        signup_action.dispatch(SignupInput {
            email: email_value,
            password: password_value,
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
                        "Create account"
                    </p>
                    <h1 class="text-2xl font-semibold text-slate-900">
                        "Create your vault account"
                    </h1>
                    <p class="text-sm text-slate-500">
                        "Your master password never leaves this browser unprotected."
                    </p>
                </div>

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
                            placeholder="name@inbox.im"
                            required
                            on:input=on_email_input
                        />
                    </div>

                    {move || match sso_provider.get() {
                        Some(provider) => {
                            let label = sso_button_label(&provider);
                            view! {
                                <div class="space-y-4">
                                    <Alert
                                        kind=AlertKind::Info
                                        message=format!(
                                            "Your organization uses {} for sign-in.",
                                            provider.name,
                                        )
                                    />
                                    <Button
                                        button_type="button"
                                        disabled=sso_action.pending()
                                        on_click=Callback::new(move |_| {
                                            if let Some(domain) =
                                                email_domain(&email.get_untracked())
                                            {
                                                sso_action.dispatch(domain);
                                            }
                                        })
                                    >
                                        {label}
                                    </Button>
                                </div>
                            }
                            .into_any()
                        }
                        None => view! {
                            <div class="space-y-4">
                                <div>
                                    <label
                                        class="block mb-2 text-sm font-medium text-slate-700"
                                        for="password"
                                    >
                                        "Master password"
                                    </label>
                                    <input
                                        id="password"
                                        type="password"
                                        class="w-full rounded-xl border border-slate-200 bg-slate-50 px-3 py-2.5 text-sm text-slate-900 focus:border-slate-400 focus:ring-2 focus:ring-slate-200"
                                        autocomplete="new-password"
                                        required
                                        prop:value=password
                                        on:input=move |event| {
                                            set_password.set(event_target_value(&event));
                                        }
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

                                <Button button_type="submit" disabled=signup_action.pending()>
                                    "Create account"
                                </Button>
                            </div>
                        }
                        .into_any(),
                    }}
                </div>

                {move || {
                    signup_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="mt-4"><Spinner /></div> })
                }}
                {move || {
                    error.get().map(|message| view! {
                        <div class="mt-4">
                            <Alert kind=AlertKind::Error message=message />
                        </div>
                    })
                }}
            </form>
        </div>
    }
}

fn redirect_to(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}
