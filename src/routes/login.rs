//! Login route. Reads the `setup=done` marker so a post-setup arrival is
//! greeted explicitly, persists the session token on success, and hands off
//! to the vault application with a full page navigation.

use crate::{
    app_lib::{AppError, build_info},
    components::{Alert, AlertKind, Button, Spinner},
    features::{
        auth::{
            client,
            session::{session_token, store_session_token},
            types::LoginRequest,
            validate::{normalize_email, valid_email},
        },
        nav::{SETUP_DONE_MARKER, VAULT_APP_PATH},
    },
};
use crate::app_lib::storage::local_store;
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::hooks::use_query_map;

#[derive(Clone)]
struct LoginInput {
    email: String,
    password: String,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let query = use_query_map();
    let after_setup = Signal::derive(move || {
        query.with(|query| {
            query
                .get("setup")
                .is_some_and(|value| value == SETUP_DONE_MARKER)
        })
    });
    let already_signed_in = local_store()
        .and_then(|store| session_token(&store))
        .is_some();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let login_action = Action::new_local(move |input: &LoginInput| {
        let input = input.clone();
        async move {
            let request = LoginRequest {
                email: input.email,
                password: input.password,
            };
            let response = client::login(&request).await?;
            Ok::<String, AppError>(response.token)
        }
    });

    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            set_password.set(String::new());
            match result {
                Ok(token) => {
                    if let Some(store) = local_store() {
                        store_session_token(&store, &token);
                    }
                    redirect_to(VAULT_APP_PATH);
                }
                Err(err) => set_error.set(Some(err.user_message())),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if login_action.pending().get_untracked() {
            return;
        }
        set_error.set(None);

        let email_value = normalize_email(&email.get_untracked());
        let password_value = password.get_untracked();

        if email_value.is_empty() || password_value.is_empty() {
            set_error.set(Some("Email and password are required.".to_string()));
            return;
        }
        if !valid_email(&email_value) {
            set_error.set(Some("Email address looks invalid.".to_string()));
            return;
        }

        login_action.dispatch(LoginInput {
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
                        "Sign in"
                    </p>
                    <h1 class="text-2xl font-semibold text-slate-900">
                        "Unlock your vault"
                    </h1>
                </div>

                {move || {
                    after_setup.get().then_some(view! {
                        <div class="mt-4">
                            <Alert
                                kind=AlertKind::Success
                                message="Setup complete. Sign in with your new administrator account."
                                    .to_string()
                            />
                        </div>
                    })
                }}
                {already_signed_in.then_some(view! {
                    <div class="mt-4">
                        <Alert
                            kind=AlertKind::Info
                            message="You are already signed in.".to_string()
                        />
                    </div>
                })}

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
                            autocomplete="current-password"
                            required
                            prop:value=password
                            on:input=move |event| set_password.set(event_target_value(&event))
                        />
                    </div>

                    <Button button_type="submit" disabled=login_action.pending()>
                        "Sign in"
                    </Button>
                </div>

                {move || {
                    login_action
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

                <p class="mt-6 text-center text-[11px] text-slate-400">
                    {format!("cofre-web {}", build_info::git_commit_hash())}
                </p>
            </form>
        </div>
    }
}

fn redirect_to(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}
