//! Verification prompt shown after setup, signup, or invitation acceptance.
//! Carries the email (and user id when known) in the query string and offers
//! a resend action.

use crate::components::{Alert, AlertKind, Button, Spinner};
use crate::features::auth::client;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

#[derive(Clone, Debug, PartialEq)]
enum ResendStatus {
    Idle,
    Success,
    Error(String),
}

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let query = use_query_map();
    let email = Signal::derive(move || query.with(|query| query.get("email")));
    let (resend_status, set_resend_status) = signal(ResendStatus::Idle);

    let resend_action = Action::new_local(move |email: &String| {
        let email = email.clone();
        async move { client::resend_verification(&email).await }
    });

    Effect::new(move |_| {
        if let Some(result) = resend_action.value().get() {
            match result {
                Ok(()) => set_resend_status.set(ResendStatus::Success),
                Err(err) => set_resend_status.set(ResendStatus::Error(err.user_message())),
            }
        }
    });

    let on_resend_click = Callback::new(move |_| {
        let Some(email_value) = email.get_untracked() else {
            set_resend_status.set(ResendStatus::Error(
                "Email is required to resend verification.".to_string(),
            ));
            return;
        };
        set_resend_status.set(ResendStatus::Idle);
        resend_action.dispatch(email_value);
    });

    view! {
        <div class="min-h-[70vh] flex items-center justify-center px-6 py-10">
            <div class="w-full max-w-md rounded-2xl border border-slate-200 bg-white/90 p-6 shadow-[0_20px_60px_-40px_rgba(15,23,42,0.35)] backdrop-blur sm:p-8">
                <h1 class="text-2xl font-semibold text-slate-900">
                    "Verify your email"
                </h1>
                <p class="mt-2 text-sm text-slate-500">
                    {move || match email.get() {
                        Some(email) => format!("We sent a verification link to {email}."),
                        None => "We sent a verification link to your email address.".to_string(),
                    }}
                </p>
                <p class="mt-1 text-sm text-slate-500">
                    "Follow the link to activate your account, then sign in."
                </p>

                <div class="mt-6">
                    <Button
                        button_type="button"
                        disabled=resend_action.pending()
                        on_click=on_resend_click
                    >
                        "Resend verification"
                    </Button>
                </div>
                {move || {
                    resend_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="mt-4"><Spinner /></div> })
                }}
                {move || match resend_status.get() {
                    ResendStatus::Idle => None,
                    ResendStatus::Success => Some(view! {
                        <div class="mt-4">
                            <Alert
                                kind=AlertKind::Success
                                message="If that email exists, a new link is on the way."
                                    .to_string()
                            />
                        </div>
                    }
                    .into_any()),
                    ResendStatus::Error(message) => Some(view! {
                        <div class="mt-4">
                            <Alert kind=AlertKind::Error message=message />
                        </div>
                    }
                    .into_any()),
                }}
            </div>
        </div>
    }
}
