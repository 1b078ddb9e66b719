//! Invitation acceptance route. Two phases: fetch the invitation by its
//! opaque token (any failure renders the not-found state, no form), then
//! accept with a password. After acceptance a confirmation is shown briefly
//! before navigating to the verification view.

use crate::{
    app_lib::AppError,
    components::{Alert, AlertKind, Button, Spinner},
    features::{
        auth::validate::validate_password_pair,
        invitations::{client, types::Invitation},
        nav::verification_route,
    },
};
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;

/// Delay before leaving the confirmation message. UX affordance only.
const ACCEPT_REDIRECT_DELAY_MS: u32 = 2_000;

#[derive(Params, PartialEq, Clone)]
struct InviteParams {
    token: Option<String>,
}

#[derive(Clone)]
struct AcceptInput {
    token: String,
    password: String,
}

/// Renders the invitation acceptance flow.
#[component]
pub fn InvitePage() -> impl IntoView {
    let params = use_params::<InviteParams>();
    let token = Signal::derive(move || {
        params.with(|params| {
            params
                .as_ref()
                .ok()
                .and_then(|params| params.token.clone())
                .unwrap_or_default()
        })
    });

    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (accepted, set_accepted) = signal(false);
    let navigate = use_navigate();

    let invitation = LocalResource::new(move || {
        let token = token.get();
        async move {
            if token.is_empty() {
                return Err(AppError::Http {
                    status: 404,
                    message: "Invitation not found.".to_string(),
                });
            }
            client::fetch_invitation(&token).await
        }
    });

    let accept_action = Action::new_local(move |input: &AcceptInput| {
        let input = input.clone();
        async move { client::accept_invitation(&input.token, input.password).await }
    });

    Effect::new(move |_| {
        if let Some(result) = accept_action.value().get() {
            // The credential draft is dropped on every terminal outcome.
            set_password.set(String::new());
            set_confirm_password.set(String::new());

            match result {
                Ok(response) => {
                    set_accepted.set(true);
                    let navigate = navigate.clone();
                    spawn_local(async move {
                        // Give the user time to read the confirmation.
                        TimeoutFuture::new(ACCEPT_REDIRECT_DELAY_MS).await;
                        let target = verification_route(
                            Some(&response.user.email),
                            Some(&response.user.id),
                        );
                        navigate(&target, Default::default());
                    });
                }
                Err(err) => set_error.set(Some(err.user_message())),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if accept_action.pending().get_untracked() || accepted.get_untracked() {
            return;
        }
        set_error.set(None);

        let password_value = password.get_untracked();
        let confirm_value = confirm_password.get_untracked();

        if password_value.is_empty() || confirm_value.is_empty() {
            set_error.set(Some("Both password fields are required.".to_string()));
            return;
        }
        if let Err(err) = validate_password_pair(&password_value, &confirm_value) {
            set_error.set(Some(err.user_message()));
            return;
        }

        accept_action.dispatch(AcceptInput {
            token: token.get_untracked(),
            password: password_value,
        });
    };

    view! {
        <div class="min-h-[70vh] flex items-center justify-center px-6 py-10">
            <div class="w-full max-w-md rounded-2xl border border-slate-200 bg-white/90 p-6 shadow-[0_20px_60px_-40px_rgba(15,23,42,0.35)] backdrop-blur sm:p-8">
                {move || match invitation.get() {
                    None => view! { <Spinner /> }.into_any(),
                    Some(Err(err)) => view! {
                        <div class="space-y-4">
                            <h1 class="text-2xl font-semibold text-slate-900">
                                "Invitation unavailable"
                            </h1>
                            <Alert kind=AlertKind::Error message=err.user_message() />
                        </div>
                    }
                    .into_any(),
                    Some(Ok(invitation)) => render_accept_form(
                        invitation,
                        password,
                        confirm_password,
                        set_password,
                        set_confirm_password,
                        on_submit,
                        accept_action.pending().into(),
                        accepted,
                        error,
                    )
                    .into_any(),
                }}
            </div>
        </div>
    }
}

#[allow(clippy::too_many_arguments)]
fn render_accept_form(
    invitation: Invitation,
    password: ReadSignal<String>,
    confirm_password: ReadSignal<String>,
    set_password: WriteSignal<String>,
    set_confirm_password: WriteSignal<String>,
    on_submit: impl Fn(SubmitEvent) + Copy + Send + 'static,
    pending: Signal<bool>,
    accepted: ReadSignal<bool>,
    error: ReadSignal<Option<String>>,
) -> impl IntoView {
    let heading = invitation
        .vaultspace_name
        .clone()
        .map_or("You have been invited".to_string(), |name| {
            format!("Join {name}")
        });
    let detail = match &invitation.invited_by {
        Some(inviter) => format!("{inviter} invited {} to this vault.", invitation.email),
        None => format!("This invitation was issued for {}.", invitation.email),
    };

    view! {
        <form class="space-y-4" on:submit=on_submit>
            <div class="space-y-2">
                <p class="text-[11px] font-semibold uppercase tracking-[0.2em] text-slate-400">
                    "Invitation"
                </p>
                <h1 class="text-2xl font-semibold text-slate-900">{heading}</h1>
                <p class="text-sm text-slate-500">{detail}</p>
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
                    on:input=move |event| set_confirm_password.set(event_target_value(&event))
                />
            </div>

            <Button button_type="submit" disabled=Signal::derive(move || {
                pending.get() || accepted.get()
            })>
                "Accept invitation"
            </Button>

            {move || {
                pending
                    .get()
                    .then_some(view! { <div class="mt-2"><Spinner /></div> })
            }}
            {move || {
                accepted.get().then_some(view! {
                    <Alert
                        kind=AlertKind::Success
                        message="Invitation accepted. Check your email to verify your account."
                            .to_string()
                    />
                })
            }}
            {move || {
                error.get().map(|message| view! {
                    <Alert kind=AlertKind::Error message=message />
                })
            }}
        </form>
    }
}
