//! First-run entry point. Forwards to `/setup` until an administrator account
//! exists, then to `/login`.

use crate::components::Spinner;
use crate::features::setup::client;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn HomePage() -> impl IntoView {
    let navigate = use_navigate();
    let status = LocalResource::new(|| async { client::setup_complete() });

    Effect::new(move |_| {
        if let Some(complete) = status.get() {
            let target = if complete { "/login" } else { "/setup" };
            navigate(target, Default::default());
        }
    });

    view! {
        <div class="min-h-[70vh] flex items-center justify-center">
            <Spinner />
        </div>
    }
}
