mod home;
mod invite;
mod login;
mod not_found;
mod setup;
mod signup;
mod verify_email;

pub(crate) use home::HomePage;
pub(crate) use invite::InvitePage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use setup::SetupPage;
pub(crate) use signup::SignUpPage;
pub(crate) use verify_email::VerifyEmailPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=HomePage />
            <Route path=path!("/setup") view=SetupPage />
            <Route path=path!("/signup") view=SignUpPage />
            <Route path=path!("/invite/:token") view=InvitePage />
            <Route path=path!("/verify-email") view=VerifyEmailPage />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}
