pub(crate) mod auth;
pub(crate) mod invitations;
pub(crate) mod nav;
pub(crate) mod setup;
