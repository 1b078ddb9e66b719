//! Shared frontend utilities: API access, configuration, errors, browser
//! storage, and build metadata.
//!
//! ## Onboarding flows owned by this crate
//!
//! 1. **First-run setup:** `/setup` provisions the administrator account. The
//!    storage sanitizer runs on mount and again after a successful setup call
//!    so no stale session token can leak into the freshly provisioned account.
//! 2. **Registration:** `/signup` validates credentials locally, probes the
//!    email domain for an SSO requirement, and enrolls the vaultspace key
//!    after signup.
//! 3. **Invitation acceptance:** `/invite/:token` fetches invitation metadata
//!    and accepts with a password.
//!
//! Centralizing these helpers keeps network and storage behavior consistent
//! across routes. Callers must avoid logging credentials or tokens.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub(crate) mod build_info;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod storage;

#[cfg(target_arch = "wasm32")]
pub(crate) use api::{get_json, post_json, post_json_response, put_json};
pub(crate) use errors::AppError;
