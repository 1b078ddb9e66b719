#[cfg(target_arch = "wasm32")]
pub(crate) mod client;
pub(crate) mod keys;
pub(crate) mod session;
pub(crate) mod sso;
pub(crate) mod types;
pub(crate) mod validate;
