//! Browser storage capabilities and the setup-flow storage sanitizer.
//!
//! Persistent state is reached through the `KeyValueStore` and `CookieSurface`
//! traits so routes never touch `web_sys` directly and tests can run against
//! in-memory fakes. Sanitization is best-effort defense in depth: every
//! storage failure here is swallowed, never surfaced to the user.

use std::cell::RefCell;
use std::collections::BTreeMap;

/// Storage key holding the session token in authenticated flows.
/// Must be absent after a completed first-run setup.
pub const SESSION_TOKEN_KEY: &str = "cofre_session_token";

/// Keys that must never survive a setup flow.
pub const SENSITIVE_KEYS: &[&str] = &[SESSION_TOKEN_KEY];

/// Raised when a value cannot be written (quota, private browsing).
/// Callers in the sanitization path ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageUnavailable;

/// Key-value storage capability over `localStorage`/`sessionStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageUnavailable>;
    fn remove(&self, key: &str);
    fn clear(&self);
    fn keys(&self) -> Vec<String>;
}

/// Read/write surface over `document.cookie`.
pub trait CookieSurface {
    /// The `document.cookie` string: `name=value; other=value`.
    fn snapshot(&self) -> String;
    /// Writes a single cookie string, including attributes.
    fn write(&self, cookie: &str);
    /// Hostname used when expiring domain-scoped cookies.
    fn host(&self) -> Option<String>;
}

/// In-memory store used in tests and on non-browser targets.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageUnavailable> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

/// In-memory cookie jar that honors `Max-Age=0` deletions, so sanitizer tests
/// exercise the same write-to-expire contract the browser enforces.
#[derive(Default)]
pub struct MemoryCookies {
    cookies: RefCell<BTreeMap<String, String>>,
    host: Option<String>,
}

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(host: &str) -> Self {
        Self {
            cookies: RefCell::new(BTreeMap::new()),
            host: Some(host.to_string()),
        }
    }
}

impl CookieSurface for MemoryCookies {
    fn snapshot(&self) -> String {
        self.cookies
            .borrow()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, cookie: &str) {
        let Some((name, rest)) = cookie.split_once('=') else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let mut parts = rest.split(';');
        let value = parts.next().unwrap_or_default().trim().to_string();
        let expired = parts.any(|attribute| attribute.trim().eq_ignore_ascii_case("Max-Age=0"));
        if expired {
            self.cookies.borrow_mut().remove(name);
        } else {
            self.cookies.borrow_mut().insert(name.to_string(), value);
        }
    }

    fn host(&self) -> Option<String> {
        self.host.clone()
    }
}

/// Cookie names present in a `document.cookie` snapshot.
pub fn cookie_names(snapshot: &str) -> Vec<String> {
    snapshot
        .split(';')
        .filter_map(|pair| {
            let name = pair.split_once('=').map_or(pair, |(name, _)| name).trim();
            if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

/// Expired variants of a cookie across path and domain attribute combinations.
/// Deletion only takes effect when the attributes match the ones used at
/// creation, which this client cannot observe, so every combination the Cofre
/// backends have used is written.
pub fn expired_cookie_strings(name: &str, host: Option<&str>) -> Vec<String> {
    let mut domains = vec![None];
    if let Some(host) = host.map(str::trim).filter(|host| !host.is_empty()) {
        domains.push(Some(host.to_string()));
        domains.push(Some(format!(".{host}")));
    }

    let mut cookies = Vec::new();
    for domain in &domains {
        for path in ["/", ""] {
            let mut cookie = format!("{name}=; Max-Age=0");
            if !path.is_empty() {
                cookie.push_str("; Path=");
                cookie.push_str(path);
            }
            if let Some(domain) = domain {
                cookie.push_str("; Domain=");
                cookie.push_str(domain);
            }
            cookies.push(cookie);
        }
    }
    cookies
}

/// Clears both key-value stores and expires every readable cookie.
pub struct Sanitizer<L, S, C> {
    local: L,
    session: S,
    cookies: C,
}

impl<L, S, C> Sanitizer<L, S, C>
where
    L: KeyValueStore,
    S: KeyValueStore,
    C: CookieSurface,
{
    pub fn new(local: L, session: S, cookies: C) -> Self {
        Self {
            local,
            session,
            cookies,
        }
    }

    /// Removes all persisted entries and expires all cookies. Idempotent, and
    /// never fails: storage errors are swallowed because sanitization is
    /// advisory, not a correctness gate.
    pub fn clear_all(&self) {
        self.local.clear();
        self.session.clear();

        let host = self.cookies.host();
        for name in cookie_names(&self.cookies.snapshot()) {
            for cookie in expired_cookie_strings(&name, host.as_deref()) {
                self.cookies.write(&cookie);
            }
        }
    }

    /// Removes the named keys from both stores and verifies their absence
    /// once, re-clearing a single time if any resurfaced. Returns whether the
    /// stores are clean afterwards.
    pub fn purge_sensitive_keys(&self, keys: &[&str]) -> bool {
        for key in keys {
            self.local.remove(key);
            self.session.remove(key);
        }

        if keys.iter().any(|key| self.contains(key)) {
            self.clear_all();
        }

        keys.iter().all(|key| !self.contains(key))
    }

    fn contains(&self, key: &str) -> bool {
        self.local.get(key).is_some() || self.session.get(key).is_some()
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserSanitizer, browser_sanitizer, local_store};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{CookieSurface, KeyValueStore, Sanitizer, StorageUnavailable};
    use wasm_bindgen::JsCast;
    use web_sys::HtmlDocument;

    /// `web_sys::Storage`-backed store (local or session).
    pub struct BrowserStorage {
        storage: web_sys::Storage,
    }

    impl BrowserStorage {
        pub fn local() -> Option<Self> {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            Some(Self { storage })
        }

        pub fn session() -> Option<Self> {
            let storage = web_sys::window()?.session_storage().ok().flatten()?;
            Some(Self { storage })
        }
    }

    impl KeyValueStore for BrowserStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageUnavailable> {
            self.storage
                .set_item(key, value)
                .map_err(|_| StorageUnavailable)
        }

        fn remove(&self, key: &str) {
            let _ = self.storage.remove_item(key);
        }

        fn clear(&self) {
            let _ = self.storage.clear();
        }

        fn keys(&self) -> Vec<String> {
            let length = self.storage.length().unwrap_or(0);
            (0..length)
                .filter_map(|index| self.storage.key(index).ok().flatten())
                .collect()
        }
    }

    /// `document.cookie`-backed surface.
    pub struct DocumentCookies;

    impl CookieSurface for DocumentCookies {
        fn snapshot(&self) -> String {
            html_document()
                .and_then(|document| document.cookie().ok())
                .unwrap_or_default()
        }

        fn write(&self, cookie: &str) {
            if let Some(document) = html_document() {
                let _ = document.set_cookie(cookie);
            }
        }

        fn host(&self) -> Option<String> {
            web_sys::window()?.location().hostname().ok()
        }
    }

    fn html_document() -> Option<HtmlDocument> {
        web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
    }

    pub type BrowserSanitizer = Sanitizer<BrowserStorage, BrowserStorage, DocumentCookies>;

    /// Sanitizer over the real browser stores. `None` when storage access is
    /// denied entirely (sandboxed frames); callers skip sanitization then.
    pub fn browser_sanitizer() -> Option<BrowserSanitizer> {
        Some(Sanitizer::new(
            BrowserStorage::local()?,
            BrowserStorage::session()?,
            DocumentCookies,
        ))
    }

    /// Local store handle for session-token persistence.
    pub fn local_store() -> Option<BrowserStorage> {
        BrowserStorage::local()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        KeyValueStore, MemoryCookies, MemoryStore, SENSITIVE_KEYS, SESSION_TOKEN_KEY, Sanitizer,
        cookie_names, expired_cookie_strings,
    };
    use super::CookieSurface;

    fn populated_sanitizer() -> Sanitizer<MemoryStore, MemoryStore, MemoryCookies> {
        let local = MemoryStore::new();
        let session = MemoryStore::new();
        let cookies = MemoryCookies::with_host("vault.example.com");

        local.set(SESSION_TOKEN_KEY, "stale-token").unwrap();
        local.set("cofre_theme", "dark").unwrap();
        session.set(SESSION_TOKEN_KEY, "stale-token").unwrap();
        session.set("cofre_nonce", "abc").unwrap();
        cookies.write("cofre_session=stale; Path=/");
        cookies.write("remembered=1; Path=/");

        Sanitizer::new(local, session, cookies)
    }

    #[test]
    fn clear_all_empties_stores_and_cookies() {
        let sanitizer = populated_sanitizer();
        sanitizer.clear_all();

        assert!(sanitizer.local.keys().is_empty());
        assert!(sanitizer.session.keys().is_empty());
        assert_eq!(sanitizer.cookies.snapshot(), "");
    }

    #[test]
    fn clear_all_is_idempotent() {
        let sanitizer = populated_sanitizer();
        sanitizer.clear_all();
        sanitizer.clear_all();

        assert!(sanitizer.local.keys().is_empty());
        assert!(sanitizer.session.keys().is_empty());
        assert_eq!(sanitizer.cookies.snapshot(), "");
    }

    #[test]
    fn clear_all_on_empty_stores_is_a_no_op() {
        let sanitizer = Sanitizer::new(
            MemoryStore::new(),
            MemoryStore::new(),
            MemoryCookies::new(),
        );
        sanitizer.clear_all();
        assert!(sanitizer.local.keys().is_empty());
    }

    #[test]
    fn purge_removes_session_token_from_both_stores() {
        let sanitizer = populated_sanitizer();

        assert!(sanitizer.purge_sensitive_keys(SENSITIVE_KEYS));
        assert_eq!(sanitizer.local.get(SESSION_TOKEN_KEY), None);
        assert_eq!(sanitizer.session.get(SESSION_TOKEN_KEY), None);
        // Non-sensitive entries survive a targeted purge.
        assert_eq!(sanitizer.local.get("cofre_theme"), Some("dark".to_string()));
    }

    #[test]
    fn purge_is_clean_for_arbitrary_prior_states() {
        let cases: &[&[(&str, &str)]] = &[
            &[],
            &[(SESSION_TOKEN_KEY, "token")],
            &[("other", "value")],
            &[(SESSION_TOKEN_KEY, "token"), ("other", "value")],
        ];

        for entries in cases {
            let local = MemoryStore::new();
            for (key, value) in *entries {
                local.set(key, value).unwrap();
            }
            let sanitizer = Sanitizer::new(local, MemoryStore::new(), MemoryCookies::new());

            assert!(sanitizer.purge_sensitive_keys(SENSITIVE_KEYS));
            assert_eq!(sanitizer.local.get(SESSION_TOKEN_KEY), None);
        }
    }

    #[test]
    fn cookie_names_parses_snapshot() {
        assert_eq!(
            cookie_names("a=1; b=2; empty"),
            vec!["a".to_string(), "b".to_string(), "empty".to_string()]
        );
        assert!(cookie_names("").is_empty());
    }

    #[test]
    fn expired_cookie_strings_cover_path_and_domain_combinations() {
        let cookies = expired_cookie_strings("session", Some("vault.example.com"));
        assert_eq!(cookies.len(), 6);
        assert!(cookies.iter().all(|cookie| cookie.contains("Max-Age=0")));
        assert!(cookies.iter().any(|cookie| cookie.contains("Path=/")));
        assert!(
            cookies
                .iter()
                .any(|cookie| cookie.contains("Domain=.vault.example.com"))
        );
        assert!(
            cookies
                .iter()
                .any(|cookie| !cookie.contains("Domain="))
        );
    }

    #[test]
    fn expired_cookie_strings_without_host_skip_domains() {
        let cookies = expired_cookie_strings("session", None);
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|cookie| !cookie.contains("Domain=")));
    }

    #[test]
    fn memory_cookies_honor_max_age_zero() {
        let cookies = MemoryCookies::new();
        cookies.write("session=abc; Path=/");
        assert_eq!(cookies.snapshot(), "session=abc");
        cookies.write("session=; Path=/; Max-Age=0");
        assert_eq!(cookies.snapshot(), "");
    }
}
