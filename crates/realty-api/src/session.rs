// ── Session token sources ──
//
// The bearer token is minted elsewhere (login) and parked in a cookie
// named `token`. Sources are read on every request and never cache, so
// a login or logout between two calls is always observed.

use std::fmt;
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Name of the cookie holding the bearer token.
pub const TOKEN_COOKIE: &str = "token";

/// Yields the current bearer token, if any.
///
/// Absence is a valid outcome, not an error: requests then go out
/// without an `Authorization` header and the backend decides.
pub trait SessionTokenSource: Send + Sync + fmt::Debug {
    fn token(&self) -> Option<SecretString>;
}

// ── Cookie-backed session ────────────────────────────────────────────

/// Reads the `token` cookie from a shared cookie jar scoped to the API URL.
#[derive(Clone)]
pub struct CookieSession {
    jar: Arc<Jar>,
    url: Url,
}

impl CookieSession {
    pub fn new(jar: Arc<Jar>, url: Url) -> Self {
        Self { jar, url }
    }

    /// The jar backing this session, for sharing with the HTTP transport.
    pub fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    /// Store a freshly minted token (login).
    pub fn set_token(&self, token: &SecretString) {
        let cookie = format!("{TOKEN_COOKIE}={}; Path=/", token.expose_secret());
        self.jar.add_cookie_str(&cookie, &self.url);
    }

    /// Expire the token cookie (logout).
    pub fn clear(&self) {
        let cookie = format!("{TOKEN_COOKIE}=; Path=/; Max-Age=0");
        self.jar.add_cookie_str(&cookie, &self.url);
    }
}

impl SessionTokenSource for CookieSession {
    fn token(&self) -> Option<SecretString> {
        let header = self.jar.cookies(&self.url)?;
        let raw = header.to_str().ok()?;
        token_from_cookie_header(raw).map(|t| SecretString::from(t.to_owned()))
    }
}

impl fmt::Debug for CookieSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieSession")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

/// Extract the `token` value from a `Cookie:` header line (`a=1; token=xyz`).
pub(crate) fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(TOKEN_COOKIE)?.strip_prefix('='))
        .filter(|value| !value.is_empty())
}

// ── Static session ───────────────────────────────────────────────────

/// A fixed token (or none). Used by one-shot CLI invocations and tests.
#[derive(Clone, Default)]
pub struct StaticToken(Option<SecretString>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(SecretString::from(token.into())))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl From<Option<SecretString>> for StaticToken {
    fn from(token: Option<SecretString>) -> Self {
        Self(token)
    }
}

impl SessionTokenSource for StaticToken {
    fn token(&self) -> Option<SecretString> {
        self.0.clone()
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StaticToken")
            .field(&self.0.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
