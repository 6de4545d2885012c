// ── Runtime console configuration ──
//
// Describes how to reach the admin API. Carries the session token and
// transport tuning but never touches disk: the CLI builds a
// `ConsoleConfig` from its profile and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::form::SubmitPolicy;

/// Configuration for one admin API.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// API base URL (e.g. `https://api.example.com/api`).
    pub api_url: Url,
    /// Bearer token to seed the session with. `None` sends requests
    /// unauthenticated.
    pub token: Option<SecretString>,
    /// Request timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
    /// How form sessions close after submit.
    pub submit_policy: SubmitPolicy,
}

impl ConsoleConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            token: None,
            timeout: None,
            submit_policy: SubmitPolicy::default(),
        }
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }
}
