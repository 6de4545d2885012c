// ── Admin console facade ──
//
// Owns the HTTP client, the cookie-backed session, and the shared notice
// channel, and hands out one store or screen per entity.

use std::sync::Arc;

use reqwest::cookie::Jar;
use secrecy::SecretString;
use tokio::sync::broadcast;
use tracing::debug;

use realty_api::{ApiClient, CookieSession, TransportConfig};

use crate::config::ConsoleConfig;
use crate::error::CoreError;
use crate::filter::Filterable;
use crate::form::SubmitPolicy;
use crate::model::{ContentPage, Draft, Job, LocalResource, SiteSettings, StatisticsBoard};
use crate::screen::ResourceScreen;
use crate::store::{
    ConfigBlobStore, LocalBackend, LocalBlobBackend, Notice, Notifier, OptimisticCollectionStore,
    RemoteBlob,
};

/// Entry point for every admin screen.
#[derive(Clone)]
pub struct Console {
    api: ApiClient,
    session: CookieSession,
    notifier: Notifier,
    submit_policy: SubmitPolicy,
}

impl Console {
    pub fn new(config: &ConsoleConfig) -> Result<Self, CoreError> {
        let jar = Arc::new(Jar::default());
        let session = CookieSession::new(Arc::clone(&jar), config.api_url.clone());
        if let Some(ref token) = config.token {
            session.set_token(token);
        }

        let mut transport = TransportConfig::default().with_cookie_jar(jar);
        if let Some(timeout) = config.timeout {
            transport = transport.with_timeout(timeout);
        }
        let api = ApiClient::new(config.api_url.as_str(), Arc::new(session.clone()), &transport)?;
        debug!(api_url = %config.api_url, "console ready");

        Ok(Self {
            api,
            session,
            notifier: Notifier::default(),
            submit_policy: config.submit_policy,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Store a new token (login).
    pub fn sign_in(&self, token: &SecretString) {
        self.session.set_token(token);
    }

    /// Drop the token (logout). Later requests go out unauthenticated.
    pub fn sign_out(&self) {
        self.session.clear();
    }

    /// Outcome notices from every store created by this console.
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notifier.subscribe()
    }

    // ── Remote collections ───────────────────────────────────────────

    pub fn store<T: Draft>(&self) -> OptimisticCollectionStore<T> {
        OptimisticCollectionStore::with_notifier(self.api.resource(), self.notifier.clone())
    }

    pub fn screen<T: Draft + Filterable>(&self) -> ResourceScreen<T> {
        ResourceScreen::new(Arc::new(self.store()), self.submit_policy)
    }

    pub fn statistics(&self) -> ConfigBlobStore<StatisticsBoard> {
        ConfigBlobStore::with_notifier(RemoteBlob::new(self.api.clone()), self.notifier.clone())
    }

    // ── Local-only screens ───────────────────────────────────────────

    pub fn local_screen<T: Draft + LocalResource + Filterable>(
        &self,
        seed: impl IntoIterator<Item = T>,
    ) -> ResourceScreen<T, LocalBackend<T>> {
        let store = OptimisticCollectionStore::with_notifier(
            LocalBackend::with_items(seed),
            self.notifier.clone(),
        );
        ResourceScreen::new(Arc::new(store), self.submit_policy)
    }

    pub fn careers(&self) -> ResourceScreen<Job, LocalBackend<Job>> {
        self.local_screen(std::iter::empty())
    }

    pub fn content_pages(&self) -> ResourceScreen<ContentPage, LocalBackend<ContentPage>> {
        self.local_screen(std::iter::empty())
    }

    pub fn site_settings(&self) -> ConfigBlobStore<SiteSettings, LocalBlobBackend<SiteSettings>> {
        ConfigBlobStore::with_notifier(LocalBlobBackend::new(), self.notifier.clone())
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("api", &self.api)
            .field("submit_policy", &self.submit_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use realty_api::SessionTokenSource;
    use secrecy::ExposeSecret;

    fn console(token: Option<&str>) -> Console {
        let mut config = ConsoleConfig::new("https://api.example.com/api".parse().unwrap());
        config.token = token.map(|t| SecretString::from(t.to_owned()));
        Console::new(&config).unwrap()
    }

    #[test]
    fn seeds_session_from_config() {
        let c = console(Some("abc"));
        assert_eq!(c.session.token().unwrap().expose_secret(), "abc");
        c.sign_out();
        assert!(c.session.token().is_none());
        c.sign_in(&SecretString::from("next".to_owned()));
        assert_eq!(c.session.token().unwrap().expose_secret(), "next");
    }

    #[tokio::test]
    async fn local_screens_share_the_notice_channel() {
        let c = console(None);
        let mut notices = c.notices();
        let mut careers = c.careers();
        let draft = careers.form_mut().begin_add().unwrap();
        draft.title = "Agent".into();
        draft.description = "Sell.".into();
        careers.submit().await.unwrap();
        assert!(notices.recv().await.unwrap().is_success());
    }
}
