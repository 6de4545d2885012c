// Async HTTP client for the listings admin REST API.
//
// Auth: `Authorization: Bearer <token>` when the session yields a token.
// Retries: none. A failed call is surfaced once and the caller decides.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::envelope::{self, Echo};
use crate::resource::{CreateBody, Operation, Resource};
use crate::session::SessionTokenSource;
use crate::transport::TransportConfig;
use crate::Error;

// ── Multipart payloads ───────────────────────────────────────────────

/// A file attached to a multipart create.
#[derive(Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Bytes,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Opaque multipart body: scalar text fields plus at most one file.
#[derive(Debug, Clone, Default)]
pub struct MultipartPayload {
    fields: Vec<(String, String)>,
    file: Option<FilePart>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.file = Some(part);
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn file_part(&self) -> Option<&FilePart> {
        self.file.as_ref()
    }

    pub fn into_form(self) -> Result<Form, Error> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        if let Some(file) = self.file {
            let mut part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name);
            if let Some(mime) = file.mime {
                part = part
                    .mime_str(&mime)
                    .map_err(|e| Error::Encoding(format!("invalid mime type {mime:?}: {e}")))?;
            }
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

// ── Untyped client ───────────────────────────────────────────────────

struct Inner {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionTokenSource>,
}

/// Shared, cheaply cloneable HTTP client bound to one API base URL.
///
/// The session is injected rather than read from a global, so tests can
/// hand in a `StaticToken` and the CLI a cookie-backed session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    pub fn new(
        base_url: &str,
        session: Arc<dyn SessionTokenSource>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, session)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        session: Arc<dyn SessionTokenSource>,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url,
                session,
            }),
        })
    }

    /// Ensure the base path ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Typed handle for one resource.
    pub fn resource<T: Resource>(&self) -> ResourceClient<T> {
        ResourceClient::new(self.clone())
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        let Some(token) = self.inner.session.token() else {
            return Ok(req);
        };
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Encoding(format!("invalid bearer token header value: {e}")))?;
        value.set_sensitive(true);
        Ok(req.header(AUTHORIZATION, value))
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={query:?}");

        let req = self.inner.http.get(url).query(query);
        self.send(req).await
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, Error> {
        let body = self.get_text(path, &[]).await?;
        decode(body)
    }

    pub async fn post_json<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let req = self.inner.http.post(url).json(body);
        self.send(req).await
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<String, Error> {
        let url = self.url(path)?;
        debug!("POST {url} (multipart)");

        let req = self.inner.http.post(url).multipart(form);
        self.send(req).await
    }

    pub async fn patch_json<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let req = self.inner.http.patch(url).json(body);
        self.send(req).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let req = self.inner.http.delete(url);
        self.send(req).await.map(|_| ())
    }

    // ── Response handling ────────────────────────────────────────────

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<String, Error> {
        let resp = self.authorize(req)?.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            debug!(status = status.as_u16(), "request rejected");
            Err(Error::Http {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

fn decode<R: DeserializeOwned>(body: String) -> Result<R, Error> {
    serde_json::from_str(&body).map_err(|e| deserialization(&e, body))
}

fn deserialization(err: &serde_json::Error, body: String) -> Error {
    let preview: String = body.chars().take(200).collect();
    Error::Deserialization {
        message: format!("{err} (body preview: {preview:?})"),
        body,
    }
}

// ── Typed resource client ────────────────────────────────────────────

/// Typed CRUD client for one resource.
pub struct ResourceClient<T> {
    api: ApiClient,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ResourceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("api", &self.api)
            .finish()
    }
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _marker: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn ensure(operation: Operation) -> Result<(), Error> {
        if T::OPERATIONS.supports(operation) {
            Ok(())
        } else {
            Err(Error::Unsupported {
                resource: T::NAME,
                operation,
            })
        }
    }

    /// GET the collection. `query` carries optional server-side filters.
    pub async fn list(&self, query: &[(&str, String)]) -> Result<Vec<T>, Error> {
        Self::ensure(Operation::List)?;
        let body = self.api.get_text(T::PATH, query).await?;
        envelope::decode_list(&body, T::COLLECTION_KEY).map_err(|e| deserialization(&e, body))
    }

    /// POST a new entity, as JSON or multipart depending on the entity.
    pub async fn create(&self, draft: &T) -> Result<T, Error> {
        Self::ensure(Operation::Create)?;
        let body = draft
            .create_body()
            .map_err(|e| Error::Encoding(e.to_string()))?;
        let response = match body {
            CreateBody::Json(value) => self.api.post_json(T::PATH, &value).await?,
            CreateBody::Multipart(payload) => {
                self.api.post_multipart(T::PATH, payload.into_form()?).await?
            }
        };
        decode(response)
    }

    /// POST an explicit multipart payload.
    pub async fn create_multipart(&self, payload: MultipartPayload) -> Result<T, Error> {
        Self::ensure(Operation::Create)?;
        let response = self.api.post_multipart(T::PATH, payload.into_form()?).await?;
        decode(response)
    }

    /// PATCH with partial-field semantics. Returns whatever fields the
    /// backend echoed for the entity, if any.
    pub async fn update(&self, id: &str, patch: &T::Patch) -> Result<Option<Echo>, Error> {
        Self::ensure(Operation::Update)?;
        let (path, body) =
            T::update_request(id, patch).map_err(|e| Error::Encoding(e.to_string()))?;
        let response = self.api.patch_json(&path, &body).await?;
        Ok(Echo::decode(&response))
    }

    pub async fn remove(&self, id: &str) -> Result<(), Error> {
        Self::ensure(Operation::Delete)?;
        self.api.delete(&T::member_path(id)).await
    }
}
