//! Async Rust client for the real-estate listings admin REST API.
//!
//! - [`ResourceClient<T>`]: typed CRUD over any [`Resource`] (list, create
//!   as JSON or multipart, partial update, delete).
//! - [`SessionTokenSource`]: where the bearer token comes from. Injected
//!   into [`ApiClient`]; [`CookieSession`] reads the `token` cookie,
//!   [`StaticToken`] holds a fixed value.
//! - [`Error`]: `Network` when no response arrived, `Http { status, body }`
//!   for every non-2xx answer. Auth failures are not special-cased.

pub mod client;
pub mod envelope;
pub mod error;
pub mod resource;
pub mod session;
pub mod transport;

pub use client::{ApiClient, FilePart, MultipartPayload, ResourceClient};
pub use envelope::Echo;
pub use error::Error;
pub use resource::{CreateBody, Operation, Operations, Resource};
pub use session::{CookieSession, SessionTokenSource, StaticToken, TOKEN_COOKIE};
pub use transport::TransportConfig;
