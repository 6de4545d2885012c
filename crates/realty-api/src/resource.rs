// ── Resource descriptions ──
//
// Every admin screen talks to the same shape of endpoint: a collection
// path, an optional member path, and an entity type. The `Resource`
// trait captures that shape so one client serves every entity.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::MultipartPayload;

/// A single CRUD operation, used for capability checks and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// The set of operations a backend exposes for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Operations {
    pub list: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl Operations {
    pub const ALL: Self = Self {
        list: true,
        create: true,
        update: true,
        delete: true,
    };

    pub const fn supports(self, op: Operation) -> bool {
        match op {
            Operation::List => self.list,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }
}

/// Request body for a create call.
#[derive(Debug)]
pub enum CreateBody {
    Json(serde_json::Value),
    Multipart(MultipartPayload),
}

/// An entity exposed through CRUD endpoints.
///
/// Paths are relative to the API base URL and carry no leading slash.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Singular, human-readable name ("property", "team member").
    const NAME: &'static str;

    /// Collection path, e.g. `"properties"`.
    const PATH: &'static str;

    /// Field name a list response may wrap the collection in.
    const COLLECTION_KEY: &'static str;

    /// Operations the backend exposes for this resource.
    const OPERATIONS: Operations = Operations::ALL;

    /// Partial update payload. Only populated fields are sent.
    type Patch: Serialize + Clone + fmt::Debug + Send + Sync + 'static;

    /// Server-assigned identifier. `None` for drafts not yet created.
    fn id(&self) -> Option<&str>;

    /// Apply a partial update in place, touching only populated fields.
    fn apply_patch(&mut self, patch: &Self::Patch);

    /// A patch carrying every editable field of `self`.
    fn to_patch(&self) -> Self::Patch;

    fn member_path(id: &str) -> String {
        format!("{}/{id}", Self::PATH)
    }

    /// Path and JSON body for an update. Override for endpoints that take
    /// the identifier in the body instead of the path.
    fn update_request(
        id: &str,
        patch: &Self::Patch,
    ) -> Result<(String, serde_json::Value), serde_json::Error> {
        Ok((Self::member_path(id), serde_json::to_value(patch)?))
    }

    /// Body for a create call. Entities with attachments return multipart.
    fn create_body(&self) -> Result<CreateBody, serde_json::Error> {
        Ok(CreateBody::Json(serde_json::to_value(self)?))
    }
}
