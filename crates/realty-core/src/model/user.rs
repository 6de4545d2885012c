// ── User domain types ──

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use realty_api::{Operations, Resource};

use super::{Draft, blank_fields};

/// Known account roles. The wire value is an open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserRole {
    User,
    Agent,
    Admin,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    /// Parsed role, if it is one of the known values.
    pub fn role_kind(&self) -> Option<UserRole> {
        self.role.parse().ok()
    }
}

/// Role change. The backend only accepts the role.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserPatch {
    pub fn role(role: UserRole) -> Self {
        Self {
            role: Some(role.to_string()),
        }
    }
}

impl Resource for User {
    const NAME: &'static str = "user";
    const PATH: &'static str = "user/users";
    const COLLECTION_KEY: &'static str = "users";
    const OPERATIONS: Operations = Operations {
        list: true,
        create: false,
        update: true,
        delete: false,
    };
    type Patch = UserPatch;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn apply_patch(&mut self, patch: &UserPatch) {
        if let Some(ref role) = patch.role {
            self.role.clone_from(role);
        }
    }

    fn to_patch(&self) -> UserPatch {
        UserPatch {
            role: Some(self.role.clone()),
        }
    }

    /// `PATCH /user/update` with the id carried in the body as `userId`.
    fn update_request(id: &str, patch: &UserPatch) -> Result<(String, Value), serde_json::Error> {
        let mut body = serde_json::to_value(patch)?;
        if let Value::Object(ref mut map) = body {
            map.insert("userId".into(), Value::String(id.to_owned()));
        }
        Ok(("user/update".into(), body))
    }
}

impl Draft for User {
    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[("name", &self.name), ("email", &self.email)])
    }
}
