// ── Response envelopes ──
//
// List endpoints answer either with a bare array or with an object that
// names the collection (`{"properties": [...]}`). Both are accepted.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Decode a list response, accepting a bare array or `{ <key>: [...] }`.
///
/// `null`, an empty body, or an object without the named array all decode
/// to an empty list.
pub fn decode_list<T: DeserializeOwned>(body: &str, key: &str) -> Result<Vec<T>, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => collect(items),
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => collect(items),
            _ => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}

/// Fields a mutation response echoed back for one entity.
///
/// Backends often answer a PATCH with only the fields they touched, so an
/// echo is never taken as the whole entity. [`Echo::overlay`] lays it over
/// the entry the caller already holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Echo(Map<String, Value>);

impl Echo {
    /// Decode a mutation response body.
    ///
    /// Only an object carrying an `_id` counts as an echo. Empty bodies and
    /// acknowledgements such as `{"message": "updated"}` yield `None`.
    pub fn decode(body: &str) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<Value>(body).ok()? {
            Value::Object(map) if map.contains_key(ID_FIELD) => Some(Self(map)),
            _ => None,
        }
    }

    /// Echo every serialized field of `entity`.
    pub fn of<T: Serialize>(entity: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(entity)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(serde::ser::Error::custom(format!(
                "entity serialized to {other}, expected an object"
            ))),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// `base` with every echoed top-level field replaced. Fields the echo
    /// leaves out keep their value from `base`.
    pub fn overlay<T: Serialize + DeserializeOwned>(&self, base: &T) -> Result<T, serde_json::Error> {
        let mut merged = Self::of(base)?.0;
        merged.extend(self.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        serde_json::from_value(Value::Object(merged))
    }
}

/// Identifier field of every backend entity.
pub const ID_FIELD: &str = "_id";

fn collect<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, serde_json::Error> {
    items.into_iter().map(serde_json::from_value).collect()
}
