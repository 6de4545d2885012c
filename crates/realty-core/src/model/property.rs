// ── Property domain types ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use realty_api::{Operations, Resource};

use super::{Draft, blank_fields};

/// Listing categories offered by the type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PropertyType {
    Villa,
    Apartment,
    House,
    Studio,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub location: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub property_type: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Floor area in square feet.
    pub area: f64,
    /// Listing status, e.g. "available" or "sold".
    pub status: String,
    pub featured: bool,
}

/// Partial property update. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl PropertyPatch {
    pub fn featured(featured: bool) -> Self {
        Self {
            featured: Some(featured),
            ..Self::default()
        }
    }
}

impl Property {
    /// Patch that flips the featured flag relative to the current value.
    pub fn toggle_featured(&self) -> PropertyPatch {
        PropertyPatch::featured(!self.featured)
    }
}

impl Resource for Property {
    const NAME: &'static str = "property";
    const PATH: &'static str = "properties";
    const COLLECTION_KEY: &'static str = "properties";
    const OPERATIONS: Operations = Operations {
        list: true,
        create: false,
        update: true,
        delete: true,
    };
    type Patch = PropertyPatch;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn apply_patch(&mut self, patch: &PropertyPatch) {
        if let Some(ref v) = patch.title {
            self.title.clone_from(v);
        }
        if let Some(ref v) = patch.location {
            self.location.clone_from(v);
        }
        if let Some(v) = patch.price {
            self.price = v;
        }
        if let Some(ref v) = patch.property_type {
            self.property_type.clone_from(v);
        }
        if let Some(v) = patch.bedrooms {
            self.bedrooms = v;
        }
        if let Some(v) = patch.bathrooms {
            self.bathrooms = v;
        }
        if let Some(v) = patch.area {
            self.area = v;
        }
        if let Some(ref v) = patch.status {
            self.status.clone_from(v);
        }
        if let Some(v) = patch.featured {
            self.featured = v;
        }
    }

    fn to_patch(&self) -> PropertyPatch {
        PropertyPatch {
            title: Some(self.title.clone()),
            location: Some(self.location.clone()),
            price: Some(self.price),
            property_type: Some(self.property_type.clone()),
            bedrooms: Some(self.bedrooms),
            bathrooms: Some(self.bathrooms),
            area: Some(self.area),
            status: Some(self.status.clone()),
            featured: Some(self.featured),
        }
    }
}

impl Draft for Property {
    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[("title", &self.title), ("location", &self.location)])
    }
}
