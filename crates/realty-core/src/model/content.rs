// ── Site content: pages and global settings ──

use serde::{Deserialize, Serialize};

use realty_api::Resource;

use super::{Draft, EntityId, LocalResource, blank_fields};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentPage {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    /// URL segment, e.g. "about-us".
    pub slug: String,
    pub content: String,
    pub meta_title: String,
    pub meta_description: String,
    pub published: bool,
}

impl Resource for ContentPage {
    const NAME: &'static str = "content page";
    const PATH: &'static str = "content/pages";
    const COLLECTION_KEY: &'static str = "pages";
    type Patch = ContentPage;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn apply_patch(&mut self, patch: &ContentPage) {
        let id = self.id.take();
        self.clone_from(patch);
        self.id = id;
    }

    fn to_patch(&self) -> ContentPage {
        self.clone()
    }
}

impl LocalResource for ContentPage {
    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id.to_string());
    }
}

impl Draft for ContentPage {
    fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[("title", &self.title), ("slug", &self.slug)])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMedia {
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
    pub linkedin: String,
}

/// Global site settings. A single record, saved whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub site_name: String,
    pub site_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub social_media: SocialMedia,
}
