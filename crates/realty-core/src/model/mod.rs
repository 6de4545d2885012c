// ── Domain model ──
//
// Wire-shaped entity types for every admin screen. Field names follow the
// backend's JSON (`_id`, camelCase) through serde attributes.

pub mod content;
pub mod entity_id;
pub mod job;
pub mod property;
pub mod statistic;
pub mod team;
pub mod user;

pub use content::{ContentPage, SiteSettings, SocialMedia};
pub use entity_id::{EntityId, EntryKey};
pub use job::{Job, JobListField, JobType};
pub use property::{Property, PropertyPatch, PropertyType};
pub use statistic::{Statistic, StatisticField, StatisticsBoard};
pub use team::{ImageUpload, TeamMember, TeamMemberPatch};
pub use user::{User, UserPatch, UserRole};

use realty_api::Resource;

/// An entity that can be edited in a form session.
pub trait Draft: Resource + Default {
    /// Names of required fields that are currently blank.
    fn missing_fields(&self) -> Vec<&'static str>;
}

/// An entity held only in client memory, with ids assigned locally.
pub trait LocalResource: Resource {
    fn assign_id(&mut self, id: EntityId);
}

/// Collect the names of blank (empty after trimming) fields.
pub(crate) fn blank_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}
