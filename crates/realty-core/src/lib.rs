// realty-core: Optimistic data layer between realty-api and the CLI.

pub mod config;
pub mod console;
pub mod error;
pub mod filter;
pub mod form;
pub mod lines;
pub mod model;
pub mod screen;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ConsoleConfig;
pub use console::Console;
pub use error::CoreError;
pub use filter::{CategoryFilter, FilterSpec, Filterable, filter};
pub use form::{FormMode, FormSession, SubmitPolicy};
pub use screen::ResourceScreen;
pub use store::{
    BlobSnapshot, CollectionSnapshot, ConfigBlob, ConfigBlobStore, Entry, LocalBackend,
    LocalBlobBackend, Notice, NoticeLevel, Notifier, OptimisticCollectionStore, RemoteBlob,
    ResourceBackend,
};
pub use stream::CollectionStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ContentPage, Draft, EntityId, EntryKey, ImageUpload, Job, JobListField, JobType,
    LocalResource, Property, PropertyPatch, PropertyType, SiteSettings, SocialMedia, Statistic,
    StatisticField, StatisticsBoard, TeamMember, TeamMemberPatch, User, UserPatch, UserRole,
};

// The transport layer's resource trait, for callers defining their own.
pub use realty_api::Resource;
