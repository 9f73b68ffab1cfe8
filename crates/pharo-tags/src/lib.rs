pub mod catalog;
pub mod error;
pub mod loader;
pub mod related;
pub mod types;

pub use catalog::TagCatalog;
pub use error::CatalogError;
pub use loader::{CatalogLoader, RemoteConfig, SharedCatalog};
pub use related::related_other_tags;
pub use types::{GroupTag, Tag, TagGroup, TagOption, TagRef, TopicTags};
