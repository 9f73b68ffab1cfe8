pub mod db;
pub mod error;
pub mod sqlite;
pub mod store;
pub mod types;

pub use error::DraftError;
pub use sqlite::SqliteDraftStore;
pub use store::{DraftStore, MemoryDraftStore};
pub use types::{DraftField, DraftState};
