pub mod config;
pub mod error;
pub mod types;

pub use error::{PharoError, Result};
pub use types::{ChannelId, ChannelType, UserRole};
