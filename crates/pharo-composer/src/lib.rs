pub mod action;
pub mod assemble;
pub mod composer;
pub mod context;
pub mod error;
pub mod sink;
pub mod suggestion;

pub use action::{classify, mentions_channel, SubmitAction};
pub use assemble::{Assembler, ComposePolicy};
pub use composer::{Composer, IgnoreReason, SubmitOutcome};
pub use context::{select_variant, ComposerContext, Variant};
pub use error::{ComposeError, SinkError, ValidationError};
pub use sink::{OutgoingPost, PostSink};
pub use suggestion::{search_date_suggestions, DateSuggestion, DateSuggestions};
