use clap::{Args, Parser, Subcommand};
use pharo_drafts::DraftState;

#[derive(Debug, Parser)]
#[command(name = "pharo", version, about = "Structured post composer for team chat channels")]
pub struct Cli {
    /// Config file (defaults to $PHARO_CONFIG, then ~/.pharo/pharo.toml).
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show which composer a channel path gets.
    Variant {
        path: String,
        #[arg(long, default_value = "public")]
        channel_type: String,
    },
    /// Edit the channel draft and submit it.
    Compose(ComposeArgs),
    /// List the "other" tags related to a topic/source selection.
    Tags {
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Date suggestions for a search box ending in `since:`.
    Since { pretext: String },
    /// Inspect or discard stored drafts.
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
}

#[derive(Debug, Args)]
pub struct ComposeArgs {
    /// Channel URL path, e.g. /team/channels/market-commentary.
    #[arg(long)]
    pub path: String,
    /// Draft key; defaults to the last path segment.
    #[arg(long)]
    pub channel: Option<String>,
    #[arg(long, default_value = "public")]
    pub channel_type: String,
    #[arg(long, default_value_t = 0)]
    pub members: usize,
    #[arg(long)]
    pub message: Option<String>,
    #[arg(long)]
    pub topic: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub subject: Option<String>,
    /// Select an other tag. Repeatable.
    #[arg(long = "other")]
    pub other: Vec<String>,
    /// Deselect an other tag. Repeatable.
    #[arg(long = "drop-other")]
    pub drop_other: Vec<String>,
    /// Deselect every other tag before applying `--other`.
    #[arg(long)]
    pub clear_other: bool,
    #[arg(long, conflicts_with = "no_critical")]
    pub critical: bool,
    #[arg(long)]
    pub no_critical: bool,
    #[arg(long, conflicts_with = "no_dual_publish")]
    pub dual_publish: bool,
    #[arg(long)]
    pub no_dual_publish: bool,
    #[arg(long, default_value = "cli")]
    pub user: String,
    #[arg(long, default_value = "")]
    pub position: String,
    /// Local catalog JSON instead of the configured remote one.
    #[arg(long)]
    pub catalog: Option<String>,
    /// Skip the notify-all confirmation.
    #[arg(long)]
    pub confirm: bool,
    /// Print the assembled message without submitting.
    #[arg(long)]
    pub dry_run: bool,
}

impl ComposeArgs {
    /// Apply the edit flags to a stored draft. Unset flags leave fields alone.
    pub fn apply(&self, draft: &mut DraftState) {
        if let Some(message) = &self.message {
            draft.message = message.clone();
        }
        if let Some(topic) = &self.topic {
            draft.set_topic(topic.as_str());
        }
        if let Some(source) = &self.source {
            draft.set_source(source.as_str());
        }
        if let Some(subject) = &self.subject {
            draft.set_subject(subject.as_str());
        }
        if self.clear_other {
            draft.other_tags.clear();
        }
        for tag in &self.drop_other {
            draft.deselect_other(tag);
        }
        for tag in &self.other {
            draft.select_other(tag.as_str());
        }
        if self.critical || self.no_critical {
            draft.critical = self.critical;
        }
        if self.dual_publish || self.no_dual_publish {
            draft.dual_publish = self.dual_publish;
        }
    }

    pub fn channel_id(&self) -> String {
        self.channel.clone().unwrap_or_else(|| {
            self.path
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string()
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum DraftAction {
    Show { channel: String },
    Clear { channel: String },
    List,
}
