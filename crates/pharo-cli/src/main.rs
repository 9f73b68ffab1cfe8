use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use pharo_composer::{
    search_date_suggestions, select_variant, ComposePolicy, Composer, ComposerContext,
    SubmitOutcome,
};
use pharo_core::config::PharoConfig;
use pharo_core::{ChannelId, ChannelType, UserRole};
use pharo_drafts::{DraftStore, SqliteDraftStore};
use pharo_tags::{related_other_tags, CatalogLoader, TagCatalog};
use tracing::{info, warn};

mod cli;
mod sink;

use cli::{Cli, Command, ComposeArgs, DraftAction};
use sink::WriterSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pharo_cli=info,pharo_composer=info,pharo_tags=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    // explicit --config > PHARO_CONFIG env > ~/.pharo/pharo.toml
    let config_path = cli.config.clone().or_else(|| std::env::var("PHARO_CONFIG").ok());
    let config = PharoConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        PharoConfig::default()
    });

    match cli.command {
        Command::Variant { path, channel_type } => {
            let channel_type = parse_channel_type(&channel_type)?;
            println!("{:?}", select_variant(&path, channel_type));
        }
        Command::Compose(args) => compose(&config, args).await?,
        Command::Tags {
            topic,
            source,
            catalog,
        } => {
            let catalog = load_catalog(&config, catalog.as_deref()).await?;
            let groups = related_other_tags(&catalog, topic.as_deref(), source.as_deref());
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        Command::Since { pretext } => {
            let today = chrono::Local::now().date_naive();
            match search_date_suggestions(&pretext, today) {
                Some(s) => println!("{}", serde_json::to_string_pretty(&s)?),
                None => println!("no suggestions"),
            }
        }
        Command::Draft { action } => {
            let store = open_drafts(&config)?;
            match action {
                DraftAction::Show { channel } => {
                    let draft = store.load_or_default(&ChannelId::from(channel))?;
                    println!("{}", serde_json::to_string_pretty(&draft)?);
                }
                DraftAction::Clear { channel } => {
                    store.clear(&ChannelId::from(channel.as_str()))?;
                    info!(channel = %channel, "draft cleared");
                }
                DraftAction::List => {
                    for channel in store.channels()? {
                        println!("{channel}");
                    }
                }
            }
        }
    }

    Ok(())
}

async fn compose(config: &PharoConfig, args: ComposeArgs) -> anyhow::Result<()> {
    let channel_type = parse_channel_type(&args.channel_type)?;
    let catalog = load_catalog(config, args.catalog.as_deref()).await?;
    let drafts: Arc<dyn DraftStore> = Arc::new(open_drafts(config)?);

    let context = ComposerContext::navigate(args.channel_id(), args.path.as_str(), channel_type)
        .with_member_count(args.members);
    info!(channel = %context.channel_id, variant = ?context.variant, "composing");

    let composer = Composer::new(
        context,
        UserRole::new(args.user.as_str(), args.position.as_str()),
        Arc::new(catalog),
        ComposePolicy::from(&config.composer),
        drafts,
        Arc::new(WriterSink::new(std::io::stdout())),
    );

    composer.edit_draft(|draft| args.apply(draft))?;

    if args.dry_run {
        println!("{}", composer.preview()?);
        return Ok(());
    }

    let outcome = if args.confirm {
        composer.submit_confirmed().await?
    } else {
        composer.submit().await?
    };

    match outcome {
        SubmitOutcome::Posted(post) => info!(pending = %post.pending_post_id, "posted"),
        SubmitOutcome::CommandExecuted => info!("command sent"),
        SubmitOutcome::Reacted => info!("reaction sent"),
        SubmitOutcome::Ignored(reason) => warn!(?reason, "nothing submitted"),
        SubmitOutcome::NeedsConfirmation { members } => bail!(
            "message notifies all {members} channel members; rerun with --confirm to send"
        ),
    }
    Ok(())
}

fn parse_channel_type(s: &str) -> anyhow::Result<ChannelType> {
    ChannelType::parse(s).with_context(|| format!("unknown channel type '{s}'"))
}

/// A local catalog file when given, otherwise the configured remote one.
async fn load_catalog(config: &PharoConfig, path: Option<&str>) -> anyhow::Result<TagCatalog> {
    match path {
        Some(path) => CatalogLoader::load_file(path)
            .with_context(|| format!("reading tag catalog {path}")),
        None => Ok(CatalogLoader::new(config.catalog.clone()).load().await.tags),
    }
}

fn open_drafts(config: &PharoConfig) -> anyhow::Result<SqliteDraftStore> {
    let path = &config.drafts.path;
    ensure_parent_dir(path);
    info!(path = %path, "opening draft database");
    Ok(SqliteDraftStore::open(path)?)
}

fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}
