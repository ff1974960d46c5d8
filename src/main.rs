//! keyhint - keyboard hint overlay
//!
//! Runs hint mode against a page snapshot: lists the labelled elements or
//! replays a key script and reports what was activated.

mod cli;

use std::path::Path;

use anyhow::{Context, bail};
use clap::Parser;
use serde_json::json;
use tracing::{debug, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use keyhint_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use keyhint_core::{HintSlot, ModeSignal};
use keyhint_dom_snapshot::SnapshotDocument;

use crate::cli::{Cli, Commands, parse_keys};

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let file = match logging.directory {
        Some(ref dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("keyhint")
                .filename_suffix("log")
                .max_log_files(14)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);

            // Keeps the background writer alive until exit.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = ConfigLoader::load_or_default(path).context("loading configuration")?;
    let result = ConfigValidator::validate(&config);
    if !result.is_valid() {
        for error in &result.errors {
            eprintln!("config error: {}: {}", error.path, error.message);
        }
        bail!("invalid configuration");
    }
    Ok(config)
}

fn load_page(path: &Path) -> anyhow::Result<SnapshotDocument> {
    SnapshotDocument::load(path).with_context(|| format!("loading page snapshot {}", path.display()))
}

fn list_hints(config: &Config, page: &Path) -> anyhow::Result<()> {
    let mut doc = load_page(page)?;
    let mut slot = HintSlot::new();
    let engine = slot.install(&mut doc, &config.hints);

    for hint in engine.hints() {
        let position = doc
            .label(hint.label)
            .map(|label| label.position)
            .unwrap_or_default();
        let row = json!({
            "number": hint.number,
            "element": doc.describe(hint.element),
            "document": hint.document,
            "href": hint.href,
            "x": position.x,
            "y": position.y,
        });
        println!("{}", row);
    }
    info!(hints = engine.hints().len(), "Listed hints");
    Ok(())
}

fn run_keys(config: &Config, page: &Path, script: &str, new_tab: bool) -> anyhow::Result<()> {
    let keys = parse_keys(script).context("parsing key script")?;
    let mut doc = load_page(page)?;
    let mut slot = HintSlot::new();
    slot.install(&mut doc, &config.hints);
    if new_tab {
        slot.set_open_to_new_tab();
    }

    let mut signal = ModeSignal::Ignore;
    for key in keys {
        if !slot.is_active() {
            warn!(?key, "Hint mode already finished, remaining keys dropped");
            break;
        }
        signal = slot.handle_key(&mut doc, key);
        debug!(?key, %signal, "Key handled");
    }

    let remaining = slot.active().map(|engine| {
        engine
            .matches()
            .iter()
            .map(|hint| hint.number)
            .collect::<Vec<_>>()
    });
    let report = json!({
        "signal": signal,
        "active": slot.is_active(),
        "remaining": remaining,
        "effects": doc.effects(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    for warning in ConfigValidator::validate(&config).warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }

    match cli.command {
        Commands::Hints { page } => list_hints(&config, &page),
        Commands::Run { page, keys, new_tab } => run_keys(&config, &page, &keys, new_tab),
    }
}
