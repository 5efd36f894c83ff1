//! Raw keyboard viewer entry point.
//!
//! Replays a raw-input trace through the normalizer and prints one row per
//! surviving keyboard event: the key's names, its raw numeric fields and the
//! name the selected input library uses for it.
//!
//! # Usage
//!
//! ```text
//! rawkey-viewer [OPTIONS]
//!
//! Options:
//!   --trace   <FILE>   Trace to replay; `-` or absent reads stdin
//!   --config  <FILE>   Config file [default: platform config dir]
//!   --no-adjust        Show records exactly as the hardware reported them
//!   --library <NAME>   sfml | raylib | glfw
//!   --format  <FMT>    hex | dec | bin
//!   --json             One JSON object per row
//! ```
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load config, merge CLI overrides
//!  └─ ReplayInputSource::start()   -- background thread, mpsc channel
//!  └─ CaptureSession::handle()     -- normalize → pack → log
//!  └─ KeyRow::render()             -- unpack → table lookup → stdout
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rawkey_core::{DefaultTranslator, KeyTables, Library};
use rawkey_viewer::application::capture_session::{CaptureSession, SessionUpdate};
use rawkey_viewer::application::display::{KeyRow, NumberFormat};
use rawkey_viewer::infrastructure::input_source::replay::ReplayInputSource;
use rawkey_viewer::infrastructure::input_source::InputSource;
use rawkey_viewer::infrastructure::storage::config::{
    load_config, load_config_from, AppConfig, ConfigError,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Raw keyboard input viewer.
#[derive(Debug, Parser)]
#[command(
    name = "rawkey-viewer",
    about = "Normalizes raw keyboard input and shows each key's names across input libraries",
    version
)]
struct Cli {
    /// Trace file to replay.  `-` or no value reads the trace from stdin.
    #[arg(long, env = "RAWKEY_TRACE")]
    trace: Option<PathBuf>,

    /// Config file to use instead of the one in the platform config directory.
    #[arg(long, env = "RAWKEY_CONFIG")]
    config: Option<PathBuf>,

    /// Disable normalization: every keyboard record is shown as reported.
    #[arg(long)]
    no_adjust: bool,

    /// Library whose key names fill the library column.
    #[arg(long, env = "RAWKEY_LIBRARY")]
    library: Option<Library>,

    /// Number format for the numeric columns.
    #[arg(long, env = "RAWKEY_FORMAT")]
    format: Option<NumberFormat>,

    /// Print JSON lines instead of text columns.
    #[arg(long)]
    json: bool,
}

/// Settings after merging the config file with command-line overrides.
struct Settings {
    adjust: bool,
    library: Library,
    format: NumberFormat,
    json: bool,
}

impl Settings {
    fn merge(config: &AppConfig, cli: &Cli) -> Self {
        Self {
            adjust: config.viewer.adjust && !cli.no_adjust,
            library: cli.library.unwrap_or(config.display.library),
            format: cli.format.unwrap_or(config.display.number_format),
            json: cli.json || config.display.json,
        }
    }
}

fn load_settings_file(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => load_config_from(path),
        None => match load_config() {
            Err(ConfigError::NoPlatformConfigDir) => Ok(AppConfig::default()),
            other => other,
        },
    }
}

fn open_source(trace: Option<&Path>) -> anyhow::Result<ReplayInputSource> {
    match trace {
        Some(path) if path != Path::new("-") => ReplayInputSource::from_path(path)
            .with_context(|| format!("failed to read trace {}", path.display())),
        _ => ReplayInputSource::from_reader(std::io::stdin().lock())
            .context("failed to read trace from stdin"),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_settings_file(cli.config.as_deref()).context("failed to load configuration")?;

    // `RUST_LOG` wins over the configured level.  Logs go to stderr so they
    // never interleave with rows on stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.viewer.log_level)),
        )
        .init();

    let settings = Settings::merge(&config, &cli);
    info!(
        adjust = settings.adjust,
        library = %settings.library,
        format = %settings.format,
        "rawkey-viewer starting"
    );

    let source = open_source(cli.trace.as_deref())?;
    let mut session = CaptureSession::new(
        KeyTables::embedded(),
        DefaultTranslator::default(),
        settings.adjust,
    );

    let rx = source.start().context("failed to start input source")?;
    let mut out = std::io::stdout().lock();
    if !settings.json {
        writeln!(out, "{}", KeyRow::header_line(settings.library))?;
    }

    let mut suppressed = 0usize;
    for record in rx {
        match session.handle(record) {
            SessionUpdate::Appended(handle) => {
                let row = session.row(handle, settings.library, settings.format);
                if settings.json {
                    serde_json::to_writer(&mut out, &row)?;
                    writeln!(out)?;
                } else {
                    writeln!(out, "{}", row.text_line())?;
                }
            }
            SessionUpdate::Cleared => {
                if settings.json {
                    writeln!(out, "{}", serde_json::json!({ "cleared": true }))?;
                } else {
                    writeln!(out, "-- log cleared --")?;
                }
            }
            SessionUpdate::Suppressed => suppressed += 1,
            SessionUpdate::Ignored => {}
        }
    }
    source.stop();
    out.flush()?;

    if session.log().is_empty() && suppressed > 0 {
        warn!(suppressed, "every keyboard record was suppressed");
    }
    info!(rows = session.log().len(), suppressed, "replay finished");
    Ok(())
}
