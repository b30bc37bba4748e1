//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tibiadex_character::{CharacterParser, CreatureList};
use tibiadex_shared::{AppConfig, CharacterRecord, init_config, load_config};
use tracing::{error, info};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// TibiaDex: structured character records from tibia.com pages.
#[derive(Parser)]
#[command(
    name = "tibiadex",
    version,
    about = "Extract structured character records from captured tibia.com pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Parse captured character pages and print each record as JSON.
    Parse {
        /// Saved character page(s).
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// One JSON line per record instead of pretty output.
        #[arg(long)]
        compact: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "tibiadex=info",
        1 => "tibiadex=debug",
        _ => "tibiadex=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays pure JSON.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse { files, compact } => cmd_parse(files, compact).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_parse(files: Vec<PathBuf>, compact: bool) -> Result<()> {
    let config = load_config()?;
    let parser = Arc::new(build_parser(&config)?);
    let pretty = config.output.pretty && !compact;

    // Parse concurrently, report in argument order.
    let mut tasks = Vec::with_capacity(files.len());
    for path in files {
        let parser = Arc::clone(&parser);
        tasks.push(tokio::spawn(async move {
            let outcome = parse_file(&parser, &path).await;
            (path, outcome)
        }));
    }

    let mut failed = 0usize;
    let total = tasks.len();
    for task in tasks {
        let (path, outcome) = task.await.wrap_err("parse task panicked")?;
        match outcome {
            Ok(record) => println!("{}", render(&record, pretty)?),
            Err(e) => {
                failed += 1;
                error!(path = %path.display(), "{e:#}");
            }
        }
    }

    info!(total, failed, "parse complete");
    if failed > 0 {
        return Err(eyre!("{failed} of {total} file(s) failed to parse"));
    }
    Ok(())
}

fn build_parser(config: &AppConfig) -> Result<CharacterParser> {
    let creatures = match &config.parser.creatures_file {
        Some(path) => CreatureList::load(path)?,
        None => CreatureList::builtin(),
    };
    let parser = CharacterParser::new(creatures);
    info!(creatures = parser.creatures().len(), "creature list ready");
    Ok(parser)
}

async fn parse_file(parser: &Arc<CharacterParser>, path: &Path) -> Result<CharacterRecord> {
    let html = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;

    let parser = Arc::clone(parser);
    let record = tokio::task::spawn_blocking(move || parser.parse(&html))
        .await
        .wrap_err("parse worker panicked")??;
    Ok(record)
}

fn render(record: &CharacterRecord, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(record)?
    } else {
        serde_json::to_string(record)?
    };
    Ok(json)
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
