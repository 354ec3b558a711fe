use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

mod aggregate;
mod config;
mod loader;
mod metrics;
mod sample;
mod state;
mod tui;
mod types;
mod utils;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "pulseboard")]
#[command(version)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Session log (JSONL) to load instead of sample data
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Seed for the sample-data generator (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Output the summary as JSON instead of running the TUI
    #[arg(long)]
    json: bool,

    /// Use comma-separated number formatting
    #[arg(long)]
    number_comma: bool,

    /// Use human-readable number formatting (k, m, b, t)
    #[arg(short = 'H', long)]
    number_human: bool,

    /// Locale for number formatting (en, de, fr, es, it, ja, ko, zh)
    #[arg(long)]
    locale: Option<String>,

    /// Number of decimal places for human-readable formatting
    #[arg(long)]
    decimal_places: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Output the summary tables as JSON
    Summary(SummaryArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct SummaryArgs {
    /// Session log (JSONL) to summarize instead of sample data
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Seed for the sample-data generator (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Pretty-print JSON instead of a single line
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    subcommand: ConfigSubcommands,
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Create default configuration file
    Init {
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (number-comma, number-human, locale, decimal-places)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Config file supplies defaults; CLI flags override.
    let config = config::Config::load().unwrap_or(None).unwrap_or_default();
    let format_options = utils::NumberFormatOptions {
        use_comma: cli.number_comma || config.formatting.number_comma,
        use_human: cli.number_human || config.formatting.number_human,
        locale: cli.locale.unwrap_or(config.formatting.locale),
        decimal_places: cli
            .decimal_places
            .unwrap_or(config.formatting.decimal_places),
    };

    match cli.command {
        None => {
            if cli.json {
                if let Err(e) = run_summary(SummaryArgs {
                    file: cli.file,
                    seed: cli.seed,
                    pretty: true,
                })
                .await
                {
                    eprintln!("Error generating JSON summary: {e:#}");
                    std::process::exit(1);
                }
            } else if let Err(e) = run_dashboard(cli.file, cli.seed, &format_options).await {
                eprintln!("Error displaying TUI: {e:#}");
                std::process::exit(1);
            }
        }
        Some(Commands::Summary(args)) => {
            if let Err(e) = run_summary(args).await {
                eprintln!("Error generating JSON summary: {e:#}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config(config_args)) => {
            handle_config_subcommand(config_args);
        }
    }
}

async fn build_bundle(
    file: Option<&PathBuf>,
    seed: Option<u64>,
) -> Result<(types::SummaryBundle, state::BundleSource)> {
    match file {
        Some(path) => {
            let bundle = loader::load_bundle(path)
                .await
                .with_context(|| format!("Failed to load {}", path.display()))?;
            Ok((bundle, state::BundleSource::Uploaded))
        }
        None => {
            let bundle = match seed {
                Some(seed) => sample::generate_seeded(seed),
                None => sample::generate(),
            };
            Ok((bundle, state::BundleSource::Generated))
        }
    }
}

async fn run_dashboard(
    file: Option<PathBuf>,
    seed: Option<u64>,
    format_options: &utils::NumberFormatOptions,
) -> Result<()> {
    let (bundle, source) = build_bundle(file.as_ref(), seed).await?;
    let state = state::DashboardState::new(bundle, source);
    tui::run_tui(state, file, format_options)
}

async fn run_summary(args: SummaryArgs) -> Result<()> {
    let (bundle, _) = build_bundle(args.file.as_ref(), args.seed).await?;

    let json = if args.pretty {
        simd_json::to_string_pretty(&bundle)?
    } else {
        simd_json::to_string(&bundle)?
    };
    println!("{json}");

    Ok(())
}

fn handle_config_subcommand(config_args: ConfigArgs) {
    match config_args.subcommand {
        ConfigSubcommands::Init { overwrite } => {
            if let Err(e) = config::create_default_config(overwrite) {
                eprintln!("Error creating config: {e}");
                std::process::exit(1);
            }
        }
        ConfigSubcommands::Show => {
            if let Err(e) = config::show_config() {
                eprintln!("Error showing config: {e}");
                std::process::exit(1);
            }
        }
        ConfigSubcommands::Set { key, value } => {
            if let Err(e) = config::set_config_value(&key, &value) {
                eprintln!("Error setting config: {e}");
                std::process::exit(1);
            }
        }
    }
}
