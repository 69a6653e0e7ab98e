//! moltsolve CLI - solve obfuscated verification challenges

use anyhow::Result;
use clap::{Parser, Subcommand};
use moltsolve_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "moltsolve")]
#[command(version)]
#[command(about = "Solve obfuscated numeric verification challenges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose output (show scan traces)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how a challenge is read, as JSON
    Parse {
        /// Challenge text
        text: Option<String>,
    },

    /// Solve a challenge and optionally submit the answer
    Solve {
        /// Challenge text
        text: Option<String>,

        /// Submit the answer to the verification endpoint
        #[arg(long)]
        submit: bool,

        /// Verification code to submit with
        #[arg(long)]
        code: Option<String>,

        /// API key (falls back to config or MOLTSOLVE_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Read a verification payload as JSON from stdin, solve and submit it
    Auto,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set the minimum length for number-word tokens
    SetMinLength {
        /// Minimum normalized token length
        length: usize,
    },

    /// Let a short word through the length guard
    AddShortWord {
        /// Word to whitelist
        word: String,
    },

    /// Show config file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { text } => commands::parse::run(&config, text.as_deref()),

        Commands::Solve {
            text,
            submit,
            code,
            api_key,
        } => commands::solve::run(
            &config,
            text.as_deref(),
            submit,
            code.as_deref(),
            api_key.as_deref(),
        ),

        Commands::Auto => commands::auto::run(&config, std::io::stdin().lock()),

        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::SetMinLength { length } => {
                commands::config::set_min_length(&mut config, cli.config.as_deref(), length)
            }
            ConfigAction::AddShortWord { word } => {
                commands::config::add_short_word(&mut config, cli.config.as_deref(), &word)
            }
            ConfigAction::Path => commands::config::show_path(cli.config.as_deref()),
        },
    }
}
