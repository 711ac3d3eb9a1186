use super::TomlConfig;
use crate::domain::model::ColorIdentityMode;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "commander-assist")]
#[command(about = "Validate Commander decklists against Scryfall card data")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the card data endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate a decklist for a commander
    Validate(ValidateArgs),

    /// Show a single card's Commander legality and eligibility
    Legality {
        /// Card name (fuzzy)
        #[arg(long)]
        name: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Commander card name
    #[arg(long)]
    pub commander: String,

    /// Decklist as a JSON array of names or one card per line ("1 Sol Ring")
    #[arg(long, conflicts_with = "decklist_file", required_unless_present = "decklist_file")]
    pub decklist: Option<String>,

    /// Read the decklist from a file
    #[arg(long)]
    pub decklist_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Maximum card lookups in flight
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Do not resolve each decklist card (color identity is reported as not checked)
    #[arg(long)]
    pub skip_color_identity: bool,

    #[arg(long)]
    pub deadline_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
}

impl CliConfig {
    /// Load the TOML file (or defaults), apply command-line overrides, then validate.
    pub fn settings(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.set_endpoint(endpoint.clone());
        }

        if let Command::Validate(args) = &self.command {
            if let Some(concurrency) = args.concurrency {
                config.set_max_concurrent_resolutions(concurrency);
            }
            if args.skip_color_identity {
                config.set_color_identity_mode(ColorIdentityMode::Skip);
            }
            if let Some(seconds) = args.deadline_seconds {
                config.set_deadline_seconds(seconds);
            }
        }

        config.validate()?;
        Ok(config)
    }
}
