//! Lex Provider CLI
//!
//! Command-line interface for inspecting the Lex resource schemas and
//! checking resource records offline, before any remote call is made.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use lex_provider_common::{ProviderConfig, ProviderError, ResourceKind};
use lex_provider_resources::parse_import_id;
use lex_provider_schema::descriptors::{BOT, BOT_ALIAS};
use lex_provider_schema::{
    expand_bot, expand_bot_alias, validate_bot, validate_bot_alias, BotAliasData, BotData,
    ResourceSchema,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lex-provider")]
#[command(version, about = "Manage Lex bots and bot aliases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Provider configuration file (timeouts, retry pacing)
    #[arg(long, global = true)]
    provider_config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resource schema as JSON
    #[command(after_help = "EXAMPLES:\n  \
        # Print both schemas\n  \
        lex-provider schema\n\n  \
        # Print the bot alias schema only\n  \
        lex-provider schema --resource bot-alias")]
    Schema {
        /// Resource to print (all if not specified)
        #[arg(short, long)]
        resource: Option<ResourceArg>,
    },

    /// Check a resource record against its schema
    #[command(after_help = "EXAMPLES:\n  \
        lex-provider validate --kind bot --config order-flowers.yaml")]
    Validate {
        /// Resource kind of the record
        #[arg(short, long)]
        kind: ResourceArg,

        /// Path to the YAML record
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Validate a resource record and print the put request it expands to
    #[command(after_help = "EXAMPLES:\n  \
        lex-provider expand --kind bot-alias --config prod-alias.yaml")]
    Expand {
        /// Resource kind of the record
        #[arg(short, long)]
        kind: ResourceArg,

        /// Path to the YAML record
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Parse a bot alias import identifier (BOT_NAME.BOT_ALIAS_NAME)
    #[command(after_help = "EXAMPLES:\n  \
        lex-provider import-id OrderFlowers.OrderFlowersProd")]
    ImportId {
        /// Import identifier
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResourceArg {
    /// aws_lex_bot
    Bot,
    /// aws_lex_bot_alias
    BotAlias,
}

impl ResourceArg {
    fn kind(self) -> ResourceKind {
        match self {
            ResourceArg::Bot => ResourceKind::Bot,
            ResourceArg::BotAlias => ResourceKind::BotAlias,
        }
    }

    fn schema(self) -> ResourceSchema {
        match self {
            ResourceArg::Bot => BOT,
            ResourceArg::BotAlias => BOT_ALIAS,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    let provider_config = load_provider_config(cli.provider_config.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Schema { resource } => schema_command(resource, &provider_config)?,
        Commands::Validate { kind, config } => validate_command(kind, &config, cli.verbose)?,
        Commands::Expand { kind, config } => expand_command(kind, &config)?,
        Commands::ImportId { id } => import_id_command(&id)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_provider_config(path: Option<&Path>, verbose: bool) -> Result<ProviderConfig> {
    let Some(path) = path else {
        return Ok(ProviderConfig::default());
    };

    let config = ProviderConfig::load(path)
        .with_context(|| format!("Failed to load provider config {}", path.display()))?;

    if verbose {
        println!(
            "{} Loaded provider config: {}",
            "→".cyan(),
            path.display()
        );
        if let Some(region) = &config.region {
            println!("  Region: {}", region.yellow());
        }
        for kind in [ResourceKind::Bot, ResourceKind::BotAlias] {
            let timeouts = config.timeouts_for(kind);
            println!(
                "  {} timeouts: update {}s, delete {}s",
                kind, timeouts.update, timeouts.delete
            );
        }
    }

    Ok(config)
}

fn schema_command(resource: Option<ResourceArg>, config: &ProviderConfig) -> Result<()> {
    let resources = match resource {
        Some(resource) => vec![resource],
        None => vec![ResourceArg::Bot, ResourceArg::BotAlias],
    };

    let schemas: Vec<ResourceSchema> = resources
        .into_iter()
        .map(|resource| {
            let mut schema = resource.schema();
            let timeouts = config.timeouts_for(resource.kind());
            schema.update_timeout_secs = timeouts.update;
            schema.delete_timeout_secs = timeouts.delete;
            schema
        })
        .collect();

    let json = match schemas.as_slice() {
        [single] => serde_json::to_string_pretty(single),
        all => serde_json::to_string_pretty(all),
    }
    .context("Failed to serialize schema")?;

    println!("{}", json);
    Ok(())
}

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn report_validation(result: lex_provider_common::Result<()>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(ProviderError::Validation(errors)) => {
            println!("\n{}", "✗ Validation failed:".red().bold());
            for error in errors.iter() {
                println!("  • {}: {}", error.path.yellow(), error.message);
            }
            bail!("{} validation error(s)", errors.iter().count())
        }
        Err(err) => Err(err.into()),
    }
}

fn validate_command(kind: ResourceArg, path: &Path, verbose: bool) -> Result<()> {
    println!("{} Validating {}: {}", "→".cyan(), kind.kind(), path.display());

    match kind {
        ResourceArg::Bot => {
            let data: BotData = read_record(path)?;
            report_validation(validate_bot(&data))?;
            if verbose {
                println!("  Name: {}", data.name.yellow());
                println!("  Intents: {}", data.intent.len());
                println!(
                    "  Clarification messages: {}",
                    data.clarification_prompt.get().message.len()
                );
                println!(
                    "  Abort messages: {}",
                    data.abort_statement.get().message.len()
                );
            }
        }
        ResourceArg::BotAlias => {
            let data: BotAliasData = read_record(path)?;
            report_validation(validate_bot_alias(&data))?;
            if verbose {
                println!("  Name: {}", data.name.yellow());
                println!("  Bot: {} ({})", data.bot_name.yellow(), data.bot_version);
            }
        }
    }

    println!("\n{}", "✓ Record is valid!".green().bold());
    Ok(())
}

fn expand_command(kind: ResourceArg, path: &Path) -> Result<()> {
    let json = match kind {
        ResourceArg::Bot => {
            let data: BotData = read_record(path)?;
            report_validation(validate_bot(&data))?;
            debug!(bot = %data.name, "expanding bot");
            serde_json::to_string_pretty(&expand_bot(&data))
        }
        ResourceArg::BotAlias => {
            let data: BotAliasData = read_record(path)?;
            report_validation(validate_bot_alias(&data))?;
            debug!(alias = %data.name, "expanding bot alias");
            serde_json::to_string_pretty(&expand_bot_alias(&data))
        }
    }
    .context("Failed to serialize request")?;

    println!("{}", json);
    Ok(())
}

fn import_id_command(id: &str) -> Result<()> {
    println!("{} Parsing import id: {}", "→".cyan(), id);

    let data = parse_import_id(id)?;
    let yaml = serde_yaml::to_string(&data).context("Failed to serialize record")?;

    println!("\n{}", "✓ Import id parsed!".green().bold());
    println!("{}", yaml);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate_args() {
        let cli = Cli::try_parse_from([
            "lex-provider",
            "validate",
            "--kind",
            "bot-alias",
            "--config",
            "alias.yaml",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Validate { kind, config } => {
                assert_eq!(kind, ResourceArg::BotAlias);
                assert_eq!(config, PathBuf::from("alias.yaml"));
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_schema_honours_provider_timeouts() {
        let config = ProviderConfig::from_yaml_str("timeouts:\n  bot:\n    update: 90\n").unwrap();
        let timeouts = config.timeouts_for(ResourceArg::Bot.kind());

        assert_eq!(timeouts.update, 90);
        assert_eq!(ResourceArg::BotAlias.schema().name, "aws_lex_bot_alias");
    }

    #[test]
    fn test_import_id_rejects_missing_alias() {
        assert!(import_id_command("OrderFlowers").is_err());
        assert!(import_id_command("OrderFlowers.OrderFlowersProd").is_ok());
    }

    #[test]
    fn test_validate_and_expand_alias_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alias.yaml");
        fs::write(
            &path,
            "bot_name: OrderFlowers\nbot_version: \"1\"\nname: OrderFlowersProd\n",
        )
        .unwrap();

        assert!(validate_command(ResourceArg::BotAlias, &path, true).is_ok());
        assert!(expand_command(ResourceArg::BotAlias, &path).is_ok());

        fs::write(
            &path,
            "bot_name: OrderFlowers\nbot_version: latest\nname: Order__Prod\n",
        )
        .unwrap();
        let err = validate_command(ResourceArg::BotAlias, &path, false).unwrap_err();
        assert_eq!(err.to_string(), "2 validation error(s)");
    }
}
