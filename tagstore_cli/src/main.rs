use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use tagstore_cli::config::{AppConfig, ConfigManager};
use tagstore_cli::error::{CliError, CliResult};
use tagstore_cli::orchestrators::tag_orchestrator::{TagOrchestrator, parse_attributes};
use tagstore_cli::output::OutputFormat;
use tagstore_cli::terminal;
use tagstore_core::{FailurePolicy, MemoryTagRepository, TagStore};

#[derive(Parser)]
#[command(name = "tagstore")]
#[command(author, version, about = "Content-addressed tag store", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create tags in a profile, in the order given
    Add {
        /// Profile the tags belong to
        #[arg(short, long)]
        profile: String,

        /// Tag names
        #[arg(required = true)]
        names: Vec<String>,

        /// Shared attribute applied to every tag (KEY=VALUE, repeatable)
        #[arg(short = 'a', long = "attr", value_name = "KEY=VALUE")]
        attributes: Vec<String>,

        /// Keep going after a failing name instead of stopping
        #[arg(long)]
        best_effort: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Rename a tag, moving it to the id of its new name
    Rename {
        from: String,
        to: String,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Move a tag to the trash
    Trash {
        name: String,

        /// Flag the tag for permanent deletion instead
        #[arg(long)]
        purge: bool,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Bring a tag back from the trash
    Restore {
        name: String,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List stored tags
    List {
        /// Only show tags of this profile
        #[arg(short, long)]
        profile: Option<String>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the id a tag name maps to
    Id { name: String },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., tags.failure_policy)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., tags.failure_policy)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,

    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("tagstore_core", log::LevelFilter::Debug)
            .filter_module("tagstore_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(error) = run(cli.command).await {
        eprint!("{}", error.format_for_user(cli.debug));
        std::process::exit(error.exit_code() as i32);
    }
}

async fn run(command: Commands) -> CliResult<()> {
    let use_color = terminal::supports_color();

    let output = match command {
        Commands::Config { command } => return config_command(command),
        Commands::Add {
            profile,
            names,
            attributes,
            best_effort,
            format,
        } => {
            let mut config = load_config()?;
            if best_effort {
                config.tags.failure_policy = FailurePolicy::BestEffort;
            }
            let shared = parse_attributes(&attributes)?;
            let format = resolve_format(format, &config)?;
            let orchestrator = TagOrchestrator::new(&config, use_color).await?;
            orchestrator.add(&profile, &names, &shared, format).await?
        }
        Commands::Rename { from, to, format } => {
            let config = load_config()?;
            let format = resolve_format(format, &config)?;
            let orchestrator = TagOrchestrator::new(&config, use_color).await?;
            orchestrator.rename(&from, &to, format).await?
        }
        Commands::Trash {
            name,
            purge,
            format,
        } => {
            let config = load_config()?;
            let format = resolve_format(format, &config)?;
            let orchestrator = TagOrchestrator::new(&config, use_color).await?;
            orchestrator.trash(&name, purge, format).await?
        }
        Commands::Restore { name, format } => {
            let config = load_config()?;
            let format = resolve_format(format, &config)?;
            let orchestrator = TagOrchestrator::new(&config, use_color).await?;
            orchestrator.restore(&name, format).await?
        }
        Commands::List { profile, format } => {
            let config = load_config()?;
            let format = resolve_format(format, &config)?;
            let orchestrator = TagOrchestrator::new(&config, use_color).await?;
            orchestrator.list(profile.as_deref(), format).await?
        }
        Commands::Id { name } => {
            // Ids depend only on the name, so no database is opened
            let config = load_config()?;
            let store = TagStore::new(config.tags, Arc::new(MemoryTagRepository::new()));
            TagOrchestrator::with_store(store, use_color)
                .id(&name)
                .await?
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn load_config() -> CliResult<AppConfig> {
    ConfigManager::new().load().map_err(|e| {
        CliError::misuse(&format!("{e:#}"))
            .with_suggestion("Inspect the file printed by 'tagstore config path'")
    })
}

fn resolve_format(format: Option<OutputFormat>, config: &AppConfig) -> CliResult<OutputFormat> {
    match format {
        Some(format) => Ok(format),
        None => OutputFormat::from_string(&config.output.default_format)
            .map_err(|e| CliError::misuse(&e.to_string())),
    }
}

fn config_command(command: ConfigCommand) -> CliResult<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            let value = manager
                .get(&key)
                .map_err(|e| CliError::misuse(&format!("{e:#}")))?;
            println!("{value}");
        }
        ConfigCommand::Set { key, value } => {
            manager
                .set(&key, &value)
                .map_err(|e| CliError::misuse(&format!("{e:#}")))?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("Config file: {}", manager.get_config_path().display());
            for (key, value) in items {
                println!("{key} = {value}");
            }
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}
