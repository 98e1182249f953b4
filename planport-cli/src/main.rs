//! Planport CLI - import learning-plan tasks into GitHub Projects
//!
//! Creates one issue per task, adds it to a project board and sets its
//! status field when the project has one.

mod commands;

use clap::{Parser, Subcommand};
use planport_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{FieldsArgs, ImportArgs};

/// Planport: import learning-plan tasks into a GitHub project board
#[derive(Parser, Debug)]
#[command(name = "planport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// GitHub token (defaults to GH_PAT, GITHUB_TOKEN, then the secrets file)
    #[arg(long, global = true)]
    token: Option<String>,

    /// GraphQL endpoint (overrides config and env)
    #[arg(long, global = true, env = "PLANPORT_GRAPHQL_URL")]
    graphql_url: Option<String>,

    /// Name of the project's status field (overrides config and env)
    #[arg(long, global = true, env = "PLANPORT_STATUS_FIELD")]
    status_field: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import tasks from a JSON file
    #[command(visible_alias = "i")]
    Import(ImportArgs),

    /// List the fields defined on a project
    Fields(FieldsArgs),

    /// Show current configuration
    Config,

    /// Write a secrets file template
    InitSecrets,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let config = Config::load_with_overrides(cli.graphql_url.clone(), cli.status_field.clone())?;

    if cli.verbose {
        tracing::info!(
            graphql_url = %config.github.graphql_url,
            status_field = %config.github.status_field,
            "Configuration loaded"
        );
    }

    let result = match cli.command {
        Some(Commands::Import(args)) => args.execute(&config, cli.token).await,
        Some(Commands::Fields(args)) => args.execute(&config, cli.token).await,
        Some(Commands::Config) => {
            print_config(&config);
            Ok(())
        }
        Some(Commands::InitSecrets) => {
            let path = Secrets::create_template()?;
            println!("Created {}", path.display());
            println!("Edit it and add your GitHub token.");
            Ok(())
        }
        Some(Commands::Version) => {
            println!("planport {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("planport - import learning-plan tasks into GitHub Projects");
            println!();
            println!("Use --help for usage information");
            Ok(())
        }
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

fn print_config(config: &Config) {
    println!("Planport Configuration");
    println!("======================");
    println!();
    println!("GitHub Settings:");
    println!("  graphql_url: {}", config.github.graphql_url);
    println!("  field_page_size: {}", config.github.field_page_size);
    println!("  status_field: {}", config.github.status_field);
    println!();
    println!("Import Settings:");
    println!("  input: {}", config.import.input.display());
    println!();

    if let Some(path) = Config::default_config_path() {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }

    if let Some(path) = Secrets::default_secrets_path() {
        println!("Secrets file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - run `planport init-secrets` or set GH_PAT)");
        }
    }
}
