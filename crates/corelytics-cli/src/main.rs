mod config;
mod generate_cmd;
mod serve_cmd;
mod tree_cmds;

#[cfg(test)]
mod test_util;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use corelytics_core::Engine;
use corelytics_core::gateway::OpenAiGenerator;
use corelytics_core::intent::IntentRequest;
use corelytics_core::tree::TreeStore;

use config::CorelyticsConfig;
use tree_cmds::Listing;

#[derive(Parser)]
#[command(
    name = "corelytics",
    version,
    about = "Decision-tree driven email brief compiler and generation service"
)]
struct Cli {
    /// Decision tree file, .json or .toml (overrides CORELYTICS_TREE_PATH)
    #[arg(long, global = true)]
    tree: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a corelytics config file
    Init {
        /// API key for the generation service
        #[arg(long)]
        api_key: Option<String>,
        /// Model name sent to the generation service
        #[arg(long)]
        model: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Run the HTTP API
    Serve {
        /// Address to bind (default from config, else 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (default from config, else 8000)
        #[arg(long)]
        port: Option<u16>,
    },
    /// List domains
    Domains,
    /// List recipients in a domain
    Recipients { domain: String },
    /// List categories for a domain and recipient
    Categories { domain: String, recipient: String },
    /// List scenarios for a category
    Scenarios {
        domain: String,
        recipient: String,
        category: String,
    },
    /// Print the compiled brief without calling the generation service
    Brief {
        #[command(flatten)]
        path: PathArgs,
    },
    /// Generate an email
    Generate {
        #[command(flatten)]
        path: PathArgs,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// A path through the tree, as positional labels plus an optional scenario.
#[derive(Args)]
struct PathArgs {
    domain: String,
    recipient: String,
    category: String,
    /// Scenario under the category (defaults to the category itself)
    #[arg(long)]
    scenario: Option<String>,
}

impl PathArgs {
    fn into_request(self) -> IntentRequest {
        IntentRequest {
            domain: self.domain,
            recipient: self.recipient,
            category: self.category,
            scenario: self.scenario,
        }
    }
}

/// Execute the `corelytics init` command: write config file.
fn cmd_init(
    tree: Option<&Path>,
    api_key: Option<String>,
    model: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let tree_path = tree
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_TREE_PATH));

    let cfg = config::ConfigFile {
        tree: config::TreeSection {
            path: Some(tree_path.clone()),
        },
        llm: config::LlmSection {
            api_key: api_key.clone(),
            model,
            ..Default::default()
        },
        server: config::ServerSection::default(),
    };

    config::save_config_to(&cfg, &path)?;

    println!("Config written to {}", path.display());
    println!("  tree.path = {}", tree_path.display());
    match api_key {
        Some(key) => println!("  llm.api_key = {}", config::mask_secret(&key)),
        None => println!(
            "  llm.api_key not set; export {} before `serve` or `generate`",
            config::ENV_API_KEY
        ),
    }

    Ok(())
}

fn load_tree(config: &CorelyticsConfig) -> anyhow::Result<TreeStore> {
    TreeStore::load(&config.tree_path).with_context(|| {
        format!(
            "failed to load decision tree from {}",
            config.tree_path.display()
        )
    })
}

fn build_engine(config: &CorelyticsConfig) -> anyhow::Result<Engine> {
    let settings = config.llm.settings()?;
    let store = load_tree(config)?;
    let generator = OpenAiGenerator::new(settings);
    Ok(Engine::new(Arc::new(store), Arc::new(generator)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let resolve = || CorelyticsConfig::resolve(cli.tree.as_deref());

    match cli.command {
        Commands::Init {
            api_key,
            model,
            force,
        } => {
            cmd_init(cli.tree.as_deref(), api_key, model, force)?;
        }
        Commands::Serve { bind, port } => {
            let config = resolve()?;
            let engine = build_engine(&config)?;
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let port = port.unwrap_or(config.server.port);
            serve_cmd::run_serve(engine, &bind, port, config.server.request_timeout).await?;
        }
        Commands::Domains => {
            let config = resolve()?;
            tree_cmds::run_listing(&load_tree(&config)?, &Listing::Domains)?;
        }
        Commands::Recipients { domain } => {
            let config = resolve()?;
            tree_cmds::run_listing(&load_tree(&config)?, &Listing::Recipients { domain })?;
        }
        Commands::Categories { domain, recipient } => {
            let config = resolve()?;
            let listing = Listing::Categories { domain, recipient };
            tree_cmds::run_listing(&load_tree(&config)?, &listing)?;
        }
        Commands::Scenarios {
            domain,
            recipient,
            category,
        } => {
            let config = resolve()?;
            let listing = Listing::Scenarios {
                domain,
                recipient,
                category,
            };
            tree_cmds::run_listing(&load_tree(&config)?, &listing)?;
        }
        Commands::Brief { path } => {
            let config = resolve()?;
            generate_cmd::run_brief(&load_tree(&config)?, &path.into_request())?;
        }
        Commands::Generate { path, json } => {
            let config = resolve()?;
            let engine = build_engine(&config)?;
            generate_cmd::run_generate(&engine, &path.into_request(), json).await?;
        }
    }

    Ok(())
}
