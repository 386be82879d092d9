//! mcpi - MCP server installer
//!
//! Usage:
//!   mcpi                         # Serve install tools over MCP stdio (default)
//!   mcpi serve --registry-only   # Serve without local-directory installs
//!   mcpi install <name> ...      # One-shot registry install
//!   mcpi install-local <path>    # One-shot local install
//!   mcpi config-path             # Print the resolved config document path

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcpi_core::config::{ConfigStore, resolve_config_path};
use mcpi_core::mcp::{
    InstallError, LaunchOptions, McpInstallReport, McpInstaller, McpServer, ServerSettings,
};
use mcpi_core::toolchain::SystemToolchain;

#[derive(Parser)]
#[command(name = "mcpi")]
#[command(about = "Install MCP servers into the host configuration", long_about = None)]
struct Cli {
    /// Host configuration document (defaults to the per-OS location)
    #[arg(long, short, global = true, env = "MCPI_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve install tools over MCP stdio
    Serve {
        /// Only offer registry installs (npx / uvx)
        #[arg(long)]
        registry_only: bool,
    },

    /// Install an MCP server by package name
    Install(InstallArgs),

    /// Install an MCP server from a local directory
    InstallLocal(InstallLocalArgs),

    /// Print the configuration document path
    ConfigPath,
}

#[derive(Args)]
struct InstallArgs {
    /// Package name (npm or PyPI)
    name: String,
    #[command(flatten)]
    launch: LaunchArgs,
}

#[derive(Args)]
struct InstallLocalArgs {
    /// Directory containing the server's package.json
    path: PathBuf,
    #[command(flatten)]
    launch: LaunchArgs,
}

#[derive(Args)]
struct LaunchArgs {
    /// Environment variable for the server (KEY=VALUE)
    #[arg(long, value_name = "KEY=VALUE")]
    env: Vec<String>,
    /// Write an empty `env` object when no --env is given
    #[arg(long, conflicts_with = "env")]
    empty_env: bool,
    /// Extra arguments passed to the server (after --)
    #[arg(last = true)]
    args: Vec<String>,
}

impl LaunchArgs {
    fn into_options(self) -> LaunchOptions {
        let env = if self.env.is_empty() && !self.empty_env {
            None
        } else {
            Some(self.env)
        };
        LaunchOptions::new(self.args, env)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries protocol frames
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcpi=info,mcpi_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config)?;
    tracing::debug!(config = %config_path.display(), "Resolved config path");

    match cli.command {
        None => run_serve(config_path, false).await,
        Some(Commands::Serve { registry_only }) => run_serve(config_path, registry_only).await,
        Some(Commands::Install(args)) => {
            let installer = installer(config_path);
            let outcome = installer
                .install_registry_server(&args.name, &args.launch.into_options())
                .await;
            report(outcome)
        }
        Some(Commands::InstallLocal(args)) => {
            let installer = installer(config_path);
            let outcome = installer
                .install_local_server(&args.path, &args.launch.into_options())
                .await;
            report(outcome)
        }
        Some(Commands::ConfigPath) => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

async fn run_serve(config_path: PathBuf, registry_only: bool) -> Result<()> {
    let settings = ServerSettings::new(config_path).registry_only(registry_only);
    let server = McpServer::new(settings, SystemToolchain::new());
    server.serve_stdio().await
}

fn installer(config_path: PathBuf) -> McpInstaller<SystemToolchain> {
    McpInstaller::new(ConfigStore::new(config_path), SystemToolchain::new())
}

fn report(outcome: std::result::Result<McpInstallReport, InstallError>) -> Result<()> {
    match outcome {
        Ok(report) => {
            println!("{}", report.message());
            Ok(())
        }
        Err(err) => anyhow::bail!("{}", err),
    }
}
