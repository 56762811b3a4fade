use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vdrone_cms::config::{self, CmsConfig};
use vdrone_cms::service::ContentService;
use vdrone_cms::store::Store;
use vdrone_cms::telemetry::init_logging;
use vdrone_cms::{CmsServer, output, seed};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "vdrone-cms")]
#[command(about = "Content backend for the VDRONE site")]
#[command(long_about = "\
Content backend for the VDRONE site

Serves site content, services, portfolio, videos and photos as JSON, and
accepts admin edits and visitor contact messages.

Configuration is read from the environment, then vdrone.toml (or --config),
then built-in defaults. The most common settings:

  DATABASE_URL     memory | file:///var/lib/vdrone | /var/lib/vdrone
  DATABASE_NAME    subdirectory of the file store (default: vdrone)
  LOG_LEVEL        tracing filter (RUST_LOG wins when set)

Without DATABASE_URL the server still starts and serves defaults.

Run 'vdrone-cms gen-config' to generate a documented vdrone.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (default: ./vdrone.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Seed empty collections and exit
    Seed,
    /// Show store availability and document counts
    Status,
    /// Print a stock vdrone.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = load(config_path)?;
            tracing::info!(
                version = version_string(),
                addr = %config.server.listen_addr,
                store_configured = config.store.url.is_some(),
                database = %config.store.database_name,
                seed_on_start = config.server.seed_on_start,
                log_format = ?config.log_format(),
                "Starting VDRONE CMS"
            );
            CmsServer::new(&config).await.run().await?;
        }
        Command::Seed => {
            let store = connect(&load(config_path)?).await;
            output::print_seed_report(&seed::seed_all(&store).await);
        }
        Command::Status => {
            let service = ContentService::new(connect(&load(config_path)?).await);
            output::print_status(&service.status().await);
        }
        Command::GenConfig => {
            print!("{}", config::config_template());
        }
    }

    Ok(())
}

/// Load layered config and start logging.
fn load(path: Option<&Path>) -> Result<CmsConfig, config::ConfigError> {
    let config = config::load_config(path)?;
    init_logging(&config.log);
    Ok(config)
}

async fn connect(config: &CmsConfig) -> Store {
    Store::connect(config.store.url.as_deref(), &config.store.database_name).await
}
