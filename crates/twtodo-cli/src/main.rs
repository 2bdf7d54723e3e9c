//! twtodo CLI - Command line interface for the twtodo sync server.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use twtodo_mstodo::GraphClient;
use twtodo_server::http::responses::{ErrorResponse, PullRequest, PullResponse};
use twtodo_server::{check_identity_attributes, logging, Config};
use twtodo_taskwarrior::ensure_identity_attributes;

/// twtodo CLI - Microsoft To-Do to Taskwarrior sync
#[derive(Parser)]
#[command(name = "twtodo")]
#[command(about = "Pull Microsoft To-Do tasks into Taskwarrior", long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sync server address (defaults to http://<[server] bind_addr>)
    #[arg(short, long, global = true)]
    addr: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the server to pull a To-Do list
    Pull {
        /// To-Do list id (overrides [sync] list_id)
        #[arg(short, long)]
        list: Option<String>,
    },

    /// Create the Taskwarrior UDAs the sync relies on
    Setup,

    /// List the To-Do lists of the signed-in user
    Lists,

    /// Check that Taskwarrior is ready for syncing
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init("warn");

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Pull { list } => {
            let addr = cli
                .addr
                .unwrap_or_else(|| format!("http://{}", config.server.bind_addr));
            pull(&config, &addr, list.as_deref()).await?;
        }
        Commands::Setup => {
            setup(&config).await?;
        }
        Commands::Lists => {
            lists(&config).await?;
        }
        Commands::Check => {
            check(&config).await?;
        }
    }

    Ok(())
}

async fn pull(
    config: &Config,
    addr: &str,
    list: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let list_id = config.list_id(list)?;

    let response = reqwest::Client::new()
        .post(format!("{}/v1/pull", addr.trim_end_matches('/')))
        .json(&PullRequest {
            list_id: list_id.into_inner(),
        })
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let reason = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        return Err(format!("Pull failed: {reason}").into());
    }

    let body: PullResponse = response.json().await?;
    println!("{}", body.message);

    Ok(())
}

async fn setup(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = config.local_store();
    let created = ensure_identity_attributes(&store).await?;

    if created.is_empty() {
        println!("Taskwarrior UDAs already defined.");
    } else {
        for name in created {
            println!("Created UDA '{name}'");
        }
    }

    Ok(())
}

async fn lists(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = GraphClient::new(&config.remote.base_url, config.access_token()?)?;
    let lists = client.lists().await?;

    println!("To-Do lists ({}):", lists.len());
    println!("{:<40}  {}", "ID", "NAME");
    println!("{}", "-".repeat(80));

    for list in lists {
        println!("{:<40}  {}", list.id, list.display_name);
    }

    Ok(())
}

async fn check(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = config.local_store();
    check_identity_attributes(&store).await?;
    println!("Taskwarrior UDAs present.");

    if let Ok(token) = config.access_token() {
        let client = GraphClient::new(&config.remote.base_url, token)?;
        println!("Signed in to To-Do as {}.", client.whoami().await?);
    } else {
        println!("No access token configured; skipped To-Do check.");
    }

    Ok(())
}
