//! twtodo Sync Server
//!
//! Long-running daemon that pulls Microsoft To-Do tasks into Taskwarrior on
//! request from the `twtodo` CLI.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use twtodo_mstodo::GraphClient;
use twtodo_server::{check_identity_attributes, http, logging, AppState, Config, Reconciler};

/// twtodo sync server.
#[derive(Parser, Debug)]
#[command(name = "twtodo-server", about = "Pulls Microsoft To-Do tasks into Taskwarrior")]
struct Args {
    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides [server] bind_addr)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logging::init("info");

    info!("twtodo server starting");

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }

    let remote = GraphClient::new(&config.remote.base_url, config.access_token()?)?;
    let me = remote.whoami().await?;
    info!(user = %me, "Authenticated against Microsoft Graph");

    let store = config.local_store();
    check_identity_attributes(&store).await?;

    let state = AppState::new(Reconciler::new(Arc::new(store), Arc::new(remote)));

    let listener = TcpListener::bind(&config.server.bind_addr).await?;
    info!(addr = %config.server.bind_addr, "Listening for sync requests");

    http::serve(listener, state).await?;

    Ok(())
}
