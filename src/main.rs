//! VN KYC MCP Server - Main entry point
//!
//! Serves the phone, name and KYC tools over stdio using the Model Context
//! Protocol.

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vn_kyc_mcp_server::repositories::{
    InMemoryProfileRepository, JsonFileProfileRepository, ProfileRepository,
};
use vn_kyc_mcp_server::services::{KycService, KycServiceImpl, ProfileService, ProfileServiceImpl};
use vn_kyc_mcp_server::{Config, KycMcpServer, MetricsTracker};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let repository: Arc<dyn ProfileRepository> = match &config.profile_store_path {
        Some(path) => {
            let store = JsonFileProfileRepository::open(path).await.map_err(|e| {
                error!("Failed to open profile store {}: {}", path.display(), e);
                e
            })?;
            info!("Using profile store at {}", store.path().display());
            Arc::new(store)
        }
        None => {
            info!("PROFILE_STORE_PATH not set, profiles are kept in memory");
            Arc::new(InMemoryProfileRepository::new())
        }
    };

    let profile_service =
        Arc::new(ProfileServiceImpl::new(repository.clone())) as Arc<dyn ProfileService>;
    let kyc_service = Arc::new(KycServiceImpl::new(repository, config.max_kyc_note_length))
        as Arc<dyn KycService>;

    let server = KycMcpServer::new(
        profile_service,
        kyc_service,
        MetricsTracker::new(),
        config.default_currency,
    );

    info!(
        "VN KYC MCP Server initialized (default currency {}, max note length {})",
        config.default_currency, config.max_kyc_note_length
    );

    info!("Starting MCP server with stdio transport");
    vn_kyc_mcp_server::server::run_server(server).await?;

    info!("VN KYC MCP Server shutdown complete");
    Ok(())
}
