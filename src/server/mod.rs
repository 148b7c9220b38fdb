//! MCP server for Vietnamese customer onboarding.
//!
//! Exposes the validators and the profile/KYC services to AI assistants
//! through the Model Context Protocol.

pub mod handlers;

pub use handlers::KycMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server over stdio until the client disconnects.
///
/// # Returns
/// An error if the server fails to start or encounters a fatal error
pub async fn run_server(server: KycMcpServer) -> Result<()> {
    let metrics = server.metrics().clone();

    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    tracing::info!("{}", metrics.summary());
    Ok(())
}
