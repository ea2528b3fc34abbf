use pantheon_codex::{CatalogState, CodexServer, Config};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the MCP protocol
    pantheon_codex::tracing::init();

    let config = Config::load()?;
    tracing::info!("Starting pantheon-codex MCP server");

    // Serve immediately; tools see an empty catalog until the load finishes
    let catalog = Arc::new(CatalogState::new());
    catalog.spawn_load(config.dataset_path.clone());

    let server = CodexServer::with_catalog(config, catalog);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
