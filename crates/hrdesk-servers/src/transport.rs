use anyhow::{Context, Result};
use axum::Router;
use rmcp::{
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpService,
    },
    RoleServer, Service, ServiceExt,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Serve one MCP session over stdin/stdout until the client disconnects
pub async fn serve_stdio<S>(server: S) -> Result<()>
where
    S: Service<RoleServer> + Send + 'static,
{
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .context("Failed to start stdio MCP session")?;
    let reason = running.waiting().await?;
    tracing::info!(?reason, "stdio session closed");
    Ok(())
}

/// Streamable-HTTP endpoint mounted at `path`
///
/// `factory` builds one server per session; shared state lives behind an
/// `Arc` captured by the closure.
pub fn streamable_http_router<S, F>(factory: F, path: &str) -> Router
where
    S: Service<RoleServer> + Send + 'static,
    F: Fn() -> std::io::Result<S> + Send + Sync + 'static,
{
    let service = StreamableHttpService::new(
        factory,
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let path = mount_path(path);
    let router = if path.is_empty() {
        // axum refuses to nest at the root
        Router::new().fallback_service(service)
    } else {
        Router::new().nest_service(&path, service)
    };

    router.layer(TraceLayer::new_for_http())
}

/// `mcp`, `/mcp/` and `/mcp` all mount at `/mcp`; the root is empty
fn mount_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Serve `router` on an already-bound listener until ctrl-c
pub async fn serve_streamable_http(listener: TcpListener, router: Router) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "streamable HTTP MCP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
