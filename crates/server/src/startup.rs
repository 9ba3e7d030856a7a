use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use tokio::net::TcpListener;
use tracing::info;

use crate::routes::{self, SharedStore};
use service::runtime;

/// Resolved server settings: config file values overridden by flags.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
}

/// Serve the router for `store` on an already-bound listener until
/// `shutdown` resolves.
pub async fn serve<S>(listener: TcpListener, store: SharedStore, shutdown: S) -> std::io::Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let app = routes::build_router(store);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

/// Public entry: touch the record file, open the store, bind and serve until
/// Ctrl+C.
pub async fn run(settings: ServerSettings) -> anyhow::Result<()> {
    let store = runtime::open_store(&settings.db_path).await?;

    let listener = TcpListener::bind(settings.addr).await?;
    let addr = listener.local_addr()?;
    info!(%addr, db = %settings.db_path.display(), "listen");

    serve(listener, Arc::clone(&store) as SharedStore, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}
