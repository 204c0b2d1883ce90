// Mavilda Bot HTTP entry point

use std::sync::Arc;

use mavilda_core::actors::supervisor::SupervisorHandle;
use mavilda_core::config::ServerConfig;
use mavilda_core::server;
use mavilda_core::session::{BoundedSessionStore, InMemorySessionStore, SessionStore};
use mavilda_core::telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = ServerConfig::from_env()?;
    telemetry::init_subscriber(config.log_format)?;

    let store: Arc<dyn SessionStore> = match config.session_capacity {
        Some(capacity) => {
            info!(capacity = capacity.get(), "Using bounded session store");
            Arc::new(BoundedSessionStore::new(capacity))
        }
        None => Arc::new(InMemorySessionStore::new()),
    };
    let supervisor = SupervisorHandle::new(store);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("{} listening on {}", server::SERVICE_NAME, addr);

    axum::serve(listener, server::router(supervisor.clone())).await?;
    supervisor.shutdown().await?;
    Ok(())
}
