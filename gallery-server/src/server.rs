use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::routes;
use crate::state::AppState;

/// Binds the listener and serves the gallery API
///
/// # Errors
///
/// Returns an error if the server fails to bind to the specified address
pub async fn start(state: AppState) -> anyhow::Result<()> {
    let app = routes::router(state);

    let addr = SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8000), |p| p.parse())?,
    ));
    let listener = TcpListener::bind(addr).await?;
    info!("Gallery server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
