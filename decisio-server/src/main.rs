//! decisio server binary.

use decisio_server::config::ServerConfig;
use decisio_server::{build_state, routes, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_from_env();

    let config = ServerConfig::from_env()?;
    let addr = config.bind_addr();

    let state = build_state(config);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "decisio server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
