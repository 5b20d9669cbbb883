use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use event_sourcing::shell::composition::{Composition, compose_from_config};
use event_sourcing::shell::config::Config;
use event_sourcing::shell::http::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;
    let Composition { state, mut host } = compose_from_config(&config).await?;
    host.start()?;

    let app = router(state).layer(TraceLayer::new_for_http());

    tracing::info!("HTTP endpoint: http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    host.stop().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "could not listen for ctrl-c");
    }
    tracing::info!("shutting down");
}
