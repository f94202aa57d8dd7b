use dotenvy::dotenv;
use feedesk::config::ServerConfig;
use feedesk::router::init_router;
use feedesk::state::init_app_state;
use feedesk_observability::{init_basic_console_logging, init_metrics};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_basic_console_logging();

    let server_config = ServerConfig::from_env()?;
    let state = init_app_state().await?.with_metrics(init_metrics());
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(server_config.addr).await?;
    info!(addr = %server_config.addr, "Server running");
    info!("Swagger UI available at http://{}/swagger-ui", server_config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
