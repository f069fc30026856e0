use anyhow::Context;
use mock_server::Settings;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mock_server=debug,tower_http=debug")),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let settings = Settings {
        api_key: std::env::var("MOCK_API_KEY").ok().filter(|key| !key.is_empty()),
        short_base: std::env::var("SHORT_BASE_URL").unwrap_or_else(|_| format!("http://{addr}")),
    };

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, auth = settings.api_key.is_some(), "mock backend listening");
    mock_server::run(listener, settings).await?;
    Ok(())
}
