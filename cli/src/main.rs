use anyhow::Context;
use clap::Parser;
use shortlink_cli::{run, Cli};
use shortlink_core::{ClientConfig, ShortLinkClient};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("invalid client configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let client = ShortLinkClient::new(config);
    let output = run(&cli, &client)?;
    println!("{output}");
    Ok(())
}
