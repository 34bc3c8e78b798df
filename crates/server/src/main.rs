use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod config;

use config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "appsdk")]
#[command(about = "Apps SDK widget server - MCP tools with embeddable HTML widgets", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "appsdk.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "PORT")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Base URL used to fetch widget pages from this server at startup
    #[arg(long, env = "APPSDK_BASE_URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appsdk=info,appsdk_mcp=info,tower_http=debug".into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    tracing::info!("Starting Apps SDK widget server");

    // Load configuration; the CLI base URL wins over the file
    let mut config = ServerConfig::load(&args.config)?;
    if let Some(base_url) = args.base_url {
        config.prerender.base_url = Some(base_url);
    }

    let addr = format!("{}:{}", args.host, args.port);
    let base_url = config.base_url(&args.host, args.port);
    tracing::info!("Widget pages will be fetched from {}", base_url);

    api::serve(&addr, &base_url, config).await?;

    Ok(())
}
