use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use pagetalk_api::{router, AppState};
use pagetalk_browser::WebDriverLoader;
use pagetalk_common::observability::{init_logging, LogConfig};
use pagetalk_config::{PagetalkConfig, PagetalkConfigLoader};
use pagetalk_llm::chat::ChatCompletionsClient;
use pagetalk_session::SessionStore;

#[derive(Parser, Debug)]
#[command(name = "pagetalk", about = "Scrape a web page and chat about it")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "pagetalk.yaml")]
    config: String,

    /// Mirror log output to stderr.
    #[arg(long)]
    log_stderr: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins)
    let cfg: PagetalkConfig = PagetalkConfigLoader::new().with_file(&cli.config).load()?;

    let log_path = init_logging(LogConfig {
        emit_stderr: cli.log_stderr,
        ..LogConfig::default()
    })?;
    tracing::info!(log_path = %log_path.display(), "logging.initialised");

    let llm = ChatCompletionsClient::new(
        &cfg.inference.endpoint,
        cfg.inference.api_key.clone(),
        cfg.inference.model.clone(),
    )
    .context("failed to construct inference client")?;

    let loader = WebDriverLoader::new(&cfg.scrape.webdriver_url, cfg.scrape.headless);
    let store = SessionStore::new(Duration::from_secs(cfg.session.ttl_secs));

    let state = Arc::new(AppState::new(
        store,
        Arc::new(llm),
        Arc::new(loader),
        cfg.scrape.truncation_budget,
        &cfg.session.secret,
    ));

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, model = %cfg.inference.model, "server.listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with an error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "shutdown.signal_failed");
        return;
    }
    tracing::info!("shutdown.requested");
}
