mod config;
mod errors;
mod interview;
mod llm_client;
mod monitoring;
mod routes;
mod safety;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::feedback::LlmFeedbackGenerator;
use crate::interview::interviewer::Interviewer;
use crate::interview::questions::QuestionBank;
use crate::interview::store::SessionStore;
use crate::llm_client::LlmClient;
use crate::monitoring::{HttpSink, MonitoringSink, TracingSink};
use crate::routes::build_router;
use crate::safety::config::GuardConfig;
use crate::safety::GuardPipeline;
use crate::state::AppState;

/// Headroom on top of the generation timeout before the HTTP layer gives up on a request.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);
const MONITORING_TIMEOUT: Duration = Duration::from_secs(10);
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{crate_name}={level},monitoring={level},tower_http={level}",
                crate_name = env!("CARGO_CRATE_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Question bank (static for the life of the process)
    let question_bank = match &config.question_bank_path {
        Some(path) => QuestionBank::from_file(path)?,
        None => QuestionBank::default(),
    };
    info!("Question bank loaded: {} roles", question_bank.roles().len());

    // Safety gate
    let guard_config = match &config.guard_config_path {
        Some(path) => GuardConfig::from_file(path)?,
        None => GuardConfig::default(),
    };
    let gate = GuardPipeline::from_config(&guard_config).context("Invalid guard blocklist")?;
    info!(
        "Safety gate: pii={:?} card_pattern={:?} blocklist_terms={}",
        guard_config.pii_types,
        guard_config.card_pattern,
        guard_config.blocklist.len()
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.generation_timeout)
        .context("Failed to build LLM HTTP client")?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.generation_timeout
    );

    // Monitoring sink (HTTP collector when configured, logs otherwise)
    let monitor: Arc<dyn MonitoringSink> = match &config.monitoring_url {
        Some(url) => {
            let client = reqwest::Client::builder()
                .timeout(MONITORING_TIMEOUT)
                .build()
                .context("Failed to build monitoring HTTP client")?;
            info!("Monitoring events forwarded to {url}");
            Arc::new(HttpSink::new(
                client,
                url.clone(),
                config.monitoring_token.clone(),
            ))
        }
        None => Arc::new(TracingSink),
    };

    let interviewer = Interviewer::new(
        Arc::new(LlmFeedbackGenerator(llm)),
        Arc::new(gate),
        monitor,
        config.generation_timeout,
    );

    // Session store, with idle sessions swept in the background
    let sessions = SessionStore::new(config.session_ttl);
    sessions.spawn_sweeper(SESSION_SWEEP_INTERVAL.min(config.session_ttl));
    info!("Sessions expire after {:?} idle", config.session_ttl);

    // Build app state
    let state = AppState {
        question_bank: Arc::new(question_bank),
        interviewer: Arc::new(interviewer),
        sessions,
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(
                config.generation_timeout + REQUEST_TIMEOUT_MARGIN,
            ))
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
