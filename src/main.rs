use lead_scoring_api::app::{api_routes, build_app};
use lead_scoring_api::classifier::HttpClassifier;
use lead_scoring_api::config::Config;
use lead_scoring_api::handlers::AppState;
use lead_scoring_api::lead_store::LeadStore;
use lead_scoring_api::scoring::{InitialScorer, ModelScorer, StrategyKind};
use lead_scoring_api::services::LeadScoringService;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the initial scorer for the configured strategy.
fn build_scorer(config: &Config) -> anyhow::Result<InitialScorer> {
    match config.strategy {
        StrategyKind::Heuristic => Ok(InitialScorer::Heuristic),
        StrategyKind::Model => {
            let endpoint = config
                .model_endpoint_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("MODEL_ENDPOINT_URL is required"))?;
            let classifier = HttpClassifier::new(endpoint, config.model_timeout)
                .map_err(|e| anyhow::anyhow!(e))?;
            Ok(InitialScorer::Model(ModelScorer::new(
                Arc::new(classifier),
                config.prediction_cache_ttl,
            )))
        }
    }
}

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - The scoring strategy and lead store.
/// - HTTP routes and middleware (CORS, Rate Limiting).
///
/// It then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_scoring_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let scorer = build_scorer(&config)?;
    tracing::info!("Initial scoring strategy: {}", scorer.kind());

    // One store per process, owned by the scoring service
    let store = Arc::new(LeadStore::new());
    let app_state = Arc::new(AppState {
        scoring: LeadScoringService::new(scorer, store),
    });

    // Configure rate limiter per client IP
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?,
    );

    // Health routes bypass rate limiting
    let limited_api = api_routes().layer(ServiceBuilder::new().layer(GovernorLayer {
        config: governor_conf,
    }));

    let app = build_app(app_state, limited_api, config.static_dir.as_deref());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
