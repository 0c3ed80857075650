use crate::scoring::StrategyKind;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub strategy: StrategyKind,
    pub model_endpoint_url: Option<String>,
    pub model_timeout: Duration,
    pub prediction_cache_ttl: Duration,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let strategy = match var("SCORING_STRATEGY") {
            Some(value) => StrategyKind::parse(&value).ok_or_else(|| {
                anyhow::anyhow!("SCORING_STRATEGY must be 'heuristic' or 'model', got '{}'", value)
            })?,
            None => StrategyKind::Heuristic,
        };

        let model_endpoint_url = var("MODEL_ENDPOINT_URL")
            .map(|url| {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    anyhow::bail!("MODEL_ENDPOINT_URL must start with http:// or https://");
                }
                Ok(url)
            })
            .transpose()?;

        if strategy == StrategyKind::Model && model_endpoint_url.is_none() {
            anyhow::bail!("MODEL_ENDPOINT_URL is required when SCORING_STRATEGY=model");
        }

        let config = Self {
            port: var("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            strategy,
            model_endpoint_url,
            model_timeout: Duration::from_secs(positive(
                var("MODEL_TIMEOUT_SECS"),
                "MODEL_TIMEOUT_SECS",
                5,
            )?),
            prediction_cache_ttl: Duration::from_secs(
                var("PREDICTION_CACHE_TTL_SECS")
                    .map(|ttl| {
                        ttl.parse::<u64>().map_err(|_| {
                            anyhow::anyhow!("PREDICTION_CACHE_TTL_SECS must be a number of seconds")
                        })
                    })
                    .transpose()?
                    .unwrap_or(3600),
            ),
            rate_limit_per_second: positive(
                var("RATE_LIMIT_PER_SECOND"),
                "RATE_LIMIT_PER_SECOND",
                10,
            )?,
            rate_limit_burst: u32::try_from(positive(
                var("RATE_LIMIT_BURST"),
                "RATE_LIMIT_BURST",
                20,
            )?)
            .map_err(|_| anyhow::anyhow!("RATE_LIMIT_BURST is too large"))?,
            static_dir: var("STATIC_DIR").map(PathBuf::from),
        };

        // Log successful configuration load
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Scoring strategy: {}", config.strategy);
        if let Some(ref url) = config.model_endpoint_url {
            tracing::debug!("Model endpoint: {} (timeout {:?})", url, config.model_timeout);
        }
        tracing::debug!(
            "Rate limit: {}/s, burst {}",
            config.rate_limit_per_second,
            config.rate_limit_burst
        );
        if let Some(ref dir) = config.static_dir {
            tracing::info!("Serving static files from {}", dir.display());
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

fn positive(value: Option<String>, name: &str, default: u64) -> anyhow::Result<u64> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(parsed) if parsed > 0 => Ok(parsed),
            _ => anyhow::bail!("{} must be a positive integer", name),
        },
    }
}
