use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    /// Seconds a cached news category stays valid.
    pub news_ttl_secs: u64,
    pub max_news_items: usize,
    pub max_output_tokens: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let api_key = env::var("GMS_API_KEY").context(
            "GMS_API_KEY not found.\n\n\
            To fix this, create ~/.config/news-chat/.env with:\n  \
            GMS_API_KEY=your_key_here\n\n\
            Optional settings: GMS_MODEL, GMS_API_ENDPOINT, NEWS_FETCH_INTERVAL,\n  \
            MAX_NEWS_ITEMS, DEFAULT_MAX_TOKENS",
        )?;

        Ok(Self {
            api_key,
            model: env::var("GMS_MODEL").unwrap_or_else(|_| "gpt-5-nano".to_string()),
            endpoint: env::var("GMS_API_ENDPOINT")
                .unwrap_or_else(|_| "https://api.example.com/v1".to_string()),
            news_ttl_secs: env_or("NEWS_FETCH_INTERVAL", 3600),
            max_news_items: env_or("MAX_NEWS_ITEMS", 10),
            max_output_tokens: env_or("DEFAULT_MAX_TOKENS", 8000),
        })
    }

    fn try_load_dotenv() {
        // Try locations in order of preference:

        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/news-chat/.env (standard config location)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("news-chat").join(".env");
            if config_path.exists() {
                if dotenvy::from_path(&config_path).is_ok() {
                    return;
                }
            }
        }

        // 3. ~/.env (home directory)
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                if dotenvy::from_path(&home_path).is_ok() {
                    return;
                }
            }
        }

        // If none found, that's okay - environment variables might be set system-wide
    }
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or malformed.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
