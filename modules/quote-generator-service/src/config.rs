use crate::sync_api::DEFAULT_SERVER_URL;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_path: String,
    pub sync_interval_secs: u64,
    pub server_url: String,
    pub sync_enabled: bool,
    /// Transfer document merged into the store once at startup
    pub import_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env_parse("QUOTE_GENERATOR_PORT").unwrap_or(9103),
            db_path: env::var("QUOTE_GENERATOR_DB_PATH")
                .unwrap_or_else(|_| "./quote_generator.db".to_string()),
            sync_interval_secs: env_parse("QUOTE_GENERATOR_SYNC_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(30),
            server_url: env::var("QUOTE_GENERATOR_SERVER_URL")
                .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string()),
            sync_enabled: env::var("QUOTE_GENERATOR_SYNC_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            import_file: env::var("QUOTE_GENERATOR_IMPORT_FILE")
                .ok()
                .filter(|p| !p.trim().is_empty()),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
