//! Server configuration from environment variables.

use std::str::FromStr;

use anyhow::Context;
use quiz_core::{MatchSettings, SchedulerConfig};

/// Settings read at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub items_path: String,
    pub groups_path: String,
    pub session_idle_minutes: i64,
    pub scheduler: SchedulerConfig,
    pub matching: MatchSettings,
}

impl Config {
    /// Read configuration, loading a `.env` file first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = SchedulerConfig::default();
        Ok(Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            items_path: env_or("QUIZ_ITEMS_PATH", "assets/countries.json".to_string())?,
            groups_path: env_or("QUIZ_GROUPS_PATH", "assets/country-names.json".to_string())?,
            session_idle_minutes: env_or("SESSION_IDLE_MINUTES", 60)?,
            scheduler: SchedulerConfig {
                retest_base: env_or("QUIZ_RETEST_BASE", defaults.retest_base)?,
                retirement_threshold: env_or(
                    "QUIZ_RETIREMENT_THRESHOLD",
                    defaults.retirement_threshold,
                )?,
            },
            matching: MatchSettings {
                fold_diacritics: env_or("QUIZ_FOLD_DIACRITICS", false)?,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, value)),
        Err(_) => Ok(default),
    }
}
