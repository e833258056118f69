use std::env;
use std::time::Duration;

use campus_core::{MatchMode, ReplyPacing};
use thiserror::Error;

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("CAMPUS_MATCH_MODE must be `substring` or `whole_word`, got {0:?}")]
    InvalidMatchMode(String),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: String,
    pub allowed_origins: Vec<String>,
    pub rate_limit_window: Duration,
    pub rate_limit_max: usize,
    pub pacing: ReplyPacing,
    pub match_mode: MatchMode,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(ToString::to_string)
                .collect(),
            rate_limit_window: Duration::from_secs(60),
            rate_limit_max: 120,
            pacing: ReplyPacing::default(),
            match_mode: MatchMode::Substring,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads every `CAMPUS_*` key through `lookup`; unset keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind = lookup("CAMPUS_BIND")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.bind);

        let allowed_origins = lookup("CAMPUS_ALLOWED_ORIGINS")
            .map(|value| parse_origins(&value))
            .unwrap_or(defaults.allowed_origins);

        let rate_limit_window = Duration::from_secs(
            parse_number(&lookup, "CAMPUS_RATE_LIMIT_WINDOW_SECONDS")?
                .unwrap_or(defaults.rate_limit_window.as_secs()),
        );
        let rate_limit_max = parse_number(&lookup, "CAMPUS_RATE_LIMIT_MAX")?
            .map(|value| value as usize)
            .unwrap_or(defaults.rate_limit_max);

        let pacing = ReplyPacing::new(
            parse_number(&lookup, "CAMPUS_REPLY_DELAY_MIN_MS")?
                .unwrap_or(defaults.pacing.min_ms()),
            parse_number(&lookup, "CAMPUS_REPLY_DELAY_MAX_MS")?
                .unwrap_or(defaults.pacing.max_ms()),
        );

        let match_mode = match lookup("CAMPUS_MATCH_MODE") {
            Some(value) => {
                MatchMode::parse(&value).ok_or(ConfigError::InvalidMatchMode(value))?
            }
            None => defaults.match_mode,
        };

        Ok(Self {
            bind,
            allowed_origins,
            rate_limit_window,
            rate_limit_max,
            pacing,
            match_mode,
        })
    }
}

fn parse_number(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(None),
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
