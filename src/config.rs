//! Runtime settings for the chat engine.
//!
//! Values come from the process environment (optionally seeded from a local
//! `.env` file) and fall back to the defaults bundled in `assets/config.env`.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Bundled defaults, compiled into the binary.
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

const DEFAULT_KEY_PREFIX: &str = "gsk_";
const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_CASUAL_MAX_TOKENS: u32 = 150;
const DEFAULT_DETAILED_MAX_TOKENS: u32 = 500;
const DEFAULT_HISTORY_LIMIT: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    /// A key must start with this to be used. Empty accepts any key.
    pub api_key_prefix: String,
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub casual_max_tokens: u32,
    pub detailed_max_tokens: u32,
    /// Maximum number of prior user/assistant turns sent with a request.
    pub history_limit: usize,
    pub timeout: Duration,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            casual_max_tokens: DEFAULT_CASUAL_MAX_TOKENS,
            detailed_max_tokens: DEFAULT_DETAILED_MAX_TOKENS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_prefix", &self.api_key_prefix)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("casual_max_tokens", &self.casual_max_tokens)
            .field("detailed_max_tokens", &self.detailed_max_tokens)
            .field("history_limit", &self.history_limit)
            .field("timeout", &self.timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Settings {
    /// Load `.env` if present, then read settings from the environment with
    /// bundled defaults underneath.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is normal outside local development.
        let _ = dotenvy::dotenv();

        let bundled = bundled_defaults();
        Self::from_lookup(|key| env::var(key).ok().or_else(|| bundled.get(key).cloned()))
    }

    /// Build settings from an arbitrary key lookup. Keys the lookup doesn't
    /// know keep their compiled-in defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .unwrap_or(default)
        };

        Ok(Self {
            api_key: lookup("FOLIO_API_KEY")
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            api_key_prefix: text("FOLIO_API_KEY_PREFIX", defaults.api_key_prefix),
            endpoint: text("FOLIO_ENDPOINT", defaults.endpoint),
            model: text("FOLIO_MODEL", defaults.model),
            temperature: parse_var(&lookup, "FOLIO_TEMPERATURE", defaults.temperature)?,
            casual_max_tokens: parse_var(
                &lookup,
                "FOLIO_CASUAL_MAX_TOKENS",
                defaults.casual_max_tokens,
            )?,
            detailed_max_tokens: parse_var(
                &lookup,
                "FOLIO_DETAILED_MAX_TOKENS",
                defaults.detailed_max_tokens,
            )?,
            history_limit: parse_var(&lookup, "FOLIO_HISTORY_LIMIT", defaults.history_limit)?,
            timeout: Duration::from_secs(parse_var(
                &lookup,
                "FOLIO_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
            log_level: text("FOLIO_LOG", defaults.log_level),
        })
    }

    /// The API key, if one is configured and carries the expected prefix.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty() && key.starts_with(self.api_key_prefix.as_str()))
    }

    pub fn max_tokens(&self, detailed: bool) -> u32 {
        if detailed {
            self.detailed_max_tokens
        } else {
            self.casual_max_tokens
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

fn bundled_defaults() -> HashMap<String, String> {
    dotenvy::from_read_iter(BUNDLED_CONFIG.as_bytes())
        .filter_map(Result::ok)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_uses_defaults() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings.api_key, None);
        assert_eq!(settings.history_limit, 10);
        assert_eq!(settings.casual_max_tokens, DEFAULT_CASUAL_MAX_TOKENS);
        assert!(settings.credential().is_none());
    }

    #[test]
    fn bundled_defaults_parse() {
        let bundled = bundled_defaults();
        assert!(!bundled.contains_key("FOLIO_API_KEY"));
        let settings = Settings::from_lookup(|key| bundled.get(key).cloned()).unwrap();
        assert_eq!(settings.api_key_prefix, "gsk_");
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn credential_requires_prefix() {
        let settings = Settings::from_lookup(lookup_from(&[("FOLIO_API_KEY", "sk-other")])).unwrap();
        assert!(settings.credential().is_none());

        let settings = Settings::from_lookup(lookup_from(&[("FOLIO_API_KEY", " gsk_abc ")])).unwrap();
        assert_eq!(settings.credential(), Some("gsk_abc"));

        let settings = Settings::from_lookup(lookup_from(&[
            ("FOLIO_API_KEY", "sk-other"),
            ("FOLIO_API_KEY_PREFIX", ""),
        ]))
        .unwrap();
        assert_eq!(settings.credential(), Some("sk-other"));
    }

    #[test]
    fn blank_key_is_absent() {
        let settings = Settings::from_lookup(lookup_from(&[("FOLIO_API_KEY", "   ")])).unwrap();
        assert_eq!(settings.api_key, None);
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let err = Settings::from_lookup(lookup_from(&[("FOLIO_HISTORY_LIMIT", "ten")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "FOLIO_HISTORY_LIMIT",
                value: "ten".to_string()
            }
        );
    }

    #[test]
    fn budget_selection() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("FOLIO_CASUAL_MAX_TOKENS", "100"),
            ("FOLIO_DETAILED_MAX_TOKENS", "800"),
        ]))
        .unwrap();
        assert_eq!(settings.max_tokens(false), 100);
        assert_eq!(settings.max_tokens(true), 800);
    }

    #[test]
    fn debug_redacts_key() {
        let settings = Settings::from_lookup(lookup_from(&[("FOLIO_API_KEY", "gsk_secret")])).unwrap();
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("gsk_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
