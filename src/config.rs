use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_PRESENCE: &str = "Ticket Support | /panel";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord_token: String,
    pub log_level: String,
    pub http_port: u16,
    pub presence_text: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("DISCORD_TOKEN not found in environment variables!"))?;

        let http_port = match lookup("HTTP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("HTTP_PORT must be a valid port number, got {:?}: {}", raw, e))?,
            None => DEFAULT_HTTP_PORT,
        };

        Ok(Config {
            discord_token,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            http_port,
            presence_text: lookup("PRESENCE_TEXT").unwrap_or_else(|| DEFAULT_PRESENCE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_missing_token() {
        let result = Config::from_lookup(lookup_from(&[("LOG_LEVEL", "debug")]));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("DISCORD_TOKEN"));
    }

    #[test]
    fn test_config_blank_token_is_missing() {
        let result = Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_with_defaults() {
        let config = Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "test_discord_token")])).unwrap();
        assert_eq!(config.discord_token, "test_discord_token");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(config.presence_text, DEFAULT_PRESENCE);
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("LOG_LEVEL", "debug"),
            ("HTTP_PORT", "8080"),
            ("PRESENCE_TEXT", "Helpdesk"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.presence_text, "Helpdesk");
    }

    #[test]
    fn test_config_rejects_bad_port() {
        let result = Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "abc"), ("HTTP_PORT", "not-a-port")]));
        assert!(result.is_err());
    }
}
