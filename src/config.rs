use std::env;

use anyhow::Result;

use crate::twitter::oauth::Credentials;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub access_token: String,
    pub access_token_secret: String,
    pub consumer_key: String,
    pub consumer_key_secret: String,
    /// API host (defaults to https://api.twitter.com).
    pub api_url: String,
    /// Handles that must never be unfollowed (TWITTQUILIBRIUM_KEEP, comma-separated).
    pub keep: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing is required at load time; call `require_credentials` before
    /// anything that talks to the API.
    pub fn load() -> Result<Self> {
        Ok(Self {
            access_token: env::var("TWITTER_ACCESS_TOKEN").unwrap_or_default(),
            access_token_secret: env::var("TWITTER_ACCESS_TOKEN_SECRET").unwrap_or_default(),
            consumer_key: env::var("TWITTER_CONSUMER_KEY").unwrap_or_default(),
            consumer_key_secret: env::var("TWITTER_CONSUMER_KEY_SECRET").unwrap_or_default(),
            api_url: env::var("TWITTER_API_URL")
                .unwrap_or_else(|_| crate::twitter::client::DEFAULT_API_URL.to_string()),
            keep: parse_handle_list(&env::var("TWITTQUILIBRIUM_KEEP").unwrap_or_default()),
        })
    }

    /// Check that all four OAuth strings are configured.
    pub fn require_credentials(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("TWITTER_ACCESS_TOKEN", &self.access_token),
            ("TWITTER_ACCESS_TOKEN_SECRET", &self.access_token_secret),
            ("TWITTER_CONSUMER_KEY", &self.consumer_key),
            ("TWITTER_CONSUMER_KEY_SECRET", &self.consumer_key_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            anyhow::bail!(
                "{} not set. Add them to your .env file.\n\
                 See .env.example for the required variables.",
                missing.join(", ")
            );
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            &self.access_token,
            &self.access_token_secret,
            &self.consumer_key,
            &self.consumer_key_secret,
        )
    }
}

/// Split a comma-separated handle list, dropping blanks and leading '@'.
pub fn parse_handle_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|h| h.trim().trim_start_matches('@'))
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}
