//! Broadcast configuration.
//!
//! Credentials and limits are read from the environment once at startup and
//! carried in an explicit struct; nothing consults the environment after
//! [`BroadcastConfig::from_env`] returns.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the LINE channel access token.
pub const CHANNEL_TOKEN_ENV: &str = "LINE_CHANNEL_TOKEN";
/// Environment variable overriding the maximum message length.
pub const MAX_LEN_ENV: &str = "LINE_MAX_LEN";
/// LINE Messaging API broadcast endpoint.
pub const LINE_BROADCAST_URL: &str = "https://api.line.me/v2/bot/message/broadcast";
/// Default maximum rendered message length, in characters.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 2000;

/// Settings for one broadcast run.
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Channel access token sent as the bearer credential.
    pub channel_token: String,

    /// Maximum rendered length of one message, in characters.
    /// Default: 2000
    pub max_message_len: usize,

    /// Delivery endpoint. Tests point this at a local responder.
    pub endpoint: Url,

    /// Wall-clock bound for one delivery attempt.
    /// Default: 20s
    pub request_timeout: Duration,

    /// Backoff unit for rate-limit retries; retry `n` waits `retry_base * 2^n`.
    /// Default: 1s
    pub retry_base: Duration,

    /// Pause between successive message deliveries.
    /// Default: 1s
    pub pace: Duration,
}

impl BroadcastConfig {
    /// Returns a configuration with the given token and all defaults.
    pub fn new(channel_token: impl Into<String>) -> Self {
        Self {
            channel_token: channel_token.into(),
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            endpoint: Url::parse(LINE_BROADCAST_URL).expect("default endpoint is a valid url"),
            request_timeout: Duration::from_secs(20),
            retry_base: Duration::from_secs(1),
            pace: Duration::from_secs(1),
        }
    }

    /// Reads the recognized environment variables.
    ///
    /// `LINE_CHANNEL_TOKEN` is required; a missing or empty value is a
    /// configuration error. `LINE_MAX_LEN` is optional and must parse as a
    /// length when present.
    pub fn from_env() -> Result<Self> {
        let token = env::var(CHANNEL_TOKEN_ENV).unwrap_or_default();
        if token.is_empty() {
            return Err(Error::MissingChannelToken);
        }
        let mut config = Self::new(token);
        if let Ok(raw) = env::var(MAX_LEN_ENV) {
            config.max_message_len = raw.parse().map_err(|_| Error::InvalidMaxLen { value: raw })?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    // Tests that touch process environment must not interleave.
    fn env_lock() -> MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn clear_env() {
        env::remove_var(CHANNEL_TOKEN_ENV);
        env::remove_var(MAX_LEN_ENV);
    }

    #[test]
    fn test_from_env_requires_token() {
        let _guard = env_lock();
        clear_env();
        assert!(matches!(
            BroadcastConfig::from_env(),
            Err(Error::MissingChannelToken)
        ));
    }

    #[test]
    fn test_from_env_rejects_empty_token() {
        let _guard = env_lock();
        clear_env();
        env::set_var(CHANNEL_TOKEN_ENV, "");
        let result = BroadcastConfig::from_env();
        clear_env();
        assert!(matches!(result, Err(Error::MissingChannelToken)));
    }

    #[test]
    fn test_from_env_defaults() {
        let _guard = env_lock();
        clear_env();
        env::set_var(CHANNEL_TOKEN_ENV, "token-a");
        let config = BroadcastConfig::from_env().expect("config");
        clear_env();
        assert_eq!(config.channel_token, "token-a");
        assert_eq!(config.max_message_len, DEFAULT_MAX_MESSAGE_LEN);
        assert_eq!(config.endpoint.as_str(), LINE_BROADCAST_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert_eq!(config.retry_base, Duration::from_secs(1));
        assert_eq!(config.pace, Duration::from_secs(1));
    }

    #[test]
    fn test_from_env_reads_max_len_override() {
        let _guard = env_lock();
        clear_env();
        env::set_var(CHANNEL_TOKEN_ENV, "token-a");
        env::set_var(MAX_LEN_ENV, "500");
        let config = BroadcastConfig::from_env().expect("config");
        clear_env();
        assert_eq!(config.max_message_len, 500);
    }

    #[test]
    fn test_from_env_rejects_unparsable_max_len() {
        let _guard = env_lock();
        clear_env();
        env::set_var(CHANNEL_TOKEN_ENV, "token-a");
        env::set_var(MAX_LEN_ENV, "plenty");
        let result = BroadcastConfig::from_env();
        clear_env();
        match result {
            Err(Error::InvalidMaxLen { value }) => assert_eq!(value, "plenty"),
            other => panic!("expected InvalidMaxLen, got {other:?}"),
        }
    }
}
