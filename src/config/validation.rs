use crate::config::types::{CacheConfig, Config, CooldownConfig, FetcherConfig};
use crate::ConfigError;

/// Longest accepted cooldown window (one day)
const MAX_COOLDOWN_SECS: u64 = 24 * 60 * 60;

/// Longest accepted request timeout
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_cache_config(&config.cache)?;
    validate_cooldown_config(&config.cooldown)?;
    validate_fetcher_config(&config.fetcher)?;
    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "cache directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates cooldown configuration
fn validate_cooldown_config(config: &CooldownConfig) -> Result<(), ConfigError> {
    if config.window_secs < 1 || config.window_secs > MAX_COOLDOWN_SECS {
        return Err(ConfigError::Validation(format!(
            "window-secs must be between 1 and {}, got {}",
            MAX_COOLDOWN_SECS, config.window_secs
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be between 1 and timeout-secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "at least one user agent is required".to_string(),
        ));
    }

    for agent in &config.user_agents {
        validate_user_agent(agent)?;
    }

    Ok(())
}

/// Validates a single user agent string
fn validate_user_agent(agent: &str) -> Result<(), ConfigError> {
    if agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    // Header values cannot carry line breaks
    if agent.chars().any(|c| c == '\r' || c == '\n') {
        return Err(ConfigError::Validation(format!(
            "user agent contains a line break: '{}'",
            agent.escape_debug()
        )));
    }

    Ok(())
}
