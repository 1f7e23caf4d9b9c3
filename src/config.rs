//! # Service Configuration
//!
//! [`ServiceConfig`] carries every tunable of the service. The binary builds it from
//! command-line flags through [`Cli`]; tests construct it directly, usually starting from
//! `ServiceConfig::default()`.

use clap::Parser;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_OFFER_COUNT: usize = 50;
pub const DEFAULT_PAYLOAD_LEN: usize = 2;
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_millis(200);
pub const DEFAULT_COMMAND_BUFFER: usize = 32;
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("offer count must be at least 1")]
    NoOffers,
    #[error("payload length must be at least 1")]
    EmptyPayload,
    #[error("command buffer must be at least 1")]
    NoCommandBuffer,
    #[error("rotation interval must be positive, use None to disable rotation")]
    ZeroRotationInterval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// TCP port the HTTP server listens on. `0` picks a free port.
    pub port: u16,
    /// Number of slots in the active set.
    pub offer_count: usize,
    /// Length of generated payloads.
    pub payload_len: usize,
    /// Period of the rotation trigger. `None` disables rotation.
    pub rotation_interval: Option<Duration>,
    /// Capacity of the actor's command queue.
    pub command_buffer: usize,
    /// How long in-flight HTTP requests may drain on shutdown.
    pub shutdown_grace: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            offer_count: DEFAULT_OFFER_COUNT,
            payload_len: DEFAULT_PAYLOAD_LEN,
            rotation_interval: Some(DEFAULT_ROTATION_INTERVAL),
            command_buffer: DEFAULT_COMMAND_BUFFER,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.offer_count == 0 {
            return Err(ConfigError::NoOffers);
        }
        if self.payload_len == 0 {
            return Err(ConfigError::EmptyPayload);
        }
        if self.command_buffer == 0 {
            return Err(ConfigError::NoCommandBuffer);
        }
        if self.rotation_interval == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroRotationInterval);
        }
        Ok(())
    }
}

/// Command-line flags of the `offer-rotator` binary.
#[derive(Debug, Parser)]
#[command(name = "offer-rotator", version, about = "Serves random offers and counts their views")]
pub struct Cli {
    /// Port of the service
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Number of offers in the active set
    #[arg(long, default_value_t = DEFAULT_OFFER_COUNT)]
    pub offers: usize,

    /// Length of generated offer payloads
    #[arg(long, default_value_t = DEFAULT_PAYLOAD_LEN)]
    pub payload_len: usize,

    /// Rotation period in milliseconds, 0 disables rotation
    #[arg(long, default_value_t = DEFAULT_ROTATION_INTERVAL.as_millis() as u64)]
    pub rotation_interval_ms: u64,

    /// Seconds in-flight requests may take to finish on shutdown
    #[arg(long, default_value_t = DEFAULT_SHUTDOWN_GRACE.as_secs())]
    pub shutdown_grace_secs: u64,
}

impl Cli {
    pub fn into_config(self) -> Result<ServiceConfig, ConfigError> {
        let rotation_interval =
            (self.rotation_interval_ms > 0).then(|| Duration::from_millis(self.rotation_interval_ms));
        let config = ServiceConfig {
            port: self.port,
            offer_count: self.offers,
            payload_len: self.payload_len,
            rotation_interval,
            command_buffer: DEFAULT_COMMAND_BUFFER,
            shutdown_grace: Duration::from_secs(self.shutdown_grace_secs),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let cli = Cli::parse_from(["offer-rotator"]);
        assert_eq!(cli.into_config().unwrap(), ServiceConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "offer-rotator",
            "--port",
            "8080",
            "--offers",
            "3",
            "--rotation-interval-ms",
            "0",
        ]);
        let config = cli.into_config().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.offer_count, 3);
        assert_eq!(config.rotation_interval, None);
    }

    #[test]
    fn test_validate_rejects_empty_active_set() {
        let config = ServiceConfig {
            offer_count: 0,
            ..ServiceConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoOffers));

        let cli = Cli::parse_from(["offer-rotator", "--payload-len", "0"]);
        assert_eq!(cli.into_config(), Err(ConfigError::EmptyPayload));
    }
}
