//! Configuration Module
//!
//! Handles loading and managing server configuration from environment
//! variables.

use std::env;

use crate::health::HealthThresholds;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port for the management surface
    pub server_port: u16,
    /// Background sweep interval in seconds; 0 disables the sweeper
    pub sweep_interval: u64,
    /// Global hit rate at or above which the layer is healthy
    pub healthy_hit_rate: f64,
    /// Per-namespace hit rate below which a namespace is flagged
    pub low_hit_rate: f64,
    /// Minimum hits+misses before a namespace can be flagged
    pub min_health_samples: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Expired-entry sweep frequency in seconds, 0 to
    ///   disable (default: 30)
    /// - `HEALTHY_HIT_RATE` - Global health threshold (default: 0.7)
    /// - `LOW_HIT_RATE` - Per-namespace flag threshold (default: 0.5)
    /// - `MIN_HEALTH_SAMPLES` - Sample floor for flagging (default: 100)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            healthy_hit_rate: env::var("HEALTHY_HIT_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.7),
            low_hit_rate: env::var("LOW_HIT_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.5),
            min_health_samples: env::var("MIN_HEALTH_SAMPLES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }

    /// Health thresholds derived from this configuration.
    pub fn health_thresholds(&self) -> HealthThresholds {
        HealthThresholds {
            healthy_global_hit_rate: self.healthy_hit_rate,
            low_namespace_hit_rate: self.low_hit_rate,
            min_samples: self.min_health_samples,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            sweep_interval: 30,
            healthy_hit_rate: 0.7,
            low_hit_rate: 0.5,
            min_health_samples: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 30);
        assert_eq!(config.healthy_hit_rate, 0.7);
        assert_eq!(config.low_hit_rate, 0.5);
        assert_eq!(config.min_health_samples, 100);
    }

    #[test]
    fn test_health_thresholds_from_config() {
        let config = Config {
            healthy_hit_rate: 0.9,
            low_hit_rate: 0.6,
            min_health_samples: 50,
            ..Config::default()
        };

        let thresholds = config.health_thresholds();
        assert_eq!(thresholds.healthy_global_hit_rate, 0.9);
        assert_eq!(thresholds.low_namespace_hit_rate, 0.6);
        assert_eq!(thresholds.min_samples, 50);
    }
}
