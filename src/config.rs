//! Bridge configuration.
//!
//! All settings are plain scalars fixed at startup; there is no dynamic
//! reload. Defaults match the deployed loopback setup (tracker on 5005, OSC
//! consumer on 7000). A YAML file can override them.

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};
use crate::wire::PacketVariant;

/// Runtime settings for the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Address the inbound tracker socket binds to.
    pub listen_addr: SocketAddr,

    /// Destination for outbound OSC messages.
    pub osc_addr: SocketAddr,

    /// Target outbound rate in messages per second.
    pub send_rate_hz: f64,

    /// How many forwarded samples the diagnostic history retains.
    pub history_capacity: usize,

    /// Seconds between diagnostic reports.
    pub report_interval_secs: u64,

    /// Which packet revision the deployed tracker emits.
    pub variant: PacketVariant,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5005".parse().expect("valid literal address"),
            osc_addr: "127.0.0.1:7000".parse().expect("valid literal address"),
            send_rate_hz: 25.0,
            history_capacity: 10,
            report_interval_secs: 10,
            variant: PacketVariant::Legacy,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| BridgeError::config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = serde_yaml_ng::from_str(&text)
            .map_err(|e| BridgeError::config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the relay cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !self.send_rate_hz.is_finite() || self.send_rate_hz <= 0.0 {
            return Err(BridgeError::config(format!(
                "send_rate_hz must be positive and finite, got {}",
                self.send_rate_hz
            )));
        }
        if self.history_capacity == 0 {
            return Err(BridgeError::config("history_capacity must be at least 1"));
        }
        if self.report_interval_secs == 0 {
            return Err(BridgeError::config("report_interval_secs must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployed_setup() {
        let config = BridgeConfig::default();
        assert_eq!(config.listen_addr.port(), 5005);
        assert_eq!(config.osc_addr.port(), 7000);
        assert_eq!(config.send_rate_hz, 25.0);
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.report_interval_secs, 10);
        assert_eq!(config.variant, PacketVariant::Legacy);
        config.validate().unwrap();
    }

    #[test]
    fn partial_yaml_overrides_defaults() {
        let config: BridgeConfig =
            serde_yaml_ng::from_str("send_rate_hz: 10.0\nvariant: extended\n").unwrap();
        assert_eq!(config.send_rate_hz, 10.0);
        assert_eq!(config.variant, PacketVariant::Extended);
        // Untouched fields fall back to defaults.
        assert_eq!(config.listen_addr.port(), 5005);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: std::result::Result<BridgeConfig, _> =
            serde_yaml_ng::from_str("burst_allowance: 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn validation_rejects_bad_scalars() {
        let mut config = BridgeConfig::default();
        config.send_rate_hz = 0.0;
        assert!(config.validate().is_err());

        let mut config = BridgeConfig::default();
        config.send_rate_hz = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = BridgeConfig::default();
        config.history_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = BridgeConfig::default();
        config.report_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn yaml_round_trip() {
        let config = BridgeConfig::default();
        let text = serde_yaml_ng::to_string(&config).unwrap();
        let parsed: BridgeConfig = serde_yaml_ng::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
