//! System configuration parameters
//!
//! All tunable parameters for the host and the client. Compile-time defaults
//! live here; the binaries layer an optional JSON file and CLI flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default TCP port shared by host and client.
pub const DEFAULT_PORT: u16 = 56969;
/// Default bind address for the host (all interfaces).
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
/// Default client output file.
pub const DEFAULT_OUTPUT: &str = "rotary_values.txt";
/// Default client purge interval (1 hour).
pub const DEFAULT_PURGE_INTERVAL_SECS: u64 = 3600;
/// Client receive buffer size.
pub const RECV_BUFFER_LEN: usize = 1024;

/// Host-side configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    // --- Network ---
    /// Address the listener binds to
    pub bind_host: String,
    /// Listen port
    pub port: u16,
    /// Publish rate; `None` runs locally without a TCP server
    pub updates_per_second: Option<u32>,
    /// Non-blocking accept poll period (milliseconds)
    pub accept_poll_ms: u32,
    /// Per-write timeout on the client socket (milliseconds)
    pub write_timeout_ms: u32,

    // --- Inputs ---
    /// Encoder/button sampling period (microseconds)
    pub poll_interval_us: u32,
    /// Minimum gap between accepted button toggles (milliseconds, 0 = off)
    pub button_lockout_ms: u32,

    // --- Timing ---
    /// Overrun beyond which a fixed-rate loop re-anchors its schedule (microseconds)
    pub jitter_tolerance_us: u32,

    // --- Display ---
    /// Suppress the local display
    pub headless: bool,
    /// Display refresh period (milliseconds)
    pub display_refresh_ms: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            // Network
            bind_host: DEFAULT_BIND_HOST.to_owned(),
            port: DEFAULT_PORT,
            updates_per_second: None,
            accept_poll_ms: 50,
            write_timeout_ms: 1000,

            // Inputs
            poll_interval_us: 1000, // 1 kHz
            button_lockout_ms: 0,

            // Timing
            jitter_tolerance_us: 20_000,

            // Display
            headless: false,
            display_refresh_ms: 10, // 100 Hz
        }
    }
}

impl HostConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|_| ConfigError::Io)?;
        Self::from_json(&json)
    }

    /// Reject values that would stall or spin a loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.updates_per_second == Some(0) {
            return Err(ConfigError::ValidationFailed("updates_per_second must be > 0"));
        }
        if self.poll_interval_us == 0 {
            return Err(ConfigError::ValidationFailed("poll_interval_us must be > 0"));
        }
        if self.accept_poll_ms == 0 {
            return Err(ConfigError::ValidationFailed("accept_poll_ms must be > 0"));
        }
        if self.write_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("write_timeout_ms must be > 0"));
        }
        if self.display_refresh_ms == 0 {
            return Err(ConfigError::ValidationFailed("display_refresh_ms must be > 0"));
        }
        if self.bind_host.is_empty() {
            return Err(ConfigError::ValidationFailed("bind_host must not be empty"));
        }
        Ok(())
    }

    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_micros(self.poll_interval_us as u64)
    }

    /// Period between publishes, if running as a server.
    pub fn publish_interval(&self) -> Option<Duration> {
        self.updates_per_second
            .filter(|&n| n > 0)
            .map(|n| Duration::from_secs(1) / n)
    }

    pub fn jitter_tolerance(&self) -> Duration {
        Duration::from_micros(self.jitter_tolerance_us as u64)
    }

    pub fn accept_poll(&self) -> Duration {
        Duration::from_millis(self.accept_poll_ms as u64)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms as u64)
    }

    pub fn display_refresh(&self) -> Duration {
        Duration::from_millis(self.display_refresh_ms as u64)
    }
}

/// Client-side configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host running the server
    pub host: String,
    /// Server port
    pub port: u16,
    /// File receiving one line per distinct value
    pub output: PathBuf,
    /// Truncate the output file this often (seconds)
    pub purge_interval_secs: u64,
    /// Socket read timeout so the purge timer runs without traffic (milliseconds)
    pub read_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: DEFAULT_PORT,
            output: PathBuf::from(DEFAULT_OUTPUT),
            purge_interval_secs: DEFAULT_PURGE_INTERVAL_SECS,
            read_timeout_ms: 1000,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::ValidationFailed("host must not be empty"));
        }
        if self.purge_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed("purge_interval must be > 0"));
        }
        if self.read_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("read_timeout_ms must be > 0"));
        }
        Ok(())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }

    /// Read timeout, never longer than the purge interval.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms).min(self.purge_interval())
    }
}

/// Errors from loading or validating configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The file could not be read.
    Io,
    /// The document is not valid JSON for this schema.
    Parse,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "config file unreadable"),
            Self::Parse => write!(f, "config parse error"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Io => Self::Config("config file unreadable"),
            ConfigError::Parse => Self::Config("config parse error"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = HostConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.port, DEFAULT_PORT);
        assert_eq!(c.bind_addr(), "0.0.0.0:56969");
        assert_eq!(c.poll_interval(), Duration::from_millis(1));
        assert_eq!(c.publish_interval(), None);

        let c = ClientConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.output, PathBuf::from("rotary_values.txt"));
        assert_eq!(c.purge_interval(), Duration::from_secs(3600));
    }

    #[test]
    fn publish_interval_follows_rate() {
        let c = HostConfig {
            updates_per_second: Some(20),
            ..HostConfig::default()
        };
        assert_eq!(c.publish_interval(), Some(Duration::from_millis(50)));
    }

    #[test]
    fn zero_rates_are_rejected() {
        let c = HostConfig {
            updates_per_second: Some(0),
            ..HostConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::ValidationFailed(_))));

        let c = HostConfig {
            poll_interval_us: 0,
            ..HostConfig::default()
        };
        assert!(c.validate().is_err());

        let c = ClientConfig {
            purge_interval_secs: 0,
            ..ClientConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c = HostConfig::from_json(r#"{ "port": 7000, "updates_per_second": 5 }"#).unwrap();
        assert_eq!(c.port, 7000);
        assert_eq!(c.updates_per_second, Some(5));
        assert_eq!(c.bind_host, DEFAULT_BIND_HOST);
        assert_eq!(c.poll_interval_us, 1000);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert_eq!(HostConfig::from_json("{ port: "), Err(ConfigError::Parse));
        assert!(matches!(
            HostConfig::from_json(r#"{ "updates_per_second": 0 }"#),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn serde_roundtrip() {
        let c = HostConfig {
            headless: true,
            button_lockout_ms: 30,
            ..HostConfig::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(HostConfig::from_json(&json).unwrap(), c);
    }

    #[test]
    fn read_timeout_never_exceeds_purge_interval() {
        let c = ClientConfig {
            purge_interval_secs: 1,
            read_timeout_ms: 5000,
            ..ClientConfig::default()
        };
        assert_eq!(c.read_timeout(), Duration::from_secs(1));
    }
}
