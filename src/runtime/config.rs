use crate::discovery::{DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_RETRIES, DISCOVERY_PORT};
use crate::error::ConfigError;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct EepromConfig {
    /// Device holding protocol, revision and test date
    #[serde(default = "default_device_a")]
    pub device_a: PathBuf,
    /// Device holding UUID and MAC
    #[serde(default = "default_device_b")]
    pub device_b: PathBuf,
}

impl Default for EepromConfig {
    fn default() -> Self {
        EepromConfig {
            device_a: default_device_a(),
            device_b: default_device_b(),
        }
    }
}

/// Discovery Configuration
/// All timing values are in milliseconds
#[derive(Debug, Deserialize, Clone)]
pub struct DiscoveryConfig {
    /// Local endpoint (default: 0.0.0.0:13992)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Broadcast destination (default: 255.255.255.255:13992)
    #[serde(default = "default_target")]
    pub target: SocketAddr,
    /// Re-sends after the initial request (default: 8)
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Wait for a reply after each send (ms, default: 1000)
    #[serde(default = "default_attempt_timeout")]
    pub attempt_timeout_ms: u64,
    /// Pause between polls of an idle socket (ms, default: 1)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl DiscoveryConfig {
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            bind_addr: default_bind_addr(),
            target: default_target(),
            retries: default_retries(),
            attempt_timeout_ms: default_attempt_timeout(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

fn default_device_a() -> PathBuf { PathBuf::from("/dev/eeprom0") }
fn default_device_b() -> PathBuf { PathBuf::from("/dev/eeprom1") }
fn default_bind_addr() -> SocketAddr { SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DISCOVERY_PORT).into() }
fn default_target() -> SocketAddr { SocketAddrV4::new(Ipv4Addr::BROADCAST, DISCOVERY_PORT).into() }
fn default_retries() -> u32 { DEFAULT_RETRIES }
fn default_attempt_timeout() -> u64 { DEFAULT_ATTEMPT_TIMEOUT.as_millis() as u64 }
fn default_poll_interval() -> u64 { 1 }
fn default_environment() -> PathBuf { PathBuf::from("/var/lib/dboard/env.json") }

#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    #[serde(default)]
    pub eeprom: EepromConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// JSON file holding persistent variables (`serverip`, `-v` targets)
    #[serde(default = "default_environment")]
    pub environment: PathBuf,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            eeprom: EepromConfig::default(),
            discovery: DiscoveryConfig::default(),
            environment: default_environment(),
        }
    }
}

impl BoardConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.discovery.bind_addr, "0.0.0.0:13992".parse().unwrap());
        assert_eq!(config.discovery.target, "255.255.255.255:13992".parse().unwrap());
        assert_eq!(config.discovery.retries, 8);
        assert_eq!(config.discovery.attempt_timeout(), Duration::from_secs(1));
        assert_eq!(config.eeprom.device_a, PathBuf::from("/dev/eeprom0"));
        assert_eq!(config.eeprom.device_b, PathBuf::from("/dev/eeprom1"));
    }

    #[test]
    fn test_partial_json() {
        let config: BoardConfig = serde_json::from_str(
            r#"{ "discovery": { "target": "192.168.1.255:13992", "retries": 3 } }"#,
        )
        .unwrap();
        assert_eq!(config.discovery.target, "192.168.1.255:13992".parse().unwrap());
        assert_eq!(config.discovery.retries, 3);
        assert_eq!(config.discovery.attempt_timeout_ms, 1000);
        assert_eq!(config.discovery.poll_interval_ms, 1);
        assert_eq!(config.environment, PathBuf::from("/var/lib/dboard/env.json"));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "eeprom": {{ "device_a": "/tmp/a.bin" }}, "environment": "/tmp/env.json" }}"#).unwrap();
        let config = BoardConfig::load(file.path()).unwrap();
        assert_eq!(config.eeprom.device_a, PathBuf::from("/tmp/a.bin"));
        assert_eq!(config.eeprom.device_b, PathBuf::from("/dev/eeprom1"));
        assert_eq!(config.environment, PathBuf::from("/tmp/env.json"));
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            BoardConfig::load(Path::new("/nonexistent/dboard.json")),
            Err(ConfigError::Io { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(BoardConfig::load(file.path()), Err(ConfigError::Parse { .. })));
    }
}
