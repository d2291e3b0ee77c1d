//! # Discovery Runtime Module
//!
//! Composition root tying the board identity to the discovery protocol.
//!
//! ## Key Types
//!
//! - [`DiscoveryClient`] - Derives the serial, runs a session, registers the server
//! - [`BoardConfig`] - JSON configuration with defaults for every field
//! - [`EnvStore`] - Persistent variables (`serverip`, model strings)
//! - [`identity_info`] - The `identity-info` command over any EEPROM and store
//!
//! ## Lifecycle
//!
//! 1. Load configuration: `BoardConfig::load("dboard.json")`
//! 2. Build the client: `DiscoveryClient::from_config(&config)`
//! 3. Resolve a server: `client.discover(Service::Nfs, &cancel)`
//!
//! ## Example
//!
//! ```ignore
//! let mut client = DiscoveryClient::from_config(&BoardConfig::default())?;
//! let server = client.discover(Service::Tftp, &CancelToken::new())?;
//! ```

pub mod config;
pub mod env;
pub mod info;

pub use config::{BoardConfig, DiscoveryConfig, EepromConfig};
pub use env::{EnvStore, Environment, SERVER_IP_VAR};
pub use info::{identity_info, InfoRequest};

use crate::discovery::{CancelToken, Clock, DiscoverySession, MonotonicClock, Serial, Service};
use crate::error::DiscoveryError;
use crate::identity::{self, EepromReader, FileEeprom};
use crate::logging::CLIENT;
use crate::transport::{DiscoveryTransport, UdpTransport};
use log::{debug, info};
use std::io;
use std::net::SocketAddr;

pub struct DiscoveryClient<E: EepromReader, V: Environment> {
    eeprom: E,
    env: V,
    config: DiscoveryConfig,
}

impl DiscoveryClient<FileEeprom, EnvStore> {
    /// Client over the configured EEPROM device files and variable store.
    pub fn from_config(config: &BoardConfig) -> io::Result<Self> {
        let eeprom = FileEeprom::new(&config.eeprom.device_a, &config.eeprom.device_b);
        let env = EnvStore::open(&config.environment)?;
        Ok(DiscoveryClient::new(eeprom, env, config.discovery.clone()))
    }
}

impl<E: EepromReader, V: Environment> DiscoveryClient<E, V> {
    pub fn new(eeprom: E, env: V, config: DiscoveryConfig) -> Self {
        DiscoveryClient { eeprom, env, config }
    }

    pub fn env(&self) -> &V {
        &self.env
    }

    /// Serial derived from the MAC address in EEPROM.
    pub fn serial(&self) -> Result<Serial, DiscoveryError> {
        let mac = identity::read_mac(&self.eeprom).map_err(DiscoveryError::NoIdentity)?;
        Ok(Serial::from_mac(&mac))
    }

    /// Locate the server offering `service` and make it the active server.
    pub fn discover(&mut self, service: Service, cancel: &CancelToken) -> Result<SocketAddr, DiscoveryError> {
        self.discover_with(
            service,
            |c: &DiscoveryConfig| UdpTransport::bind(c.bind_addr, c.target),
            &MonotonicClock,
            cancel,
        )
    }

    /// [`discover`](Self::discover) with the endpoint and clock supplied by
    /// the caller. `bind` is only invoked once the serial is known.
    pub fn discover_with<T, B, C>(
        &mut self,
        service: Service,
        bind: B,
        clock: &C,
        cancel: &CancelToken,
    ) -> Result<SocketAddr, DiscoveryError>
    where
        T: DiscoveryTransport,
        B: FnOnce(&DiscoveryConfig) -> io::Result<T>,
        C: Clock + ?Sized,
    {
        let serial = self.serial()?;
        info!(target: CLIENT, "looking for {} server, serial {}", service, serial);

        let mut transport = bind(&self.config)?;
        let mut session = DiscoverySession::new(service, serial)
            .with_retries(self.config.retries)
            .with_attempt_timeout(self.config.attempt_timeout());

        let server = session.run(&mut transport, clock, cancel, self.config.poll_interval())?;
        self.register(server)?;
        Ok(server)
    }

    fn register(&mut self, server: SocketAddr) -> Result<(), DiscoveryError> {
        let ip = server.ip().to_string();
        self.env
            .set_var(SERVER_IP_VAR, &ip)
            .map_err(DiscoveryError::Registration)?;
        debug!(target: CLIENT, "{} = {}", SERVER_IP_VAR, ip);
        Ok(())
    }
}
