use super::packet::{DiscoveryPacket, Operation, Service};
use super::serial::Serial;
use crate::error::DiscoveryError;
use crate::logging::DISCOVERY;
use crate::transport::DiscoveryTransport;
use log::{debug, info};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Re-sends allowed after the initial request.
///
/// Each send, the initial one included, waits out a full attempt timeout, so
/// the defaults give at most 9 requests and about 9 s before `TimedOut`.
pub const DEFAULT_RETRIES: u32 = 8;
/// Time to wait for a reply after each send.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(1);
/// Datagrams handled per loop iteration before cancellation and the deadline
/// are checked again.
pub const MAX_DATAGRAMS_PER_POLL: usize = 16;

/// Source of monotonic time for deadlines.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Cooperative cancellation flag, checked once per loop iteration.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    Cancelled,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Searching,
    /// Terminal: the source address of the matching reply.
    Found(SocketAddr),
    /// Terminal.
    Failed(FailureCause),
}

/// One discovery attempt for one service.
///
/// The state machine itself does no I/O: [`start`](Self::start) and
/// [`on_tick`](Self::on_tick) hand back the request to transmit and
/// [`on_datagram`](Self::on_datagram) classifies what came in.
/// [`run`](Self::run) drives it over a transport.
#[derive(Debug, Clone)]
pub struct DiscoverySession {
    service: Service,
    serial: Serial,
    state: SessionState,
    retries: u32,
    retries_remaining: u32,
    attempt_timeout: Duration,
    last_send: Option<Instant>,
    attempts: u32,
}

// Closes the endpoint when the session loop exits, whichever way it exits.
struct Release<'a, T: DiscoveryTransport + ?Sized>(&'a mut T);

impl<T: DiscoveryTransport + ?Sized> Drop for Release<'_, T> {
    fn drop(&mut self) {
        self.0.close();
    }
}

impl DiscoverySession {
    pub fn new(service: Service, serial: Serial) -> Self {
        DiscoverySession {
            service,
            serial,
            state: SessionState::Idle,
            retries: DEFAULT_RETRIES,
            retries_remaining: DEFAULT_RETRIES,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            last_send: None,
            attempts: 0,
        }
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self.retries_remaining = retries;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn retries_remaining(&self) -> u32 {
        self.retries_remaining
    }

    /// Requests sent so far, initial one included.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn server(&self) -> Option<SocketAddr> {
        match self.state {
            SessionState::Found(addr) => Some(addr),
            _ => None,
        }
    }

    fn request(&self) -> DiscoveryPacket {
        DiscoveryPacket::request(self.service, self.serial)
    }

    /// `Idle -> Searching`. Returns the initial request, or `None` when the
    /// session has already been started.
    pub fn start(&mut self, now: Instant) -> Option<DiscoveryPacket> {
        if self.state != SessionState::Idle {
            return None;
        }
        self.state = SessionState::Searching;
        self.retries_remaining = self.retries;
        self.last_send = Some(now);
        self.attempts = 1;
        Some(self.request())
    }

    /// Result of a session that has left `Searching`.
    fn outcome(&self) -> Option<Result<SocketAddr, DiscoveryError>> {
        match self.state {
            SessionState::Found(server) => Some(Ok(server)),
            SessionState::Failed(FailureCause::Cancelled) => Some(Err(DiscoveryError::Cancelled)),
            SessionState::Failed(FailureCause::TimedOut) => Some(Err(DiscoveryError::TimedOut { attempts: self.attempts })),
            SessionState::Idle | SessionState::Searching => None,
        }
    }

    /// Classify an inbound datagram.
    ///
    /// `Ok(Some(addr))` is a match and moves the session to `Found`.
    /// `Ok(None)` is a well-formed packet meant for someone else.
    /// `Err(MalformedPacket)` is a framing error the caller should discard.
    pub fn on_datagram(&mut self, data: &[u8], src: SocketAddr) -> Result<Option<SocketAddr>, DiscoveryError> {
        if self.state != SessionState::Searching {
            return Ok(None);
        }
        let packet = DiscoveryPacket::decode(data)?;
        if packet.operation != Operation::Reply || packet.service != self.service {
            return Ok(None);
        }
        if packet.serial != self.serial {
            debug!(target: DISCOVERY, "reply from {} for serial {:?}, ignoring", src, packet.serial);
            return Ok(None);
        }
        self.state = SessionState::Found(src);
        Ok(Some(src))
    }

    /// Deadline check. Returns a request to re-send when the current attempt
    /// expired with retries left; moves to `Failed(TimedOut)` when none are.
    pub fn on_tick(&mut self, now: Instant) -> Option<DiscoveryPacket> {
        if self.state != SessionState::Searching {
            return None;
        }
        let last_send = self.last_send?;
        if now.saturating_duration_since(last_send) < self.attempt_timeout {
            return None;
        }
        if self.retries_remaining == 0 {
            self.state = SessionState::Failed(FailureCause::TimedOut);
            return None;
        }
        self.retries_remaining -= 1;
        self.last_send = Some(now);
        self.attempts += 1;
        Some(self.request())
    }

    pub fn cancel(&mut self) {
        if matches!(self.state, SessionState::Idle | SessionState::Searching) {
            self.state = SessionState::Failed(FailureCause::Cancelled);
        }
    }

    /// Run the session to a terminal state over `transport`.
    ///
    /// `idle` is slept between loop iterations once nothing is pending; zero
    /// spins. A session that already finished returns its recorded outcome
    /// without sending. The transport is closed before this returns.
    pub fn run<T, C>(
        &mut self,
        transport: &mut T,
        clock: &C,
        cancel: &CancelToken,
        idle: Duration,
    ) -> Result<SocketAddr, DiscoveryError>
    where
        T: DiscoveryTransport + ?Sized,
        C: Clock + ?Sized,
    {
        let endpoint = Release(transport);
        self.drive(&mut *endpoint.0, clock, cancel, idle)
    }

    fn drive<T, C>(
        &mut self,
        transport: &mut T,
        clock: &C,
        cancel: &CancelToken,
        idle: Duration,
    ) -> Result<SocketAddr, DiscoveryError>
    where
        T: DiscoveryTransport + ?Sized,
        C: Clock + ?Sized,
    {
        match self.start(clock.now()) {
            Some(request) => {
                debug!(target: DISCOVERY, "broadcasting {} request, serial {}", self.service, self.serial);
                send(transport, &request)?;
            }
            None => {
                if let Some(outcome) = self.outcome() {
                    debug!(target: DISCOVERY, "session already finished: {:?}", self.state);
                    return outcome;
                }
            }
        }

        let mut buf = [0u8; 1500];
        loop {
            if cancel.is_cancelled() {
                self.cancel();
                info!(target: DISCOVERY, "interrupted after {} attempts", self.attempts);
                return Err(DiscoveryError::Cancelled);
            }

            for _ in 0..MAX_DATAGRAMS_PER_POLL {
                match transport.try_receive(&mut buf) {
                    Ok(Some((len, src))) => {
                        #[cfg(feature = "packet-dump")]
                        debug!(target: DISCOVERY, "rx {} [{}]", src, crate::logging::hex_dump(&buf[..len]));

                        match self.on_datagram(&buf[..len], src) {
                            Ok(Some(server)) => {
                                info!(target: DISCOVERY, "{} server found at {}", self.service, server);
                                return Ok(server);
                            }
                            Ok(None) => {}
                            Err(e) => debug!(target: DISCOVERY, "discarding datagram from {}: {}", src, e),
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        debug!(target: DISCOVERY, "receive failed: {}", e);
                        break;
                    }
                }
            }

            if let Some(request) = self.on_tick(clock.now()) {
                info!(
                    target: DISCOVERY,
                    "T: no reply, re-sending ({} retries left)",
                    self.retries_remaining
                );
                send(transport, &request)?;
            } else if self.state == SessionState::Failed(FailureCause::TimedOut) {
                info!(target: DISCOVERY, "no {} server answered", self.service);
                return Err(DiscoveryError::TimedOut { attempts: self.attempts });
            }

            if !idle.is_zero() {
                thread::sleep(idle);
            }
        }
    }
}

fn send<T: DiscoveryTransport + ?Sized>(transport: &mut T, packet: &DiscoveryPacket) -> Result<(), DiscoveryError> {
    let bytes = packet.encode();
    #[cfg(feature = "packet-dump")]
    debug!(target: DISCOVERY, "tx [{}]", crate::logging::hex_dump(&bytes));
    transport.send_broadcast(&bytes)?;
    Ok(())
}
