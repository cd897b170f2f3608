//! UDP listener for indicator telemetry.
//!
//! Binds a socket, then prints every datagram it receives, one per line,
//! until a receive error, an interrupt, or an optional datagram count ends
//! the loop.
//!
//! In [`PrintMode::Raw`] each line is a record that the tabulator reads
//! back, so a capture can be fed straight into it:
//!
//! ```text
//! (b'{"speed": "4.5"}', ('127.0.0.1', 10000))
//! ```

mod error;

pub use error::{ListenError, Result};

use indicator_literal::record_line;
use std::io::{ErrorKind, Write};
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Largest datagram read in one receive.
pub const MAX_DATAGRAM: usize = 0x10000;

/// How often the receive loop checks for an interrupt.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// How datagrams are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrintMode {
    /// Payload decoded as ASCII text.
    #[default]
    Text,
    /// Payload and sender as a record line.
    Raw,
}

#[derive(Debug, Clone)]
pub struct ListenerConfig {
    pub host: String,
    pub port: u16,
    pub mode: PrintMode,
    /// Stop after this many datagrams.
    pub count: Option<usize>,
    pub poll_interval: Duration,
}

impl ListenerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            mode: PrintMode::default(),
            count: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Why the receive loop ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// The configured number of datagrams was printed.
    Count(usize),
    Interrupted,
}

/// Formats one datagram for printing.
pub fn format_datagram(payload: &[u8], sender: SocketAddr, mode: PrintMode) -> Result<String> {
    match mode {
        PrintMode::Text => {
            if !payload.is_ascii() {
                return Err(ListenError::NotAscii { sender });
            }
            Ok(payload.iter().map(|&byte| byte as char).collect())
        }
        PrintMode::Raw => Ok(record_line(payload, sender)),
    }
}

/// Installs a Ctrl-C handler and returns the flag it raises.
pub fn interrupt_flag() -> Result<Arc<AtomicBool>> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })?;
    Ok(interrupted)
}

/// A bound UDP socket and the settings for its receive loop.
///
/// The socket is closed when the listener is dropped.
#[derive(Debug)]
pub struct Listener {
    socket: UdpSocket,
    config: ListenerConfig,
}

impl Listener {
    pub fn bind(config: ListenerConfig) -> Result<Self> {
        let address = format!("{}:{}", config.host, config.port);
        let bind_error = |source| ListenError::Bind {
            address: address.clone(),
            source,
        };

        let socket = UdpSocket::bind((config.host.as_str(), config.port)).map_err(bind_error)?;
        socket
            .set_read_timeout(Some(config.poll_interval))
            .map_err(bind_error)?;

        info!(address = %address, "listener bound");
        Ok(Self { socket, config })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn config(&self) -> &ListenerConfig {
        &self.config
    }

    /// Receives and prints datagrams to `out` until the loop ends.
    ///
    /// `interrupted` is checked between receives; read timeouts only serve
    /// to reach that check and never end the loop.
    pub fn run<W: Write>(&self, mut out: W, interrupted: &AtomicBool) -> Result<Stop> {
        let mut buffer = vec![0u8; MAX_DATAGRAM];
        let mut received = 0;

        loop {
            if self.config.count.is_some_and(|limit| received >= limit) {
                return Ok(Stop::Count(received));
            }
            if interrupted.load(Ordering::SeqCst) {
                return Ok(Stop::Interrupted);
            }

            match self.socket.recv_from(&mut buffer) {
                Ok((size, sender)) => {
                    debug!(size, sender = %sender, "datagram received");
                    let line = format_datagram(&buffer[..size], sender, self.config.mode)?;
                    writeln!(out, "{}", line).map_err(ListenError::Output)?;
                    out.flush().map_err(ListenError::Output)?;
                    received += 1;
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
                    ) => {}
                Err(e) => return Err(ListenError::Receive(e)),
            }
        }
    }
}
