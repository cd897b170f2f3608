use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Events that end the receive loop, plus setup failures.
#[derive(Debug, Error)]
pub enum ListenError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("receive failed: {0}")]
    Receive(#[source] io::Error),

    /// Text mode received a payload that is not ASCII.
    #[error("datagram from {sender} is not ASCII text")]
    NotAscii { sender: SocketAddr },

    #[error("failed to write datagram: {0}")]
    Output(#[source] io::Error),

    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

pub type Result<T> = std::result::Result<T, ListenError>;
