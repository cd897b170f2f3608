//! Rendering of datagram records in the literal grammar.
//!
//! The listener's raw mode prints every datagram as
//! `(b'<payload>', ('<ip>', <port>))`, which [`record_payload`] reads back.
//!
//! [`record_payload`]: crate::record_payload

use std::fmt::Write;
use std::net::SocketAddr;

/// Renders bytes as a `b'...'` literal.
///
/// Single quotes are used unless the payload contains a single quote and no
/// double quote. Printable ASCII is kept as-is; `\t`, `\n`, `\r` use their
/// short escapes; every other byte becomes `\xHH`.
///
/// ```rust
/// use indicator_literal::bytes_literal;
///
/// assert_eq!(bytes_literal(b"speed\n"), r"b'speed\n'");
/// assert_eq!(bytes_literal(b"it's"), r#"b"it's""#);
/// ```
pub fn bytes_literal(payload: &[u8]) -> String {
    let quote = if payload.contains(&b'\'') && !payload.contains(&b'"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(payload.len() + 3);
    out.push('b');
    out.push(quote);
    for &byte in payload {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b if b as char == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\x{:02x}", byte);
            }
        }
    }
    out.push(quote);
    out
}

/// Renders a received datagram and its sender as one record line.
///
/// IPv6 senders carry flow info and scope id, matching the four-element
/// address tuple of an IPv6 socket.
///
/// ```rust
/// use indicator_literal::record_line;
///
/// let sender = "127.0.0.1:5000".parse().unwrap();
/// assert_eq!(record_line(b"{}", sender), "(b'{}', ('127.0.0.1', 5000))");
/// ```
pub fn record_line(payload: &[u8], sender: SocketAddr) -> String {
    let address = match sender {
        SocketAddr::V4(v4) => format!("('{}', {})", v4.ip(), v4.port()),
        SocketAddr::V6(v6) => format!(
            "('{}', {}, {}, {})",
            v6.ip(),
            v6.port(),
            v6.flowinfo(),
            v6.scope_id()
        ),
    };
    format!("({}, {})", bytes_literal(payload), address)
}
