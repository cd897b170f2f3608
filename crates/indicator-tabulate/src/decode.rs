//! Two-pass line decoding: outer record, then inner mapping.

use crate::entry::LogEntry;
use crate::error::DecodeError;
use indicator_literal::{parse_mapping, record_payload};

/// Decodes one log line into an entry.
///
/// The line must be a record whose first element is a byte string; the
/// bytes must be ASCII text holding a mapping literal. Surrounding
/// whitespace (including a trailing `\r`) is ignored.
///
/// ```rust
/// use indicator_tabulate::decode_line;
///
/// let entry = decode_line(r#"(b'{"speed": "4.5"}', ('127.0.0.1', 10000))"#).unwrap();
/// assert_eq!(entry.get("speed"), Some("4.5"));
/// ```
pub fn decode_line(line: &str) -> Result<LogEntry, DecodeError> {
    let payload = record_payload(line.trim()).map_err(DecodeError::Record)?;
    if !payload.is_ascii() {
        return Err(DecodeError::NotAscii);
    }
    let text = std::str::from_utf8(&payload).map_err(|_| DecodeError::NotAscii)?;
    let pairs = parse_mapping(text).map_err(DecodeError::Mapping)?;
    Ok(pairs.into_iter().collect())
}

/// Decodes a raw line that may not be valid UTF-8.
pub fn decode_bytes(line: &[u8]) -> Result<LogEntry, DecodeError> {
    let text = std::str::from_utf8(line).map_err(|_| DecodeError::InvalidUtf8)?;
    decode_line(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicator_literal::LiteralError;

    #[test]
    fn decodes_single_quoted_mapping() {
        let entry = decode_line("(b\"{'vehicle': 'L-7', 'rpm': '812'}\", ('10.0.0.1', 9))").unwrap();
        assert_eq!(entry.names().collect::<Vec<_>>(), vec!["vehicle", "rpm"]);
    }

    #[test]
    fn trailing_carriage_return_ignored() {
        assert!(decode_line("(b'{}', ('h', 1))\r").unwrap().is_empty());
    }

    #[test]
    fn empty_line_is_a_record_error() {
        assert_eq!(
            decode_line("").unwrap_err(),
            DecodeError::Record(LiteralError::UnexpectedEnd)
        );
    }

    #[test]
    fn truncated_record() {
        assert!(matches!(
            decode_line(r#"(b'{"speed": "4.5"}', ('127.0.0"#).unwrap_err(),
            DecodeError::Record(_)
        ));
    }

    #[test]
    fn non_ascii_payload() {
        assert_eq!(
            decode_line(r"(b'{\xc3\xa9}', ('h', 1))").unwrap_err(),
            DecodeError::NotAscii
        );
    }

    #[test]
    fn payload_not_a_mapping() {
        assert!(matches!(
            decode_line("(b'[1, 2]', ('h', 1))").unwrap_err(),
            DecodeError::Mapping(_)
        ));
    }

    #[test]
    fn code_is_never_evaluated() {
        assert!(matches!(
            decode_line("(b\"__import__('os').system('true')\", ('h', 1))").unwrap_err(),
            DecodeError::Mapping(LiteralError::UnexpectedChar { ch: '_', .. })
        ));
    }

    #[test]
    fn invalid_utf8_bytes() {
        assert_eq!(
            decode_bytes(b"(b'{}', \xff)").unwrap_err(),
            DecodeError::InvalidUtf8
        );
    }
}
