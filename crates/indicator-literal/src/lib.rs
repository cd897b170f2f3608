//! Explicit literal grammar for indicator telemetry records.
//!
//! Telemetry logs store one record per line. Each record is a tuple whose
//! first element is a byte string holding a mapping literal, and one field
//! of that mapping (`position`) is itself a serialized numeric tuple:
//!
//! ```text
//! (b'{"vehicle":"L-042","speed":"12.5","position":"(10.0, 2.5, -4.0)"}', ('127.0.0.1', 10000))
//! ```
//!
//! This crate parses exactly that shape and nothing more. It never
//! evaluates input: the grammar only knows strings, byte strings, numbers,
//! tuples, lists and flat string mappings.
//!
//! # Example
//!
//! ```rust
//! use indicator_literal::{parse_mapping, parse_triple, record_payload};
//!
//! let line = r#"(b'{"speed":"12.5","position":"(1.0, 2.0, 3.0)"}', ('127.0.0.1', 10000))"#;
//!
//! let payload = record_payload(line).unwrap();
//! let text = std::str::from_utf8(&payload).unwrap();
//! let pairs = parse_mapping(text).unwrap();
//! assert_eq!(pairs[0].0, "speed");
//!
//! let xyz = parse_triple(&pairs[1].1).unwrap();
//! assert_eq!(xyz, [1.0, 2.0, 3.0]);
//! ```
//!
//! # Grammar
//!
//! Version [`GRAMMAR_VERSION`]:
//!
//! ```text
//! record   := '(' item (',' item)* ','? ')' | '[' item (',' item)* ','? ']'
//! item     := bytes | string | number | record
//! bytes    := ('b' | 'B') quoted
//! string   := quoted
//! quoted   := '\'' char* '\'' | '"' char* '"'
//! mapping  := '{' (string ':' value (',' string ':' value)* ','?)? '}'
//! value    := string | number
//! triple   := record of exactly three numbers
//! number   := ['+'|'-'] digits ['.' digits] [('e'|'E') ['+'|'-'] digits]
//! ```
//!
//! Escapes inside quotes: `\\ \' \" \n \r \t \a \b \f \v`, octal `\ooo`,
//! `\xHH`, and `\uHHHH` / `\UHHHHHHHH` in text strings. Unknown escapes
//! keep their backslash. Byte strings only accept ASCII characters.
//! A parenthesized single item without a trailing comma is grouping, not a
//! tuple.

mod error;
mod lexer;
mod parse;
mod render;

pub use error::{LiteralError, Result};
pub use parse::{
    parse_literal, parse_mapping, parse_record, parse_triple, record_payload, Literal, Number,
};
pub use render::{bytes_literal, record_line};

/// Version of the grammar accepted by this crate.
pub const GRAMMAR_VERSION: u32 = 1;

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn field_name() -> impl Strategy<Value = String> {
        "[a-z_][a-z0-9_]{0,12}"
    }

    fn field_value() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 .,:()_-]{0,24}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn parser_never_panics(input in "\\PC{0,64}") {
            let _ = parse_literal(&input);
            let _ = parse_mapping(&input);
            let _ = parse_triple(&input);
        }

        #[test]
        fn rendered_payload_parses_back(payload in proptest::collection::vec(any::<u8>(), 0..128)) {
            let sender = "10.1.2.3:4567".parse().unwrap();
            let line = record_line(&payload, sender);
            prop_assert_eq!(record_payload(&line).unwrap(), payload);
        }

        #[test]
        fn mapping_keeps_key_order(
            pairs in proptest::collection::vec((field_name(), field_value()), 0..8)
        ) {
            let body = pairs
                .iter()
                .map(|(k, v)| format!("'{}': '{}'", k, v))
                .collect::<Vec<_>>()
                .join(", ");
            let parsed = parse_mapping(&format!("{{{}}}", body)).unwrap();
            prop_assert_eq!(parsed, pairs);
        }

        #[test]
        fn formatted_triples_parse(x in -1e6f64..1e6, y in -1e6f64..1e6, z in -1e6f64..1e6) {
            let text = format!("({:.3}, {:.3}, {:.3})", x, y, z);
            let parsed = parse_triple(&text).unwrap();
            prop_assert!((parsed[0] - x).abs() < 1e-3);
            prop_assert!((parsed[1] - y).abs() < 1e-3);
            prop_assert!((parsed[2] - z).abs() < 1e-3);
        }
    }
}
