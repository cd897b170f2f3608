//! Recursive-descent parser over the token stream.

use crate::error::{LiteralError, Result};
use crate::lexer::{Group, Spanned, Token, Tokenizer};
use std::iter::Peekable;
use std::vec::IntoIter;

/// A numeric literal, kept alongside its source spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    /// The number as written in the input.
    pub text: String,
    /// The parsed value.
    pub value: f64,
}

/// A parsed literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Quoted text.
    Text(String),
    /// Byte string (`b'...'`).
    Bytes(Vec<u8>),
    /// Integer or float.
    Number(Number),
    /// Parenthesized sequence. A single parenthesized item without a
    /// trailing comma is plain grouping, not a tuple.
    Tuple(Vec<Literal>),
    /// Bracketed sequence.
    List(Vec<Literal>),
}

impl Literal {
    /// Name of the literal kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Text(_) => "string",
            Literal::Bytes(_) => "bytes",
            Literal::Number(_) => "number",
            Literal::Tuple(_) => "tuple",
            Literal::List(_) => "list",
        }
    }

    /// Returns the elements if this is a tuple or a list.
    pub fn as_sequence(&self) -> Option<&[Literal]> {
        match self {
            Literal::Tuple(items) | Literal::List(items) => Some(items),
            _ => None,
        }
    }

    fn into_sequence(self) -> Result<Vec<Literal>> {
        match self {
            Literal::Tuple(items) | Literal::List(items) => Ok(items),
            other => Err(LiteralError::expected("tuple or list", other.kind())),
        }
    }
}

pub(crate) struct Parser<'a> {
    tokens: Peekable<IntoIter<Spanned<'a>>>,
}

impl<'a> Parser<'a> {
    /// Tokenizes the whole input up front.
    pub(crate) fn new(input: &'a str) -> Result<Self> {
        let tokens = Tokenizer::new(input).collect::<Result<Vec<_>>>()?;
        Ok(Self {
            tokens: tokens.into_iter().peekable(),
        })
    }

    fn next_token(&mut self) -> Result<Token<'a>> {
        self.tokens
            .next()
            .map(|spanned| spanned.token)
            .ok_or(LiteralError::UnexpectedEnd)
    }

    fn eat_close(&mut self, group: Group) -> bool {
        let closes = matches!(
            self.tokens.peek(),
            Some(Spanned { token: Token::Close(g), .. }) if *g == group
        );
        if closes {
            self.tokens.next();
        }
        closes
    }

    /// Fails if any token remains.
    pub(crate) fn finish(mut self) -> Result<()> {
        match self.tokens.next() {
            Some(spanned) => Err(LiteralError::TrailingInput {
                offset: spanned.offset,
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn literal(&mut self) -> Result<Literal> {
        match self.next_token()? {
            Token::Text(text) => Ok(Literal::Text(text)),
            Token::Bytes(bytes) => Ok(Literal::Bytes(bytes)),
            Token::Number { text, value } => Ok(Literal::Number(Number {
                text: text.to_string(),
                value,
            })),
            Token::Open(Group::Paren) => {
                let (mut items, saw_comma) = self.sequence(Group::Paren)?;
                if items.len() == 1 && !saw_comma {
                    if let Some(inner) = items.pop() {
                        return Ok(inner);
                    }
                }
                Ok(Literal::Tuple(items))
            }
            Token::Open(Group::Bracket) => {
                let (items, _) = self.sequence(Group::Bracket)?;
                Ok(Literal::List(items))
            }
            other => Err(LiteralError::expected("a value", other.describe())),
        }
    }

    /// Parses comma-separated items up to the closing delimiter of `group`.
    /// The opening delimiter is already consumed.
    fn sequence(&mut self, group: Group) -> Result<(Vec<Literal>, bool)> {
        let mut items = Vec::new();
        let mut saw_comma = false;

        loop {
            if self.eat_close(group) {
                return Ok((items, saw_comma));
            }
            items.push(self.literal()?);
            match self.next_token()? {
                Token::Comma => saw_comma = true,
                Token::Close(g) if g == group => return Ok((items, saw_comma)),
                other => {
                    return Err(LiteralError::expected(
                        group.close_description(),
                        other.describe(),
                    ))
                }
            }
        }
    }

    /// Parses `{ 'key': value, ... }` with string keys and string or
    /// numeric values. Pairs are returned in source order.
    pub(crate) fn mapping(&mut self) -> Result<Vec<(String, String)>> {
        match self.next_token()? {
            Token::Open(Group::Brace) => {}
            other => return Err(LiteralError::expected("'{'", other.describe())),
        }

        let mut pairs = Vec::new();
        loop {
            if self.eat_close(Group::Brace) {
                return Ok(pairs);
            }

            let key = match self.next_token()? {
                Token::Text(key) => key,
                other => return Err(LiteralError::expected("string key", other.describe())),
            };
            match self.next_token()? {
                Token::Colon => {}
                other => return Err(LiteralError::expected("':'", other.describe())),
            }
            let value = match self.next_token()? {
                Token::Text(value) => value,
                Token::Number { text, .. } => text.to_string(),
                other => {
                    return Err(LiteralError::expected(
                        "string or number value",
                        other.describe(),
                    ))
                }
            };
            pairs.push((key, value));

            match self.next_token()? {
                Token::Comma => {}
                Token::Close(Group::Brace) => return Ok(pairs),
                other => {
                    return Err(LiteralError::expected(
                        Group::Brace.close_description(),
                        other.describe(),
                    ))
                }
            }
        }
    }
}

/// Parses a single literal spanning the whole input.
pub fn parse_literal(input: &str) -> Result<Literal> {
    let mut parser = Parser::new(input)?;
    let literal = parser.literal()?;
    parser.finish()?;
    Ok(literal)
}

/// Parses an outer record: a tuple or list of literals.
pub fn parse_record(input: &str) -> Result<Vec<Literal>> {
    parse_literal(input)?.into_sequence()
}

/// Parses an outer record and returns its first element, which must be a
/// byte string.
///
/// ```rust
/// use indicator_literal::record_payload;
///
/// let payload = record_payload("(b'{}', ('127.0.0.1', 9000))").unwrap();
/// assert_eq!(payload, b"{}");
/// ```
pub fn record_payload(input: &str) -> Result<Vec<u8>> {
    let mut items = parse_record(input)?.into_iter();
    match items.next() {
        Some(Literal::Bytes(bytes)) => Ok(bytes),
        Some(other) => Err(LiteralError::expected("bytes", other.kind())),
        None => Err(LiteralError::Arity {
            expected: 1,
            found: 0,
        }),
    }
}

/// Parses a mapping literal into `(key, value)` pairs in source order.
///
/// Duplicate keys are kept; consumers that collect into a map decide which
/// occurrence wins.
///
/// ```rust
/// use indicator_literal::parse_mapping;
///
/// let pairs = parse_mapping(r#"{"speed": "10.5", 'gear1': 2}"#).unwrap();
/// assert_eq!(pairs[0], ("speed".to_string(), "10.5".to_string()));
/// assert_eq!(pairs[1], ("gear1".to_string(), "2".to_string()));
/// ```
pub fn parse_mapping(input: &str) -> Result<Vec<(String, String)>> {
    let mut parser = Parser::new(input)?;
    let pairs = parser.mapping()?;
    parser.finish()?;
    Ok(pairs)
}

/// Parses a three-element numeric tuple such as `(1.5, -2, 3e1)`.
///
/// ```rust
/// use indicator_literal::parse_triple;
///
/// assert_eq!(parse_triple("(1.0, 2.0, 3.0)").unwrap(), [1.0, 2.0, 3.0]);
/// ```
pub fn parse_triple(input: &str) -> Result<[f64; 3]> {
    let items = parse_record(input)?;
    if items.len() != 3 {
        return Err(LiteralError::Arity {
            expected: 3,
            found: items.len(),
        });
    }

    let mut triple = [0.0; 3];
    for (slot, item) in triple.iter_mut().zip(&items) {
        match item {
            Literal::Number(number) => *slot = number.value,
            other => return Err(LiteralError::expected("number", other.kind())),
        }
    }
    Ok(triple)
}
