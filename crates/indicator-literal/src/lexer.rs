//! Tokenizer for the literal grammar.
//!
//! Produces a flat token stream: delimiters, separators, quoted text,
//! byte strings and numbers. Whitespace between tokens is skipped. The
//! tokenizer stops after the first error.

use crate::error::{LiteralError, Result};

/// Bracket kinds that open and close a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Group {
    /// `( ... )`
    Paren,
    /// `[ ... ]`
    Bracket,
    /// `{ ... }`
    Brace,
}

impl Group {
    pub(crate) fn close_description(self) -> &'static str {
        match self {
            Group::Paren => "',' or ')'",
            Group::Bracket => "',' or ']'",
            Group::Brace => "',' or '}'",
        }
    }
}

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'a> {
    Open(Group),
    Close(Group),
    Comma,
    Colon,
    /// Quoted text with escapes resolved.
    Text(String),
    /// `b'...'` literal with escapes resolved.
    Bytes(Vec<u8>),
    /// Numeric token, kept with its source text.
    Number { text: &'a str, value: f64 },
}

impl Token<'_> {
    /// Short human-readable description for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Open(Group::Paren) => "'('".to_string(),
            Token::Open(Group::Bracket) => "'['".to_string(),
            Token::Open(Group::Brace) => "'{'".to_string(),
            Token::Close(Group::Paren) => "')'".to_string(),
            Token::Close(Group::Bracket) => "']'".to_string(),
            Token::Close(Group::Brace) => "'}'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Colon => "':'".to_string(),
            Token::Text(_) => "string".to_string(),
            Token::Bytes(_) => "bytes".to_string(),
            Token::Number { text, .. } => format!("number {}", text),
        }
    }
}

/// A token together with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned<'a> {
    pub offset: usize,
    pub token: Token<'a>,
}

/// Accumulates the body of a quoted literal.
enum Sink {
    Text(String),
    Bytes(Vec<u8>),
}

impl Sink {
    fn is_text(&self) -> bool {
        matches!(self, Sink::Text(_))
    }

    fn push_char(&mut self, ch: char, offset: usize) -> Result<()> {
        match self {
            Sink::Text(text) => {
                text.push(ch);
                Ok(())
            }
            Sink::Bytes(bytes) if ch.is_ascii() => {
                bytes.push(ch as u8);
                Ok(())
            }
            Sink::Bytes(_) => Err(LiteralError::NonAsciiBytes { offset }),
        }
    }

    /// Pushes a numeric escape (`\xHH`, octal, `\uHHHH`).
    fn push_code(&mut self, code: u32, offset: usize) -> Result<()> {
        match self {
            Sink::Text(text) => {
                let ch = char::from_u32(code).ok_or(LiteralError::InvalidEscape { offset })?;
                text.push(ch);
                Ok(())
            }
            Sink::Bytes(bytes) => {
                let byte = u8::try_from(code).map_err(|_| LiteralError::InvalidEscape { offset })?;
                bytes.push(byte);
                Ok(())
            }
        }
    }

    fn into_token<'a>(self) -> Token<'a> {
        match self {
            Sink::Text(text) => Token::Text(text),
            Sink::Bytes(bytes) => Token::Bytes(bytes),
        }
    }
}

/// Streaming tokenizer over a single line of input.
pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            failed: false,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn punct(&mut self, token: Token<'a>) -> Result<Token<'a>> {
        self.pos += 1;
        Ok(token)
    }

    fn number(&mut self) -> Result<Token<'a>> {
        let rest = &self.input[self.pos..];
        let len = rest
            .find(|c: char| !is_number_char(c))
            .unwrap_or(rest.len());
        let text = &rest[..len];
        self.pos += len;

        text.parse::<f64>()
            .map(|value| Token::Number { text, value })
            .map_err(|_| LiteralError::InvalidNumber {
                text: text.to_string(),
            })
    }

    /// Reads a quoted literal. `self.pos` must sit on the opening quote;
    /// `start` is the offset reported for unterminated literals.
    fn quoted(&mut self, start: usize, mut sink: Sink) -> Result<Token<'a>> {
        let quote = self.peek_char().ok_or(LiteralError::UnexpectedEnd)?;
        self.pos += quote.len_utf8();

        loop {
            let ch = self
                .peek_char()
                .ok_or(LiteralError::UnterminatedString { offset: start })?;
            let at = self.pos;
            self.pos += ch.len_utf8();

            match ch {
                c if c == quote => return Ok(sink.into_token()),
                '\n' | '\r' => return Err(LiteralError::UnterminatedString { offset: start }),
                '\\' => self.escape(&mut sink, start, at)?,
                c => sink.push_char(c, at)?,
            }
        }
    }

    /// Resolves one escape sequence; the backslash at `at` is already consumed.
    fn escape(&mut self, sink: &mut Sink, start: usize, at: usize) -> Result<()> {
        let ch = self
            .peek_char()
            .ok_or(LiteralError::UnterminatedString { offset: start })?;
        self.pos += ch.len_utf8();

        match ch {
            '\\' | '\'' | '"' => sink.push_char(ch, at),
            'n' => sink.push_char('\n', at),
            'r' => sink.push_char('\r', at),
            't' => sink.push_char('\t', at),
            'a' => sink.push_char('\u{07}', at),
            'b' => sink.push_char('\u{08}', at),
            'f' => sink.push_char('\u{0C}', at),
            'v' => sink.push_char('\u{0B}', at),
            '0'..='7' => {
                let mut code = ch as u32 - '0' as u32;
                for _ in 0..2 {
                    match self.peek_char() {
                        Some(d @ '0'..='7') => {
                            code = code * 8 + (d as u32 - '0' as u32);
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                sink.push_code(code, at)
            }
            'x' => {
                let code = self.hex_digits(2, at)?;
                sink.push_code(code, at)
            }
            'u' if sink.is_text() => {
                let code = self.hex_digits(4, at)?;
                sink.push_code(code, at)
            }
            'U' if sink.is_text() => {
                let code = self.hex_digits(8, at)?;
                sink.push_code(code, at)
            }
            // Unknown escapes keep the backslash.
            other => {
                sink.push_char('\\', at)?;
                sink.push_char(other, at + 1)
            }
        }
    }

    fn hex_digits(&mut self, count: usize, at: usize) -> Result<u32> {
        let digits = self
            .input
            .get(self.pos..self.pos + count)
            .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or(LiteralError::InvalidEscape { offset: at })?;
        self.pos += count;
        u32::from_str_radix(digits, 16).map_err(|_| LiteralError::InvalidEscape { offset: at })
    }

    fn bytes_prefix_follows(&self) -> bool {
        matches!(
            self.input[self.pos + 1..].chars().next(),
            Some('\'') | Some('"')
        )
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Spanned<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        self.skip_whitespace();
        let ch = self.peek_char()?;
        let offset = self.pos;

        let token = match ch {
            '(' => self.punct(Token::Open(Group::Paren)),
            ')' => self.punct(Token::Close(Group::Paren)),
            '[' => self.punct(Token::Open(Group::Bracket)),
            ']' => self.punct(Token::Close(Group::Bracket)),
            '{' => self.punct(Token::Open(Group::Brace)),
            '}' => self.punct(Token::Close(Group::Brace)),
            ',' => self.punct(Token::Comma),
            ':' => self.punct(Token::Colon),
            '\'' | '"' => self.quoted(offset, Sink::Text(String::new())),
            'b' | 'B' if self.bytes_prefix_follows() => {
                self.pos += 1;
                self.quoted(offset, Sink::Bytes(Vec::new()))
            }
            '0'..='9' | '+' | '-' | '.' => self.number(),
            other => Err(LiteralError::UnexpectedChar { ch: other, offset }),
        };

        match token {
            Ok(token) => Some(Ok(Spanned { offset, token })),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
