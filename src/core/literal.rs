//! Restricted parser for pasted data literals
//!
//! Accepts only mapping, sequence and scalar literals such as
//! `{'height': 'tall', 'scars': ['left arm'], 'age': 17}` and rejects
//! everything else. Nothing is ever evaluated.

use serde_yaml::{Mapping, Value};

use super::error::{StoreError, StoreResult};

/// Maximum nesting depth accepted
const MAX_DEPTH: usize = 64;

/// Parse any literal value
pub fn parse_literal(input: &str) -> StoreResult<Value> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    let value = parser.parse_value(0)?;
    parser.skip_whitespace();
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("unexpected trailing input '{}'", c)));
    }
    Ok(value)
}

/// Parse a literal that must be a mapping at the top level
pub fn parse_mapping_literal(input: &str) -> StoreResult<Mapping> {
    match parse_literal(input)? {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(StoreError::validation("input must be a mapping")),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn error(&self, msg: impl Into<String>) -> StoreError {
        StoreError::validation(format!("{} at byte {}", msg.into(), self.pos))
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> StoreResult<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    fn parse_value(&mut self, depth: usize) -> StoreResult<Value> {
        if depth > MAX_DEPTH {
            return Err(self.error("literal nested too deeply"));
        }

        match self.peek() {
            Some('{') => self.parse_mapping(depth),
            Some('[') => self.parse_sequence(depth, ']'),
            Some('(') => self.parse_sequence(depth, ')'),
            Some('\'') | Some('"') => self.parse_string().map(Value::String),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => self.parse_number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_keyword(),
            Some(c) => Err(self.error(format!("unexpected '{}'", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_mapping(&mut self, depth: usize) -> StoreResult<Value> {
        self.expect('{')?;
        let mut mapping = Mapping::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Mapping(mapping));
            }

            let key_pos = self.pos;
            let key = self.parse_value(depth + 1)?;
            if matches!(key, Value::Mapping(_) | Value::Sequence(_)) {
                self.pos = key_pos;
                return Err(self.error("mapping keys must be scalars"));
            }

            self.skip_whitespace();
            self.expect(':')?;
            self.skip_whitespace();
            let value = self.parse_value(depth + 1)?;
            mapping.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {}
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{}'", c))),
                None => return Err(self.error("unterminated mapping")),
            }
        }
    }

    fn parse_sequence(&mut self, depth: usize, close: char) -> StoreResult<Value> {
        self.bump();
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(Value::Sequence(items));
            }

            items.push(self.parse_value(depth + 1)?);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {}
                Some(c) => return Err(self.error(format!("expected ',' or '{}', found '{}'", close, c))),
                None => return Err(self.error("unterminated sequence")),
            }
        }
    }

    fn parse_string(&mut self) -> StoreResult<String> {
        let quote = self.bump().unwrap_or('"');
        let mut out = String::new();

        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escaped = match self.bump() {
                        Some('\\') => '\\',
                        Some('\'') => '\'',
                        Some('"') => '"',
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('0') => '\0',
                        Some('u') => self.parse_unicode_escape()?,
                        Some(c) => return Err(self.error(format!("unknown escape '\\{}'", c))),
                        None => return Err(self.error("unterminated string")),
                    };
                    out.push(escaped);
                }
                Some('\n') => return Err(self.error("newline in string literal")),
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_unicode_escape(&mut self) -> StoreResult<char> {
        let end = self.pos + 4;
        let hex = self
            .src
            .get(self.pos..end)
            .ok_or_else(|| self.error("truncated \\u escape"))?;
        let code = u32::from_str_radix(hex, 16).map_err(|_| self.error("invalid \\u escape"))?;
        let c = char::from_u32(code).ok_or_else(|| self.error("invalid \\u code point"))?;
        self.pos = end;
        Ok(c)
    }

    fn parse_number(&mut self) -> StoreResult<Value> {
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.bump();
        }

        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {}
                '.' | 'e' | 'E' => is_float = true,
                '-' | '+' if is_float => {}
                _ => break,
            }
            self.bump();
        }

        let text = &self.src[start..self.pos];
        if is_float {
            let f: f64 = text
                .parse()
                .map_err(|_| self.error(format!("invalid number '{}'", text)))?;
            Ok(Value::from(f))
        } else {
            let i: i64 = text
                .parse()
                .map_err(|_| self.error(format!("invalid integer '{}'", text)))?;
            Ok(Value::from(i))
        }
    }

    fn parse_keyword(&mut self) -> StoreResult<Value> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            self.bump();
        }

        match &self.src[start..self.pos] {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            "None" | "null" => Ok(Value::Null),
            word => {
                let word = word.to_string();
                self.pos = start;
                Err(self.error(format!("'{}' is not a literal", word)))
            }
        }
    }
}
