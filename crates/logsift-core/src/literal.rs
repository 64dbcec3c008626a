//! Python literal parser.
//!
//! Some shippers write the message payload with `str(dict)` instead of a JSON
//! encoder, which yields single-quoted strings and `True`/`False`/`None`. This
//! module accepts exactly the container-literal subset those producers emit
//! (dicts, lists, tuples, sets, strings, numbers, booleans, `None`) and maps
//! it onto `serde_json::Value`. Tuples and sets become arrays; dict keys that
//! are not strings are stringified.

use serde_json::{Map, Number, Value};

const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid python literal at byte {pos}: {msg}")]
pub struct LiteralError {
    pub pos: usize,
    pub msg: String,
}

/// Parse a complete Python literal expression. Trailing input other than
/// whitespace is an error.
pub fn parse(src: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser { src, pos: 0, depth: 0 };
    parser.skip_ws();
    let value = parser.value()?;
    parser.skip_ws();
    if parser.pos != src.len() {
        return Err(parser.err("unexpected trailing input"));
    }
    Ok(value)
}

/// Parse `src` and return it only if it is a dict.
pub fn parse_dict(src: &str) -> Result<Map<String, Value>, LiteralError> {
    match parse(src)? {
        Value::Object(map) => Ok(map),
        _ => Err(LiteralError {
            pos: 0,
            msg: "expression is not a dict".to_string(),
        }),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn err(&self, msg: impl Into<String>) -> LiteralError {
        LiteralError {
            pos: self.pos,
            msg: msg.into(),
        }
    }

    fn rest(&self) -> &'a str {
        let src: &'a str = self.src;
        &src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.err(format!("expected {expected:?}")))
        }
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '\\' && self.rest()[1..].starts_with('\n') {
                // explicit line continuation
                self.pos += 2;
            } else {
                break;
            }
        }
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.err("nesting too deep"));
        }
        match self.peek() {
            None => Err(self.err("unexpected end of input")),
            Some('{') => self.nested(Self::dict_or_set),
            Some('[') => self.nested(|p| p.sequence('[', ']').map(Value::Array)),
            Some('(') => self.nested(Self::tuple_or_group),
            Some('-') | Some('+') => self.signed_number(),
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(false),
            Some(c) if c.is_alphabetic() || c == '_' || c == '\'' || c == '"' => {
                if self.at_string_start() {
                    self.strings()
                } else {
                    self.keyword()
                }
            }
            Some(c) => Err(self.err(format!("unexpected character {c:?}"))),
        }
    }

    fn nested(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    fn dict_or_set(&mut self) -> Result<Value, LiteralError> {
        self.expect('{')?;
        self.skip_ws();
        if self.eat('}') {
            return Ok(Value::Object(Map::new()));
        }

        let first = self.value()?;
        self.skip_ws();
        if !self.eat(':') {
            // set literal
            let mut items = vec![first];
            self.sequence_tail(&mut items, '}')?;
            return Ok(Value::Array(items));
        }

        let mut map = Map::new();
        self.skip_ws();
        let v = self.value()?;
        map.insert(key_string(first), v);
        loop {
            self.skip_ws();
            if self.eat('}') {
                return Ok(Value::Object(map));
            }
            self.expect(',')?;
            self.skip_ws();
            if self.eat('}') {
                return Ok(Value::Object(map));
            }
            let k = self.value()?;
            self.skip_ws();
            self.expect(':')?;
            self.skip_ws();
            let v = self.value()?;
            map.insert(key_string(k), v);
        }
    }

    fn tuple_or_group(&mut self) -> Result<Value, LiteralError> {
        self.expect('(')?;
        self.skip_ws();
        if self.eat(')') {
            return Ok(Value::Array(Vec::new()));
        }
        let first = self.value()?;
        self.skip_ws();
        if self.eat(')') {
            // parenthesised expression, not a tuple
            return Ok(first);
        }
        let mut items = vec![first];
        self.sequence_tail(&mut items, ')')?;
        Ok(Value::Array(items))
    }

    fn sequence(&mut self, open: char, close: char) -> Result<Vec<Value>, LiteralError> {
        self.expect(open)?;
        self.skip_ws();
        let mut items = Vec::new();
        if self.eat(close) {
            return Ok(items);
        }
        items.push(self.value()?);
        self.sequence_tail(&mut items, close)?;
        Ok(items)
    }

    /// Continue a comma-separated sequence after its first element.
    fn sequence_tail(&mut self, items: &mut Vec<Value>, close: char) -> Result<(), LiteralError> {
        loop {
            self.skip_ws();
            if self.eat(close) {
                return Ok(());
            }
            self.expect(',')?;
            self.skip_ws();
            if self.eat(close) {
                return Ok(());
            }
            items.push(self.value()?);
        }
    }

    fn keyword(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::Null),
            other => {
                self.pos = start;
                Err(self.err(format!("name {other:?} is not a literal")))
            }
        }
    }

    /// A single unary `+`/`-` applied to a numeric constant. Stacked signs
    /// (`--5`) are not literals.
    fn signed_number(&mut self) -> Result<Value, LiteralError> {
        let negative = self.bump() == Some('-');
        self.skip_ws();
        match self.peek() {
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(negative),
            _ => Err(self.err("expected number after sign")),
        }
    }

    fn number(&mut self, negative: bool) -> Result<Value, LiteralError> {
        let start = self.pos;
        let radix = match self.rest().get(..2).map(str::to_ascii_lowercase).as_deref() {
            Some("0x") => Some(16),
            Some("0o") => Some(8),
            Some("0b") => Some(2),
            _ => None,
        };

        if let Some(radix) = radix {
            self.pos += 2;
            let digits_start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
                self.bump();
            }
            let digits: String = self.src[digits_start..self.pos]
                .chars()
                .filter(|c| *c != '_')
                .collect();
            let n = u64::from_str_radix(&digits, radix)
                .map_err(|_| LiteralError { pos: start, msg: "invalid integer".into() })?;
            return Ok(int_value(n as i128, negative, &self.src[start..self.pos]));
        }

        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '_' => {}
                '.' => is_float = true,
                'e' | 'E' => {
                    is_float = true;
                    self.bump();
                    if matches!(self.peek(), Some('+') | Some('-')) {
                        self.bump();
                    }
                    continue;
                }
                'j' | 'J' => return Err(self.err("complex numbers are not supported")),
                _ => break,
            }
            self.bump();
        }

        let text: String = self.src[start..self.pos].chars().filter(|c| *c != '_').collect();
        if is_float {
            let f: f64 = text
                .parse()
                .map_err(|_| LiteralError { pos: start, msg: "invalid float".into() })?;
            let f = if negative { -f } else { f };
            return Number::from_f64(f)
                .map(Value::Number)
                .ok_or_else(|| LiteralError { pos: start, msg: "non-finite float".into() });
        }
        match text.parse::<i128>() {
            Ok(n) => Ok(int_value(n, negative, &text)),
            Err(_) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
                Ok(big_int(negative, &text))
            }
            Err(_) => Err(LiteralError { pos: start, msg: "invalid integer".into() }),
        }
    }

    fn at_string_start(&self) -> bool {
        let rest = self.rest();
        let prefix_len = rest
            .chars()
            .take_while(|c| matches!(c, 'r' | 'R' | 'b' | 'B' | 'u' | 'U'))
            .count();
        prefix_len <= 2 && matches!(rest[prefix_len..].chars().next(), Some('\'' | '"'))
    }

    /// One or more adjacent string literals, concatenated as Python does.
    fn strings(&mut self) -> Result<Value, LiteralError> {
        let mut out = self.string()?;
        loop {
            let save = self.pos;
            self.skip_ws();
            if matches!(self.peek(), Some(c) if c == '\'' || c == '"' || c.is_alphabetic())
                && self.at_string_start()
            {
                out.push_str(&self.string()?);
            } else {
                self.pos = save;
                return Ok(Value::String(out));
            }
        }
    }

    fn string(&mut self) -> Result<String, LiteralError> {
        let mut raw = false;
        while let Some(c) = self.peek() {
            match c {
                'r' | 'R' => raw = true,
                'b' | 'B' | 'u' | 'U' => {}
                _ => break,
            }
            self.bump();
        }
        let quote = self.bump().ok_or_else(|| self.err("expected quote"))?;
        let triple = self.rest().starts_with(&format!("{quote}{quote}"));
        if triple {
            self.pos += 2;
        }

        let mut out = String::new();
        loop {
            let c = self.bump().ok_or_else(|| self.err("unterminated string"))?;
            if c == quote {
                if !triple {
                    return Ok(out);
                }
                if self.rest().starts_with(&format!("{quote}{quote}")) {
                    self.pos += 2;
                    return Ok(out);
                }
                out.push(c);
                continue;
            }
            match c {
                '\n' if !triple => return Err(self.err("newline in string")),
                '\\' if raw => {
                    out.push('\\');
                    if let Some(next) = self.bump() {
                        out.push(next);
                    }
                }
                '\\' => self.escape(&mut out)?,
                _ => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        let c = self.bump().ok_or_else(|| self.err("unterminated escape"))?;
        match c {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            'x' => out.push(self.hex_escape(2)?),
            'u' => out.push(self.hex_escape(4)?),
            'U' => out.push(self.hex_escape(8)?),
            '0'..='7' => {
                let mut n = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            n = n * 8 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(n).ok_or_else(|| self.err("invalid octal escape"))?);
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn hex_escape(&mut self, len: usize) -> Result<char, LiteralError> {
        let digits = self
            .rest()
            .get(..len)
            .ok_or_else(|| self.err("truncated escape"))?;
        let code = u32::from_str_radix(digits, 16).map_err(|_| self.err("invalid hex escape"))?;
        self.pos += len;
        char::from_u32(code).ok_or_else(|| self.err("invalid code point"))
    }
}

fn int_value(n: i128, negative: bool, text: &str) -> Value {
    let n = if negative { -n } else { n };
    if let Ok(v) = i64::try_from(n) {
        return Value::Number(v.into());
    }
    if let Ok(v) = u64::try_from(n) {
        return Value::Number(v.into());
    }
    big_int(negative, text)
}

/// Python ints are unbounded; keep the digits rather than lose precision.
fn big_int(negative: bool, text: &str) -> Value {
    let sign = if negative { "-" } else { "" };
    Value::String(format!("{sign}{text}"))
}

fn key_string(key: Value) -> String {
    match key {
        Value::String(s) => s,
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}
