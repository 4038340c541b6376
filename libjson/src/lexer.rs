//! Phase 1: Lexer
//!
//! The lexer turns source text into tokens, one per call to
//! [`Lexer::next_token`]. The parser pulls tokens on demand, so the lexer
//! never looks further ahead than the literal it is matching:
//! - Punctuation: `[` `]` `{` `}` `:` `,`
//! - Literals: `true`, `false`, `null`
//! - Numbers: integer payloads when there is no fraction or exponent
//! - Strings: simple escapes decoded, `\u` left as written

use std::fmt;

use num_bigint::BigInt;

use crate::classify::{is_digit, is_whitespace};
use crate::error::{ParseContext, ParseError, Result};

/// Kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    Colon,
    Comma,
    True,
    False,
    Null,
    Number,
    String,
    /// Returned once the input is exhausted, and on every call after that.
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::BeginArray => "'['",
            TokenKind::EndArray => "']'",
            TokenKind::BeginObject => "'{'",
            TokenKind::EndObject => "'}'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::EndOfInput => "end of input",
        };
        f.write_str(name)
    }
}

/// Literal carried by number and string tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Sentinel for tokens without a literal.
    None,
    Integer(BigInt),
    Float(f64),
    String(String),
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::None => write!(f, "_"),
            Payload::Integer(n) => write!(f, "{}", n),
            Payload::Float(n) => write!(f, "{:?}", n),
            Payload::String(s) => write!(f, "{:?}", s),
        }
    }
}

/// A single token and where it started.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub payload: Payload,
    /// Zero-based line of the first character.
    pub line: usize,
    /// Zero-based column of the first character.
    pub col: usize,
}

impl Token {
    fn new(kind: TokenKind, payload: Payload, line: usize, col: usize) -> Self {
        Self {
            kind,
            payload,
            line,
            col,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, {})", self.kind, self.payload)
    }
}

/// Pull-based JSON tokenizer.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    ctx: ParseContext,
}

impl Lexer {
    /// Create a lexer with the default context.
    pub fn new(text: &str) -> Self {
        Self::with_context(text, ParseContext::default())
    }

    /// Create a lexer whose errors report locations using `ctx`.
    pub fn with_context(text: &str, ctx: ParseContext) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 0,
            col: 0,
            ctx,
        }
    }

    /// Character offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 0;
            } else {
                self.col += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(is_whitespace) {
            self.advance();
        }
    }

    fn error(&self, err: ParseError, line: usize, col: usize) -> ParseError {
        err.with_location(&self.ctx, line, col)
    }

    /// Read the next token from the input.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let (line, col) = (self.line, self.col);
        let Some(c) = self.current() else {
            return Ok(Token::new(TokenKind::EndOfInput, Payload::None, line, col));
        };

        let token = match c {
            '[' => self.punctuation(TokenKind::BeginArray),
            ']' => self.punctuation(TokenKind::EndArray),
            '{' => self.punctuation(TokenKind::BeginObject),
            '}' => self.punctuation(TokenKind::EndObject),
            ':' => self.punctuation(TokenKind::Colon),
            ',' => self.punctuation(TokenKind::Comma),
            '"' => self.string()?,
            '-' => self.number()?,
            c if is_digit(c) => self.number()?,
            't' if self.matches_literal("true") => self.literal(TokenKind::True, 4),
            'f' if self.matches_literal("false") => self.literal(TokenKind::False, 5),
            'n' if self.matches_literal("null") => self.literal(TokenKind::Null, 4),
            c => {
                return Err(self.error(ParseError::UnexpectedChar(c, String::new()), line, col));
            }
        };

        tracing::trace!(%token, line = token.line, col = token.col, "lexed token");
        Ok(token)
    }

    fn punctuation(&mut self, kind: TokenKind) -> Token {
        let token = Token::new(kind, Payload::None, self.line, self.col);
        self.advance();
        token
    }

    /// Fixed-distance lookahead for a keyword starting at the cursor.
    fn matches_literal(&self, word: &str) -> bool {
        word.chars()
            .enumerate()
            .all(|(i, expected)| self.peek(i) == Some(expected))
    }

    fn literal(&mut self, kind: TokenKind, len: usize) -> Token {
        let token = Token::new(kind, Payload::None, self.line, self.col);
        for _ in 0..len {
            self.advance();
        }
        token
    }

    /// Append a run of digits to `text`, returning whether any were read.
    fn take_digits(&mut self, text: &mut String) -> bool {
        let start = text.len();
        while let Some(c) = self.current().filter(|c| is_digit(*c)) {
            text.push(c);
            self.advance();
        }
        text.len() > start
    }

    fn number(&mut self) -> Result<Token> {
        let (line, col) = (self.line, self.col);
        let mut text = String::new();
        let mut is_float = false;

        if self.current() == Some('-') {
            text.push('-');
            self.advance();
        }

        // A leading zero stands alone; "01" lexes as two numbers.
        if self.current() == Some('0') {
            text.push('0');
            self.advance();
        } else if !self.take_digits(&mut text) {
            return Err(self.invalid_number(text, line, col));
        }

        if self.current() == Some('.') {
            is_float = true;
            text.push('.');
            self.advance();
            if !self.take_digits(&mut text) {
                return Err(self.invalid_number(text, line, col));
            }
        }

        if let Some(e @ ('e' | 'E')) = self.current() {
            is_float = true;
            text.push(e);
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.current() {
                text.push(sign);
                self.advance();
            }
            if !self.take_digits(&mut text) {
                return Err(self.invalid_number(text, line, col));
            }
        }

        let payload = if is_float {
            match text.parse::<f64>() {
                Ok(n) => Payload::Float(n),
                Err(_) => return Err(self.invalid_number(text, line, col)),
            }
        } else {
            match text.parse::<BigInt>() {
                Ok(n) => Payload::Integer(n),
                Err(_) => return Err(self.invalid_number(text, line, col)),
            }
        };

        Ok(Token::new(TokenKind::Number, payload, line, col))
    }

    fn invalid_number(&self, text: String, line: usize, col: usize) -> ParseError {
        self.error(ParseError::InvalidNumber(text, String::new()), line, col)
    }

    fn string(&mut self) -> Result<Token> {
        let (line, col) = (self.line, self.col);
        self.advance(); // opening quote

        let mut result = String::new();
        loop {
            match self.current() {
                None => {
                    return Err(self.error(ParseError::UnterminatedString(String::new()), line, col));
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let (esc_line, esc_col) = (self.line, self.col);
                    self.advance();
                    let decoded = match self.current() {
                        None => {
                            return Err(self.error(
                                ParseError::UnterminatedString(String::new()),
                                line,
                                col,
                            ));
                        }
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('b') => '\x08',
                        Some('f') => '\x0c',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        // Unicode escapes are kept as written.
                        Some('u') => {
                            result.push('\\');
                            'u'
                        }
                        Some(c) => {
                            return Err(self.error(
                                ParseError::BadEscape(c, String::new()),
                                esc_line,
                                esc_col,
                            ));
                        }
                    };
                    result.push(decoded);
                    self.advance();
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }

        Ok(Token::new(
            TokenKind::String,
            Payload::String(result),
            line,
            col,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            kinds.push(token.kind);
            if token.kind == TokenKind::EndOfInput {
                return kinds;
            }
        }
    }

    fn single(input: &str) -> Token {
        Lexer::new(input).next_token().unwrap()
    }

    #[test]
    fn test_all_punctuation() {
        assert_eq!(
            kinds("[]{}:,"),
            vec![
                TokenKind::BeginArray,
                TokenKind::EndArray,
                TokenKind::BeginObject,
                TokenKind::EndObject,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_object_token_sequence() {
        let mut lexer =
            Lexer::new(r#"{ "name": "greg", "age": 30, "married": true, "employer": null }"#);
        let expected = [
            (TokenKind::BeginObject, Payload::None),
            (TokenKind::String, Payload::String("name".into())),
            (TokenKind::Colon, Payload::None),
            (TokenKind::String, Payload::String("greg".into())),
            (TokenKind::Comma, Payload::None),
            (TokenKind::String, Payload::String("age".into())),
            (TokenKind::Colon, Payload::None),
            (TokenKind::Number, Payload::Integer(30.into())),
            (TokenKind::Comma, Payload::None),
            (TokenKind::String, Payload::String("married".into())),
            (TokenKind::Colon, Payload::None),
            (TokenKind::True, Payload::None),
            (TokenKind::Comma, Payload::None),
            (TokenKind::String, Payload::String("employer".into())),
            (TokenKind::Colon, Payload::None),
            (TokenKind::Null, Payload::None),
            (TokenKind::EndObject, Payload::None),
            (TokenKind::EndOfInput, Payload::None),
        ];
        for (kind, payload) in expected {
            let token = lexer.next_token().unwrap();
            assert_eq!(token.kind, kind);
            assert_eq!(token.payload, payload);
        }
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds("true false null"),
            vec![
                TokenKind::True,
                TokenKind::False,
                TokenKind::Null,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn test_end_of_input_is_idempotent() {
        let mut lexer = Lexer::new("  1 ");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Number);
        for _ in 0..3 {
            assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfInput);
        }
        assert_eq!(lexer.position(), 4);
    }

    #[test]
    fn test_integer_and_float_payloads() {
        assert_eq!(single("30").payload, Payload::Integer(30.into()));
        assert_eq!(single("1.11").payload, Payload::Float(1.11));
        assert_eq!(single("-123").payload, Payload::Integer((-123).into()));
        assert_eq!(single("-0.5").payload, Payload::Float(-0.5));
        assert_eq!(single("1e3").payload, Payload::Float(1000.0));
        assert_eq!(single("2.5E-1").payload, Payload::Float(0.25));
        assert_eq!(single("0").payload, Payload::Integer(0.into()));
    }

    #[test]
    fn test_big_integer() {
        let token = single("123456789012345678901234567890");
        assert_eq!(
            token.payload,
            Payload::Integer("123456789012345678901234567890".parse().unwrap())
        );
    }

    #[test]
    fn test_leading_zero_splits() {
        let mut lexer = Lexer::new("01");
        assert_eq!(lexer.next_token().unwrap().payload, Payload::Integer(0.into()));
        assert_eq!(lexer.next_token().unwrap().payload, Payload::Integer(1.into()));
    }

    #[test]
    fn test_invalid_numbers() {
        for input in ["-", "1.", "1.e5", "1e", "1e+", "-x"] {
            let err = Lexer::new(input).next_token().unwrap_err();
            assert!(
                matches!(err, ParseError::InvalidNumber(..)),
                "{input}: {err}"
            );
            assert_eq!(err.kind(), ErrorKind::Lex);
        }
        let err = Lexer::new("1.]").next_token().unwrap_err();
        assert_eq!(err.to_string(), "Invalid number \"1.\" at 1:1");
    }

    #[test]
    fn test_string() {
        assert_eq!(single("\"hello\"").payload, Payload::String("hello".into()));
        assert_eq!(single("\"\"").payload, Payload::String(String::new()));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            single(r#""the \" is OK""#).payload,
            Payload::String(r#"the " is OK"#.into())
        );
        assert_eq!(
            single(r#""a\\b\/c\n\r\t\b\f""#).payload,
            Payload::String("a\\b/c\n\r\t\x08\x0c".into())
        );
    }

    #[test]
    fn test_unicode_escape_kept_verbatim() {
        assert_eq!(
            single(r#""\u0041""#).payload,
            Payload::String(r"\u0041".into())
        );
    }

    #[test]
    fn test_bad_escape() {
        let err = Lexer::new(r#""a\qb""#).next_token().unwrap_err();
        assert_eq!(err, ParseError::BadEscape('q', " at 1:3".into()));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("\"unclosed").next_token().unwrap_err();
        assert_eq!(err.to_string(), "Unterminated string at 1:1");

        let err = Lexer::new("\"trailing backslash\\").next_token().unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedString(_)));
    }

    #[test]
    fn test_partial_literal() {
        let err = Lexer::new("tru").next_token().unwrap_err();
        assert_eq!(err.to_string(), "Unexpected character \"t\" at 1:1");

        let err = Lexer::new("nul").next_token().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedChar('n', _)));

        let err = Lexer::new("True").next_token().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedChar('T', _)));
    }

    #[test]
    fn test_unexpected_char_location() {
        let mut lexer = Lexer::with_context("[1,\n  @]", ParseContext::new(Some("doc.json")));
        for _ in 0..3 {
            lexer.next_token().unwrap();
        }
        let err = lexer.next_token().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected character \"@\" at 2:3 of <doc.json>"
        );
    }

    #[test]
    fn test_token_positions() {
        let mut lexer = Lexer::new("{\n  \"a\": 1\n}");
        let open = lexer.next_token().unwrap();
        let key = lexer.next_token().unwrap();
        assert_eq!((open.line, open.col), (0, 0));
        assert_eq!((key.line, key.col), (1, 2));
    }

    #[test]
    fn test_token_display() {
        assert_eq!(single("30").to_string(), "Token(number, 30)");
        assert_eq!(single("\"x\"").to_string(), "Token(string, \"x\")");
        assert_eq!(single("[").to_string(), "Token('[', _)");
    }
}
