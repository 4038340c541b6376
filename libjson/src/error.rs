//! Error types for JSON parsing.

use thiserror::Error;

use crate::lexer::TokenKind;

/// Result type for JSON parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Nesting depth allowed when no limit is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Parse context carrying the settings every phase consults.
#[derive(Clone, Debug)]
pub struct ParseContext {
    /// Name reported in error locations.
    pub filename: Option<String>,
    /// Deepest allowed nesting of arrays and objects.
    pub max_depth: usize,
}

impl ParseContext {
    /// Create a new parse context with the default depth limit.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the nesting depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Format a location suffix for error messages.
    pub fn loc_suffix(&self, line: usize, col: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", line + 1, col + 1, name),
            None => format!(" at {}:{}", line + 1, col + 1),
        }
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Which phase rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The lexer met a character it cannot start or continue a token with.
    Lex,
    /// The token stream does not match the grammar.
    Syntax,
}

/// Error type for JSON parsing.
///
/// The trailing `String` of every variant is the location suffix filled in
/// by [`ParseError::with_location`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Character that cannot start a token.
    #[error("Unexpected character \"{0}\"{1}")]
    UnexpectedChar(char, String),

    /// End of input inside a string literal.
    #[error("Unterminated string{0}")]
    UnterminatedString(String),

    /// Backslash followed by a character with no escape meaning.
    #[error("Bad escaped character \"\\{0}\"{1}")]
    BadEscape(char, String),

    /// Malformed number literal.
    #[error("Invalid number \"{0}\"{1}")]
    InvalidNumber(String, String),

    /// `eat` found a different token than the grammar requires.
    #[error("Expected {0}, found {1}{2}")]
    Expected(TokenKind, TokenKind, String),

    /// Token that cannot start a value.
    #[error("Expected a value, found {0}{1}")]
    ExpectedValue(TokenKind, String),

    /// Tokens left over after the top-level value.
    #[error("Parser returned before end of input, found {0}{1}")]
    ExtraContent(TokenKind, String),

    /// Arrays and objects nested past the configured limit.
    #[error("Nesting deeper than {0} levels{1}")]
    DepthExceeded(usize, String),
}

impl ParseError {
    /// Create an error with location information.
    pub fn with_location(self, ctx: &ParseContext, line: usize, col: usize) -> Self {
        let suffix = ctx.loc_suffix(line, col);
        match self {
            ParseError::UnexpectedChar(c, _) => ParseError::UnexpectedChar(c, suffix),
            ParseError::UnterminatedString(_) => ParseError::UnterminatedString(suffix),
            ParseError::BadEscape(c, _) => ParseError::BadEscape(c, suffix),
            ParseError::InvalidNumber(text, _) => ParseError::InvalidNumber(text, suffix),
            ParseError::Expected(want, found, _) => ParseError::Expected(want, found, suffix),
            ParseError::ExpectedValue(found, _) => ParseError::ExpectedValue(found, suffix),
            ParseError::ExtraContent(found, _) => ParseError::ExtraContent(found, suffix),
            ParseError::DepthExceeded(limit, _) => ParseError::DepthExceeded(limit, suffix),
        }
    }

    /// The phase that produced this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnexpectedChar(..)
            | ParseError::UnterminatedString(_)
            | ParseError::BadEscape(..)
            | ParseError::InvalidNumber(..) => ErrorKind::Lex,
            ParseError::Expected(..)
            | ParseError::ExpectedValue(..)
            | ParseError::ExtraContent(..)
            | ParseError::DepthExceeded(..) => ErrorKind::Syntax,
        }
    }
}
