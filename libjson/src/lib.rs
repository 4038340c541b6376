//! JSON decoder.
//!
//! Converts JSON source text into a [`Value`]. Only decoding is provided.
//!
//! # Parsing Pipeline
//!
//! The parser operates in three phases:
//!
//! 1. **Lexer**: Produces tokens from the source text one at a time, on
//!    demand, classifying characters through [`classify`].
//!
//! 2. **Parser**: Pulls tokens with one token of lookahead and builds a
//!    syntax tree of [`Node`]s, failing on the first grammar violation.
//!
//! 3. **Materializer**: Consumes the finished tree in a single walk and
//!    produces the [`Value`].

pub mod classify;
mod error;
mod lexer;
mod materialize;
mod parser;
mod syntax;
mod value;

pub use error::{ErrorKind, ParseContext, ParseError, Result, DEFAULT_MAX_DEPTH};
pub use lexer::{Lexer, Payload, Token, TokenKind};
pub use materialize::{materialize, walk, Materializer, Visitor};
pub use parser::Parser;
pub use syntax::{NameValue, Node, Primitive};
pub use value::Value;

/// Parse a JSON document from a string.
///
/// # Example
///
/// ```
/// use libjson::parse;
///
/// let value = parse(r#"{"age": 30}"#).unwrap();
/// assert_eq!(value["age"].as_i64(), Some(30));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_with_context(input, &ParseContext::default())
}

/// Parse a JSON document from a string with a filename for error messages.
pub fn parse_with_filename(input: &str, filename: Option<&str>) -> Result<Value> {
    parse_with_context(input, &ParseContext::new(filename))
}

/// Parse a JSON document with explicit settings.
pub fn parse_with_context(input: &str, ctx: &ParseContext) -> Result<Value> {
    tracing::debug!(
        len = input.len(),
        filename = ctx.filename.as_deref(),
        "parsing"
    );

    let result = Parser::with_context(input, ctx.clone()).and_then(Parser::parse);

    match &result {
        Ok(value) => tracing::debug!(len = value.len(), "parsed"),
        Err(err) => tracing::debug!(%err, kind = ?err.kind(), "parse failed"),
    }
    result
}
