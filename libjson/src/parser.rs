//! Phase 2: Parser
//!
//! A recursive-descent parser over the lexer's token stream with exactly one
//! token of lookahead. It accepts:
//!
//! ```text
//! value      := object | array | number | string | "true" | "false" | "null"
//! object     := '{' [ name_value (',' name_value)* ] '}'
//! array      := '[' [ value (',' value)* ] ']'
//! name_value := string ':' value
//! ```
//!
//! The first grammar violation aborts the parse; nothing is recovered.

use crate::error::{ParseContext, ParseError, Result};
use crate::lexer::{Lexer, Payload, Token, TokenKind};
use crate::materialize::materialize;
use crate::syntax::{NameValue, Node, Primitive};
use crate::value::Value;

/// JSON parser owning its lexer and the current lookahead token.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    ctx: ParseContext,
    depth: usize,
}

impl Parser {
    /// Create a parser with the default context and pre-fetch the first token.
    pub fn new(text: &str) -> Result<Self> {
        Self::with_context(text, ParseContext::default())
    }

    /// Create a parser with an explicit context.
    pub fn with_context(text: &str, ctx: ParseContext) -> Result<Self> {
        let mut lexer = Lexer::with_context(text, ctx.clone());
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            ctx,
            depth: 0,
        })
    }

    /// Parse the whole input and materialize it.
    pub fn parse(self) -> Result<Value> {
        let root = self.parse_tree()?;
        Ok(materialize(root))
    }

    /// Parse the whole input into a syntax tree.
    pub fn parse_tree(mut self) -> Result<Node> {
        let root = self.value()?;
        if self.current.kind != TokenKind::EndOfInput {
            return Err(self.error(ParseError::ExtraContent(self.current.kind, String::new())));
        }
        Ok(root)
    }

    /// Locate an error at the lookahead token.
    fn error(&self, err: ParseError) -> ParseError {
        err.with_location(&self.ctx, self.current.line, self.current.col)
    }

    /// Consume the lookahead if it has the expected kind, returning it.
    fn eat(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind != kind {
            return Err(self.error(ParseError::Expected(
                kind,
                self.current.kind,
                String::new(),
            )));
        }
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn value(&mut self) -> Result<Node> {
        match self.current.kind {
            TokenKind::BeginObject => self.object(),
            TokenKind::BeginArray => self.array(),
            kind @ (TokenKind::Number
            | TokenKind::String
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null) => {
                let token = self.eat(kind)?;
                let (line, col) = (token.line, token.col);
                match Primitive::from_token(token) {
                    Some(primitive) => Ok(Node::Primitive(primitive)),
                    None => Err(ParseError::ExpectedValue(kind, String::new())
                        .with_location(&self.ctx, line, col)),
                }
            }
            found => Err(self.error(ParseError::ExpectedValue(found, String::new()))),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.ctx.max_depth {
            return Err(self.error(ParseError::DepthExceeded(self.ctx.max_depth, String::new())));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn object(&mut self) -> Result<Node> {
        self.enter()?;
        self.eat(TokenKind::BeginObject)?;

        let mut members = Vec::new();
        if self.current.kind != TokenKind::EndObject {
            members.push(self.name_value()?);
            while self.current.kind == TokenKind::Comma {
                self.eat(TokenKind::Comma)?;
                members.push(self.name_value()?);
            }
        }

        self.eat(TokenKind::EndObject)?;
        self.leave();
        Ok(Node::Object(members))
    }

    fn array(&mut self) -> Result<Node> {
        self.enter()?;
        self.eat(TokenKind::BeginArray)?;

        let mut items = Vec::new();
        if self.current.kind != TokenKind::EndArray {
            items.push(self.value()?);
            while self.current.kind == TokenKind::Comma {
                self.eat(TokenKind::Comma)?;
                items.push(self.value()?);
            }
        }

        self.eat(TokenKind::EndArray)?;
        self.leave();
        Ok(Node::Array(items))
    }

    fn name_value(&mut self) -> Result<NameValue> {
        let token = self.eat(TokenKind::String)?;
        let name = match token.payload {
            Payload::String(name) => name,
            _ => {
                return Err(
                    ParseError::Expected(TokenKind::String, token.kind, String::new())
                        .with_location(&self.ctx, token.line, token.col),
                );
            }
        };
        self.eat(TokenKind::Colon)?;
        let value = self.value()?;
        Ok(NameValue::new(name, value))
    }
}
