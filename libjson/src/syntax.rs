//! Syntax tree built by the parser and consumed by the materializer.

use num_bigint::BigInt;

use crate::lexer::{Payload, Token, TokenKind};

/// A value position in the tree.
///
/// Object members are [`NameValue`] structs rather than nodes, so a tree can
/// never be rooted at a bare member.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Members in source order, duplicates included.
    Object(Vec<NameValue>),
    Array(Vec<Node>),
    Primitive(Primitive),
}

/// A `"name": value` member of an object.
#[derive(Debug, Clone, PartialEq)]
pub struct NameValue {
    pub name: String,
    pub value: Node,
}

impl NameValue {
    pub fn new(name: String, value: Node) -> Self {
        Self { name, value }
    }
}

/// A scalar resolved from its token.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Null,
    Bool(bool),
    Integer(BigInt),
    Float(f64),
    String(String),
}

impl Primitive {
    /// Resolve a scalar token, or `None` for tokens that are not scalars.
    pub fn from_token(token: Token) -> Option<Self> {
        match (token.kind, token.payload) {
            (TokenKind::True, _) => Some(Primitive::Bool(true)),
            (TokenKind::False, _) => Some(Primitive::Bool(false)),
            (TokenKind::Null, _) => Some(Primitive::Null),
            (TokenKind::Number, Payload::Integer(n)) => Some(Primitive::Integer(n)),
            (TokenKind::Number, Payload::Float(n)) => Some(Primitive::Float(n)),
            (TokenKind::String, Payload::String(s)) => Some(Primitive::String(s)),
            _ => None,
        }
    }
}

impl Node {
    /// Count of direct children; zero for primitives.
    pub fn len(&self) -> usize {
        match self {
            Node::Object(members) => members.len(),
            Node::Array(items) => items.len(),
            Node::Primitive(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
