//! Phase 3: Materializer
//!
//! Walks a finished syntax tree once and converts it into a [`Value`]. The
//! tree is consumed, so strings and integers move into the result instead of
//! being copied.

use indexmap::IndexMap;

use crate::syntax::{NameValue, Node, Primitive};
use crate::value::Value;

/// Per-variant callbacks for [`walk`].
pub trait Visitor {
    type Output;

    fn visit_object(&mut self, members: Vec<NameValue>) -> Self::Output;
    fn visit_array(&mut self, items: Vec<Node>) -> Self::Output;
    fn visit_primitive(&mut self, primitive: Primitive) -> Self::Output;
}

/// Dispatch `node` to the visitor method for its variant.
pub fn walk<V: Visitor>(node: Node, visitor: &mut V) -> V::Output {
    match node {
        Node::Object(members) => visitor.visit_object(members),
        Node::Array(items) => visitor.visit_array(items),
        Node::Primitive(primitive) => visitor.visit_primitive(primitive),
    }
}

/// Visitor producing native values.
#[derive(Debug, Default, Clone, Copy)]
pub struct Materializer;

impl Visitor for Materializer {
    type Output = Value;

    fn visit_object(&mut self, members: Vec<NameValue>) -> Value {
        let mut obj = IndexMap::with_capacity(members.len());
        for NameValue { name, value } in members {
            // A repeated name overwrites in place: last value, first position.
            obj.insert(name, walk(value, self));
        }
        Value::Object(obj)
    }

    fn visit_array(&mut self, items: Vec<Node>) -> Value {
        Value::Array(items.into_iter().map(|item| walk(item, self)).collect())
    }

    fn visit_primitive(&mut self, primitive: Primitive) -> Value {
        match primitive {
            Primitive::Null => Value::Null,
            Primitive::Bool(b) => Value::Bool(b),
            Primitive::Integer(n) => Value::Integer(n),
            Primitive::Float(n) => Value::Float(n),
            Primitive::String(s) => Value::String(s),
        }
    }
}

/// Convert a syntax tree into a value.
pub fn materialize(root: Node) -> Value {
    walk(root, &mut Materializer)
}
