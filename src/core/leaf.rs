//! Purpose: Seam between the core and whatever leaf datum type a caller models.
//! Exports: `Leaf`.
//! Role: The shape normalizer calls `parse_leaf` once per leaf node it walks.
//! Invariants: Leaves are immutable values; parsing gets a single node, never raw text.
//! Notes: `serde_json::Value` is a pass-through leaf useful for inspecting shapes.

use crate::core::context::ParseContext;
use crate::core::error::Error;
use serde_json::Value;

pub trait Leaf: Clone + Sized {
    fn parse_leaf(node: &Value, ctx: &ParseContext) -> Result<Self, Error>;

    fn to_json(&self) -> Value;
}

impl Leaf for Value {
    fn parse_leaf(node: &Value, _ctx: &ParseContext) -> Result<Self, Error> {
        Ok(node.clone())
    }

    fn to_json(&self) -> Value {
        self.clone()
    }
}
