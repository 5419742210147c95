//! Purpose: Infer vector/matrix shapes from nesting depth and normalize to canonical lists.
//! Exports: `normalize_vectors`, `normalize_matrices`, `parse_vector`, `vector_shape`,
//!          `matrix_shape`, `VectorShape`, `MatrixShape`.
//! Role: Lets producers write one vector or one matrix with minimal nesting while
//!       still accepting lists of them; the data's own depth is the only discriminator.
//! Invariants: Only the first element is inspected to pick a shape.
//! Invariants: Output is always the general form (list of vectors / list of matrices).
//! Invariants: Failures abort the whole field; no partial lists are returned.

use crate::core::context::ParseContext;
use crate::core::error::{Error, ErrorKind};
use crate::core::record::json_type;
use serde_json::Value;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VectorShape {
    Empty,
    /// The array itself is one flat vector.
    Single,
    /// The array holds vectors.
    Many,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatrixShape {
    Empty,
    /// Two nesting levels: the array's rows form one matrix.
    Single,
    /// Three nesting levels: the array holds matrices.
    Many,
}

pub fn vector_shape(items: &[Value]) -> VectorShape {
    match items.first() {
        None => VectorShape::Empty,
        Some(Value::Array(_)) => VectorShape::Many,
        Some(_) => VectorShape::Single,
    }
}

/// `None` when the array is too shallow to hold a matrix.
pub fn matrix_shape(items: &[Value]) -> Option<MatrixShape> {
    match items.first() {
        None => Some(MatrixShape::Empty),
        Some(Value::Array(rows)) => match rows.first() {
            Some(Value::Array(_)) => Some(MatrixShape::Many),
            _ => Some(MatrixShape::Single),
        },
        Some(_) => None,
    }
}

/// Parses a flat array element-by-element through the leaf parser.
pub fn parse_vector<L, F>(node: &Value, ctx: &ParseContext, leaf: &mut F) -> Result<Vec<L>, Error>
where
    F: FnMut(&Value, &ParseContext) -> Result<L, Error>,
{
    let Value::Array(items) = node else {
        return Err(ctx.error(
            ErrorKind::Shape,
            format!("expected array for vector, found {}", json_type(node)),
        ));
    };
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| leaf(item, &ctx.index(idx)))
        .collect()
}

pub fn normalize_vectors<L, F>(
    node: &Value,
    ctx: &ParseContext,
    leaf: &mut F,
) -> Result<Vec<Vec<L>>, Error>
where
    F: FnMut(&Value, &ParseContext) -> Result<L, Error>,
{
    let Value::Array(items) = node else {
        return Err(ctx.error(
            ErrorKind::Shape,
            format!("expected array for vectors, found {}", json_type(node)),
        ));
    };
    let shape = vector_shape(items);
    tracing::debug!(pointer = %ctx.pointer(), ?shape, len = items.len(), "normalizing vectors");
    match shape {
        VectorShape::Empty => Ok(Vec::new()),
        VectorShape::Many => items
            .iter()
            .enumerate()
            .map(|(idx, item)| parse_vector(item, &ctx.index(idx), leaf))
            .collect(),
        VectorShape::Single => Ok(vec![parse_vector(node, ctx, leaf)?]),
    }
}

pub fn normalize_matrices<L, F>(
    node: &Value,
    ctx: &ParseContext,
    leaf: &mut F,
) -> Result<Vec<Vec<Vec<L>>>, Error>
where
    F: FnMut(&Value, &ParseContext) -> Result<L, Error>,
{
    let Value::Array(items) = node else {
        return Err(ctx.error(
            ErrorKind::Shape,
            format!("expected array for matrices, found {}", json_type(node)),
        ));
    };
    let Some(shape) = matrix_shape(items) else {
        return Err(ctx.error(ErrorKind::Shape, "expected array-of-arrays for matrices"));
    };
    tracing::debug!(pointer = %ctx.pointer(), ?shape, len = items.len(), "normalizing matrices");
    match shape {
        MatrixShape::Empty => Ok(Vec::new()),
        MatrixShape::Many => items
            .iter()
            .enumerate()
            .map(|(idx, item)| normalize_vectors(item, &ctx.index(idx), leaf))
            .collect(),
        MatrixShape::Single => Ok(vec![normalize_vectors(node, ctx, leaf)?]),
    }
}
