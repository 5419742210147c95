//! Purpose: Numeric value container holding scalars, vectors, and matrices.
//! Exports: `NumericValue`, `Vector`, `Matrix`.
//! Role: Extensible record whose array fields accept several nesting depths on input.
//! Invariants: The three lists are independent; vectors may be ragged.
//! Invariants: Lists are allocated on first add and never pruned back to absent.
//! Invariants: Absent lists are omitted on output; allocated-but-empty lists emit `[]`.
//! Notes: Input normalization is lossy in one direction. A single vector written
//!        flat (`[1,2]`) is re-emitted as a one-element list (`[[1,2]]`), and a
//!        single two-level matrix as `[[[..]]]`. Consumers that compare raw text
//!        across a round trip must account for this.

use crate::core::context::ParseContext;
use crate::core::error::{Error, ErrorKind};
use crate::core::extras::{ExtraFields, Extensible};
use crate::core::leaf::Leaf;
use crate::core::record::{FieldReader, Record, json_type, write_record};
use crate::core::scalar::Scalar;
use crate::core::shape::{normalize_matrices, normalize_vectors, parse_vector};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

pub type Vector<L> = Vec<L>;
pub type Matrix<L> = Vec<Vec<L>>;

#[derive(Clone, Debug, PartialEq)]
pub struct NumericValue<L = Scalar> {
    name: Option<String>,
    units: Option<String>,
    scalars: Option<Vec<L>>,
    vectors: Option<Vec<Vector<L>>>,
    matrices: Option<Vec<Matrix<L>>>,
    extra: ExtraFields,
}

impl<L> Default for NumericValue<L> {
    fn default() -> Self {
        Self {
            name: None,
            units: None,
            scalars: None,
            vectors: None,
            matrices: None,
            extra: ExtraFields::default(),
        }
    }
}

fn element_at<'a, T>(list: &'a Option<Vec<T>>, index: usize, what: &str) -> Result<&'a T, Error> {
    list.as_ref()
        .and_then(|items| items.get(index))
        .ok_or_else(|| out_of_range(list.as_ref().map_or(0, Vec::len), index, what))
}

fn take_at<T>(list: &mut Option<Vec<T>>, index: usize, what: &str) -> Result<T, Error> {
    let count = list.as_ref().map_or(0, Vec::len);
    match list.as_mut() {
        Some(items) if index < count => Ok(items.remove(index)),
        _ => Err(out_of_range(count, index, what)),
    }
}

fn out_of_range(count: usize, index: usize, what: &str) -> Error {
    Error::new(ErrorKind::IndexOutOfRange)
        .with_message(format!("attempting to access {what} {index} of {count}"))
        .with_index(index)
        .with_count(count)
}

impl<L> NumericValue<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    pub fn set_units(&mut self, units: Option<String>) {
        self.units = units;
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    // scalars

    pub fn add_scalar(&mut self, scalar: L) -> &mut Self {
        self.scalars.get_or_insert_with(Vec::new).push(scalar);
        self
    }

    pub fn with_scalar(mut self, scalar: L) -> Self {
        self.add_scalar(scalar);
        self
    }

    pub fn scalar_count(&self) -> usize {
        self.scalars.as_ref().map_or(0, Vec::len)
    }

    pub fn scalar(&self, index: usize) -> Result<&L, Error> {
        element_at(&self.scalars, index, "scalar")
    }

    pub fn scalars(&self) -> impl Iterator<Item = &L> + '_ {
        self.scalars.iter().flatten()
    }

    pub fn scalar_list(&self) -> Option<&[L]> {
        self.scalars.as_deref()
    }

    pub fn remove_scalar(&mut self, index: usize) -> Result<L, Error> {
        take_at(&mut self.scalars, index, "scalar")
    }

    // vectors

    pub fn add_vector(&mut self, vector: Vector<L>) -> &mut Self {
        self.vectors.get_or_insert_with(Vec::new).push(vector);
        self
    }

    pub fn with_vector(mut self, vector: Vector<L>) -> Self {
        self.add_vector(vector);
        self
    }

    pub fn vector_count(&self) -> usize {
        self.vectors.as_ref().map_or(0, Vec::len)
    }

    pub fn vector(&self, index: usize) -> Result<&Vector<L>, Error> {
        element_at(&self.vectors, index, "vector")
    }

    pub fn vectors(&self) -> impl Iterator<Item = &Vector<L>> + '_ {
        self.vectors.iter().flatten()
    }

    pub fn vector_list(&self) -> Option<&[Vector<L>]> {
        self.vectors.as_deref()
    }

    pub fn remove_vector(&mut self, index: usize) -> Result<Vector<L>, Error> {
        take_at(&mut self.vectors, index, "vector")
    }

    // matrices

    pub fn add_matrix(&mut self, matrix: Matrix<L>) -> &mut Self {
        self.matrices.get_or_insert_with(Vec::new).push(matrix);
        self
    }

    pub fn with_matrix(mut self, matrix: Matrix<L>) -> Self {
        self.add_matrix(matrix);
        self
    }

    pub fn matrix_count(&self) -> usize {
        self.matrices.as_ref().map_or(0, Vec::len)
    }

    pub fn matrix(&self, index: usize) -> Result<&Matrix<L>, Error> {
        element_at(&self.matrices, index, "matrix")
    }

    pub fn matrices(&self) -> impl Iterator<Item = &Matrix<L>> + '_ {
        self.matrices.iter().flatten()
    }

    pub fn matrix_list(&self) -> Option<&[Matrix<L>]> {
        self.matrices.as_deref()
    }

    pub fn remove_matrix(&mut self, index: usize) -> Result<Matrix<L>, Error> {
        take_at(&mut self.matrices, index, "matrix")
    }
}

impl<L> Extensible for NumericValue<L> {
    fn extra_fields(&self) -> &ExtraFields {
        &self.extra
    }

    fn extra_fields_mut(&mut self) -> &mut ExtraFields {
        &mut self.extra
    }
}

fn rows_json<L: Leaf>(rows: &[Vec<L>]) -> Value {
    Value::Array(
        rows.iter()
            .map(|row| Value::Array(row.iter().map(Leaf::to_json).collect()))
            .collect(),
    )
}

impl<L: Leaf> Record for NumericValue<L> {
    const TYPE_NAME: &'static str = "NumericValue";
    const FIELDS: &'static [&'static str] = &["name", "units", "scalars", "vectors", "matrices"];

    fn from_json_at(node: &Value, ctx: &ParseContext) -> Result<Self, Error> {
        let reader = FieldReader::open(node, ctx, Self::TYPE_NAME, Self::FIELDS)?;
        let mut leaf = L::parse_leaf;

        let scalars = match reader.field("scalars") {
            None => None,
            Some((node, ctx)) if node.is_array() => Some(parse_vector(node, &ctx, &mut leaf)?),
            Some((other, ctx)) => {
                return Err(ctx.error(
                    ErrorKind::Shape,
                    format!("expected array for scalars, found {}", json_type(other)),
                ));
            }
        };
        let vectors = reader
            .field("vectors")
            .map(|(node, ctx)| normalize_vectors(node, &ctx, &mut leaf))
            .transpose()?;
        let matrices = reader
            .field("matrices")
            .map(|(node, ctx)| normalize_matrices(node, &ctx, &mut leaf))
            .transpose()?;

        Ok(Self {
            name: reader.string("name")?,
            units: reader.string("units")?,
            scalars,
            vectors,
            matrices,
            extra: reader.extras(),
        })
    }

    fn to_json(&self) -> Value {
        let mut declared = Map::new();
        if let Some(name) = &self.name {
            declared.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(units) = &self.units {
            declared.insert("units".to_string(), Value::String(units.clone()));
        }
        if let Some(scalars) = &self.scalars {
            let items = scalars.iter().map(Leaf::to_json).collect();
            declared.insert("scalars".to_string(), Value::Array(items));
        }
        if let Some(vectors) = &self.vectors {
            declared.insert("vectors".to_string(), rows_json(vectors));
        }
        if let Some(matrices) = &self.matrices {
            let items = matrices.iter().map(|matrix| rows_json(matrix)).collect();
            declared.insert("matrices".to_string(), Value::Array(items));
        }
        write_record(declared, &self.extra)
    }
}

impl<L: Leaf> Serialize for NumericValue<L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de, L: Leaf> Deserialize<'de> for NumericValue<L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let node = Value::deserialize(deserializer)?;
        Self::from_json(&node).map_err(de::Error::custom)
    }
}
