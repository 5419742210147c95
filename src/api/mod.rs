//! Purpose: Define the public Rust API boundary for the physical-information model.
//! Exports: Record types, the extensible-field base, shape normalizers, and errors.
//! Role: Public, additive-only surface used by the CLI and library consumers.
//! Invariants: Callers reach the model through this module, not `core` paths.

pub mod document;

pub use crate::core::context::ParseContext;
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::extras::{Extensible, ExtraFields};
pub use crate::core::leaf::Leaf;
pub use crate::core::record::{FieldReader, Record, write_record};
pub use crate::core::scalar::{Scalar, ScalarValue};
pub use crate::core::shape::{
    MatrixShape, VectorShape, matrix_shape, normalize_matrices, normalize_vectors, parse_vector,
    vector_shape,
};
pub use crate::core::value::{Matrix, NumericValue, Vector};
