// Core object model: extensible records, shape normalization, and error modeling.
pub mod context;
pub mod error;
pub mod extras;
pub mod leaf;
pub mod record;
pub mod scalar;
pub mod shape;
pub mod value;
