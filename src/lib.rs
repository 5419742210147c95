//! Purpose: Object model for physical-information JSON records.
//! Exports: `api` (records, extensible fields, shape normalization, documents, errors).
//! Role: Library backing the `pif` CLI; records keep unknown fields across round trips.
//! Invariants: Every record parses from a fully materialized `serde_json::Value` tree.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
mod json;
