//! Purpose: Internal JSON text decoding boundary shared by the document API and CLI.
//! Exports: `parse` module with decode and diagnostics helpers.
//! Role: Single seam between raw text and `serde_json::Value` trees.
//! Invariants: Record parsing never sees text, only fully materialized trees.

pub(crate) mod parse;
