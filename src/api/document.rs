//! Purpose: Read and write whole documents of records.
//! Exports: `value_from_str`, `value_from_slice`, `value_from_reader`, `from_str`, `from_reader`, `from_value`,
//!          `many_from_str`, `many_from_reader`, `many_from_value`, `to_value`, `to_string`, `to_string_pretty`.
//! Role: Text boundary around `Record`; decodes once, then parses from the tree.
//! Invariants: A document either parses completely or fails; no partial records.
//! Invariants: `many_*` accepts a single record object or an array of them.

use crate::core::context::ParseContext;
use crate::core::error::{Error, ErrorKind};
use crate::core::record::{Record, json_type};
use crate::json::parse::{self, ParseFailureCategory};
use serde_json::Value;
use std::io::Read;

fn decode_error(err: serde_json::Error, context: &str) -> Error {
    let kind = match parse::categorize_error(&err) {
        ParseFailureCategory::Io => ErrorKind::Io,
        _ => ErrorKind::Syntax,
    };
    let hint = parse::hint_for_error(&err, context);
    Error::new(kind)
        .with_message(format!("failed to decode JSON: {err}"))
        .with_hint(hint)
        .with_source(err)
}

pub fn value_from_str(input: &str) -> Result<Value, Error> {
    parse::from_str(input).map_err(|err| decode_error(err, "document text"))
}

/// Raw bytes; invalid UTF-8 is reported as `ErrorKind::Syntax`.
pub fn value_from_slice(input: &[u8]) -> Result<Value, Error> {
    parse::from_slice(input).map_err(|err| decode_error(err, "document bytes"))
}

pub fn value_from_reader<R: Read>(reader: R) -> Result<Value, Error> {
    parse::from_reader(reader).map_err(|err| decode_error(err, "document stream"))
}

pub fn from_value<T: Record>(node: &Value) -> Result<T, Error> {
    T::from_json(node)
}

pub fn from_str<T: Record>(input: &str) -> Result<T, Error> {
    from_value(&value_from_str(input)?)
}

pub fn from_reader<T: Record, R: Read>(reader: R) -> Result<T, Error> {
    from_value(&value_from_reader(reader)?)
}

pub fn many_from_value<T: Record>(node: &Value) -> Result<Vec<T>, Error> {
    let root = ParseContext::root();
    match node {
        Value::Object(_) => Ok(vec![T::from_json_at(node, &root)?]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| T::from_json_at(item, &root.index(idx)))
            .collect(),
        other => Err(root.error(
            ErrorKind::Type,
            format!(
                "expected {} object or array of them, found {}",
                T::TYPE_NAME,
                json_type(other)
            ),
        )),
    }
}

pub fn many_from_str<T: Record>(input: &str) -> Result<Vec<T>, Error> {
    many_from_value(&value_from_str(input)?)
}

pub fn many_from_reader<T: Record, R: Read>(reader: R) -> Result<Vec<T>, Error> {
    many_from_value(&value_from_reader(reader)?)
}

pub fn to_value<T: Record>(record: &T) -> Value {
    record.to_json()
}

pub fn to_string<T: Record>(record: &T) -> Result<String, Error> {
    serde_json::to_string(&record.to_json()).map_err(encode_error)
}

pub fn to_string_pretty<T: Record>(record: &T) -> Result<String, Error> {
    serde_json::to_string_pretty(&record.to_json()).map_err(encode_error)
}

fn encode_error(err: serde_json::Error) -> Error {
    Error::new(ErrorKind::Internal)
        .with_message("failed to encode JSON")
        .with_source(err)
}
