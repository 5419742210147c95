//! Purpose: Decode JSON text and describe decode failures.
//! Exports: `from_str`, `from_slice`, `from_reader`, `ParseFailureCategory`, `categorize_error`,
//!          `hint_for_error`.
//! Role: Parser boundary that keeps serde_json error classification in one place.
//! Invariants: Categories are stable labels; hints never echo document content.
//! Notes: Callers wrap failures into `ErrorKind::Syntax` or `ErrorKind::Io`.

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use std::io::Read;

pub(crate) fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

pub(crate) fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(input)
}

pub(crate) fn from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<T, serde_json::Error> {
    serde_json::from_reader(reader)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Truncated,
    Data,
    Io,
}

impl ParseFailureCategory {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Truncated => "truncated",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Truncated,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub(crate) fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    let category = categorize_error(err);
    let mut hint = format!("parse category: {}; context: {context}", category.label());
    if err.line() > 0 {
        hint.push_str(&format!("; line {} column {}", err.line(), err.column()));
    }
    hint
}
