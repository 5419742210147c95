//! Purpose: Track where in the source JSON tree a parser currently is.
//! Exports: `ParseContext`.
//! Role: The only capability leaf parsers and shape normalizers get from the caller.
//! Invariants: `pointer()` renders RFC 6901 JSON Pointers; the root is the empty string.
//! Invariants: Contexts are immutable; descending returns a new context.

use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    Field(String),
    Index(usize),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParseContext {
    segments: Vec<Segment>,
}

impl ParseContext {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn field(&self, key: &str) -> Self {
        self.descend(Segment::Field(key.to_string()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.descend(Segment::Index(index))
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Field(key) => {
                    for ch in key.chars() {
                        match ch {
                            '~' => out.push_str("~0"),
                            '/' => out.push_str("~1"),
                            _ => out.push(ch),
                        }
                    }
                }
                Segment::Index(index) => out.push_str(&index.to_string()),
            }
        }
        out
    }

    /// Builds an error positioned at this node.
    pub fn error(&self, kind: ErrorKind, message: impl Into<String>) -> Error {
        Error::new(kind)
            .with_message(message)
            .with_pointer(self.pointer())
    }

    fn descend(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}
