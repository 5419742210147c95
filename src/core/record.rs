//! Purpose: Shared plumbing for records that map JSON objects onto typed fields.
//! Exports: `Record`, `FieldReader`, `write_record`.
//! Role: Two-pass parse (claim declared keys, capture the rest) and merge-on-write.
//! Invariants: Declared keys never reach `ExtraFields` during parsing.
//! Invariants: A JSON `null` on a declared key reads as absent.
//! Invariants: On output, declared fields win over extra fields with the same name.

use crate::core::context::ParseContext;
use crate::core::error::{Error, ErrorKind};
use crate::core::extras::{ExtraFields, Extensible};
use serde_json::{Map, Value};

pub trait Record: Extensible + Sized {
    const TYPE_NAME: &'static str;
    /// Property names this record claims; everything else is an extra field.
    const FIELDS: &'static [&'static str];

    fn from_json_at(node: &Value, ctx: &ParseContext) -> Result<Self, Error>;

    fn to_json(&self) -> Value;

    fn from_json(node: &Value) -> Result<Self, Error> {
        Self::from_json_at(node, &ParseContext::root())
    }
}

pub struct FieldReader<'a> {
    map: &'a Map<String, Value>,
    ctx: &'a ParseContext,
    fields: &'static [&'static str],
}

impl<'a> FieldReader<'a> {
    pub fn open(
        node: &'a Value,
        ctx: &'a ParseContext,
        type_name: &str,
        fields: &'static [&'static str],
    ) -> Result<Self, Error> {
        match node {
            Value::Object(map) => Ok(Self { map, ctx, fields }),
            other => Err(ctx.error(
                ErrorKind::Type,
                format!("expected object for {type_name}, found {}", json_type(other)),
            )),
        }
    }

    pub fn context(&self) -> &ParseContext {
        self.ctx
    }

    /// Looks up a declared field. Keys outside the record's `FIELDS` always
    /// read as absent; those values are only reachable through `extras()`.
    pub fn field(&self, key: &str) -> Option<(&'a Value, ParseContext)> {
        if !self.fields.contains(&key) {
            return None;
        }
        match self.map.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some((value, self.ctx.field(key))),
        }
    }

    pub fn string(&self, key: &str) -> Result<Option<String>, Error> {
        match self.field(key) {
            None => Ok(None),
            Some((Value::String(text), _)) => Ok(Some(text.clone())),
            Some((other, ctx)) => Err(ctx.error(
                ErrorKind::Type,
                format!("expected string for {key}, found {}", json_type(other)),
            )),
        }
    }

    pub fn bool(&self, key: &str) -> Result<Option<bool>, Error> {
        match self.field(key) {
            None => Ok(None),
            Some((Value::Bool(flag), _)) => Ok(Some(*flag)),
            Some((other, ctx)) => Err(ctx.error(
                ErrorKind::Type,
                format!("expected boolean for {key}, found {}", json_type(other)),
            )),
        }
    }

    /// Every key the record did not declare, verbatim.
    pub fn extras(&self) -> ExtraFields {
        let mut extras = ExtraFields::new();
        for (key, value) in self.map {
            if self.fields.contains(&key.as_str()) {
                continue;
            }
            tracing::trace!(
                pointer = %self.ctx.pointer(),
                field = %key,
                "captured unsupported field"
            );
            extras.put(key.clone(), value.clone());
        }
        extras
    }
}

pub fn write_record(mut declared: Map<String, Value>, extras: &ExtraFields) -> Value {
    extras.write_into(&mut declared);
    Value::Object(declared)
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
