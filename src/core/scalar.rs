//! Purpose: Reference leaf datum for physical-information values.
//! Exports: `Scalar`, `ScalarValue`.
//! Role: Default `Leaf` for `NumericValue`; also an extensible record in its own right.
//! Invariants: Numbers keep their `serde_json::Number` form so they round-trip exactly.
//! Invariants: A scalar holding only `value` renders as a bare number or string.

use crate::core::context::ParseContext;
use crate::core::error::{Error, ErrorKind};
use crate::core::extras::{ExtraFields, Extensible};
use crate::core::leaf::Leaf;
use crate::core::record::{FieldReader, Record, json_type, write_record};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    Number(Number),
    Text(String),
}

impl ScalarValue {
    fn parse(node: &Value, ctx: &ParseContext) -> Result<Self, Error> {
        match node {
            Value::Number(number) => Ok(ScalarValue::Number(number.clone())),
            Value::String(text) => Ok(ScalarValue::Text(text.clone())),
            other => Err(ctx.error(
                ErrorKind::Leaf,
                format!("expected number or string, found {}", json_type(other)),
            )),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            ScalarValue::Number(number) => Value::Number(number.clone()),
            ScalarValue::Text(text) => Value::String(text.clone()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Number(number) => number.as_f64(),
            ScalarValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Number(number) => write!(f, "{number}"),
            ScalarValue::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Number(Number::from(value))
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Text(value)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scalar {
    value: Option<ScalarValue>,
    minimum: Option<ScalarValue>,
    maximum: Option<ScalarValue>,
    uncertainty: Option<ScalarValue>,
    approximate: Option<bool>,
    extra: ExtraFields,
}

impl Scalar {
    pub fn new(value: impl Into<ScalarValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Non-finite floats have no JSON form and are rejected.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(|number| Self::new(ScalarValue::Number(number)))
    }

    pub fn value(&self) -> Option<&ScalarValue> {
        self.value.as_ref()
    }

    pub fn minimum(&self) -> Option<&ScalarValue> {
        self.minimum.as_ref()
    }

    pub fn maximum(&self) -> Option<&ScalarValue> {
        self.maximum.as_ref()
    }

    pub fn uncertainty(&self) -> Option<&ScalarValue> {
        self.uncertainty.as_ref()
    }

    pub fn approximate(&self) -> Option<bool> {
        self.approximate
    }

    pub fn with_minimum(mut self, minimum: impl Into<ScalarValue>) -> Self {
        self.minimum = Some(minimum.into());
        self
    }

    pub fn with_maximum(mut self, maximum: impl Into<ScalarValue>) -> Self {
        self.maximum = Some(maximum.into());
        self
    }

    pub fn with_uncertainty(mut self, uncertainty: impl Into<ScalarValue>) -> Self {
        self.uncertainty = Some(uncertainty.into());
        self
    }

    pub fn with_approximate(mut self, approximate: bool) -> Self {
        self.approximate = Some(approximate);
        self
    }

    fn is_bare(&self) -> bool {
        self.minimum.is_none()
            && self.maximum.is_none()
            && self.uncertainty.is_none()
            && self.approximate.is_none()
            && self.extra.is_empty()
    }
}

impl Extensible for Scalar {
    fn extra_fields(&self) -> &ExtraFields {
        &self.extra
    }

    fn extra_fields_mut(&mut self) -> &mut ExtraFields {
        &mut self.extra
    }
}

impl Record for Scalar {
    const TYPE_NAME: &'static str = "Scalar";
    const FIELDS: &'static [&'static str] =
        &["value", "minimum", "maximum", "uncertainty", "approximate"];

    fn from_json_at(node: &Value, ctx: &ParseContext) -> Result<Self, Error> {
        match node {
            Value::Number(_) | Value::String(_) => {
                return Ok(Self {
                    value: Some(ScalarValue::parse(node, ctx)?),
                    ..Self::default()
                });
            }
            Value::Object(_) => {}
            other => {
                return Err(ctx.error(
                    ErrorKind::Leaf,
                    format!("expected number, string or object for Scalar, found {}", json_type(other)),
                ));
            }
        }

        let reader = FieldReader::open(node, ctx, Self::TYPE_NAME, Self::FIELDS)?;
        let bound = |key: &str| -> Result<Option<ScalarValue>, Error> {
            reader
                .field(key)
                .map(|(value, ctx)| ScalarValue::parse(value, &ctx))
                .transpose()
        };
        Ok(Self {
            value: bound("value")?,
            minimum: bound("minimum")?,
            maximum: bound("maximum")?,
            uncertainty: bound("uncertainty")?,
            approximate: reader.bool("approximate")?,
            extra: reader.extras(),
        })
    }

    fn to_json(&self) -> Value {
        if let (Some(value), true) = (&self.value, self.is_bare()) {
            return value.to_json();
        }
        let mut declared = Map::new();
        let slots = [
            ("value", &self.value),
            ("minimum", &self.minimum),
            ("maximum", &self.maximum),
            ("uncertainty", &self.uncertainty),
        ];
        for (key, slot) in slots {
            if let Some(value) = slot {
                declared.insert(key.to_string(), value.to_json());
            }
        }
        if let Some(approximate) = self.approximate {
            declared.insert("approximate".to_string(), Value::Bool(approximate));
        }
        write_record(declared, &self.extra)
    }
}

impl Leaf for Scalar {
    fn parse_leaf(node: &Value, ctx: &ParseContext) -> Result<Self, Error> {
        Self::from_json_at(node, ctx)
    }

    fn to_json(&self) -> Value {
        Record::to_json(self)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Record::to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let node = Value::deserialize(deserializer)?;
        Self::from_json(&node).map_err(de::Error::custom)
    }
}
