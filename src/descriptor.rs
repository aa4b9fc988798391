// Inferred shapes. No runtime values in here, only their descriptions.

use std::fmt;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Undefined,
    Null,
    Unknown,
    /// Array elements that did not agree on a single shape.
    Mixed,
    Promise,
    Date,
}

impl Primitive {
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Undefined => "undefined",
            Primitive::Null => "null",
            Primitive::Unknown => "unknown",
            Primitive::Mixed => "mixed",
            Primitive::Promise => "Promise",
            Primitive::Date => "Date",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural description of a sample value.
///
/// Equality is deep and ignores object key order (`IndexMap` compares as a
/// map), which makes it exactly the "same element type" relation used when
/// unifying array elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    /// Always exactly one element type; heterogeneity is `Primitive::Mixed`.
    Array(Box<TypeDescriptor>),
    Object(IndexMap<String, TypeDescriptor>),
}

impl TypeDescriptor {
    pub fn array_of(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(inner))
    }

    pub fn empty_object() -> Self {
        TypeDescriptor::Object(IndexMap::new())
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, TypeDescriptor>> {
        match self {
            TypeDescriptor::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn is_empty_object(&self) -> bool {
        self.as_object().is_some_and(IndexMap::is_empty)
    }

    /// Compact JSON with object keys sorted. Two descriptors are equal iff
    /// their canonical forms are equal.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out);
        out
    }

    fn write_canonical(&self, out: &mut String) {
        match self {
            TypeDescriptor::Primitive(p) => {
                out.push('"');
                out.push_str(p.as_str());
                out.push('"');
            }
            TypeDescriptor::Array(inner) => {
                out.push('[');
                inner.write_canonical(out);
                out.push(']');
            }
            TypeDescriptor::Object(fields) => {
                let mut keys: Vec<&String> = fields.keys().collect();
                keys.sort();
                out.push('{');
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 { out.push(','); }
                    // serde_json handles escaping of odd property names
                    out.push_str(&serde_json::Value::from(key.as_str()).to_string());
                    out.push(':');
                    fields[key].write_canonical(out);
                }
                out.push('}');
            }
        }
    }
}

impl From<Primitive> for TypeDescriptor {
    fn from(p: Primitive) -> Self {
        TypeDescriptor::Primitive(p)
    }
}

// Wire shape: "number" | ["number"] | { "key": ... } in descriptor key order.
impl Serialize for TypeDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TypeDescriptor::Primitive(p) => serializer.serialize_str(p.as_str()),
            TypeDescriptor::Array(inner) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(inner.as_ref())?;
                seq.end()
            }
            TypeDescriptor::Object(fields) => fields.serialize(serializer),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
