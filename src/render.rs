//! Descriptor → declaration text.
//!
//! ```text
//! type Name = {
//!   key: string;
//!   nested: {
//!     inner: number;
//!   }[];
//! };
//! ```
//!
//! Two spaces per level. Arrays never add a level of their own, they only
//! suffix `[]` to whatever their element renders as.
use crate::descriptor::{Primitive, TypeDescriptor};
use crate::error::InferResult;
use crate::inference::infer;
use crate::value::Value;

pub const DEFAULT_TYPE_NAME: &str = "GeneratedType";

const INDENT: &str = "  ";

/// Infer `value` and render it as `type <name> = ...;`.
pub fn render(value: &Value, name: &str) -> InferResult<String> {
    let ty = infer(value)?;
    Ok(render_descriptor(&ty, name))
}

pub fn render_default(value: &Value) -> InferResult<String> {
    render(value, DEFAULT_TYPE_NAME)
}

/// Render an already inferred descriptor. Never fails.
pub fn render_descriptor(ty: &TypeDescriptor, name: &str) -> String {
    let mut decl = Declarations::new();
    decl.emit(ty, name);
    decl.into_string()
}

/// Accumulates one or more declarations, separated by a blank line.
#[derive(Debug, Default)]
pub struct Declarations {
    out: String,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, ty: &TypeDescriptor, name: &str) {
        tracing::debug!(name, "rendering declaration");
        if !self.out.is_empty() {
            self.out.push_str("\n\n");
        }
        self.out.push_str("type ");
        self.out.push_str(name);
        self.out.push_str(" = ");
        if ty.is_empty_object() {
            self.out.push_str("{}");
        } else {
            self.out.push_str(&format_type(ty, 1));
        }
        self.out.push(';');
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

/// `level` is the indentation of the properties of an object rendered here;
/// its closing brace sits one level shallower.
fn format_type(ty: &TypeDescriptor, level: usize) -> String {
    match ty {
        TypeDescriptor::Primitive(p) => primitive_name(*p).to_string(),
        TypeDescriptor::Array(inner) => format!("{}[]", format_type(inner, level)),
        TypeDescriptor::Object(fields) if fields.is_empty() => "{}".to_string(),
        TypeDescriptor::Object(fields) => {
            let indent = INDENT.repeat(level);
            let mut out = String::from("{\n");
            for (key, field_ty) in fields {
                out.push_str(&indent);
                out.push_str(key);
                out.push_str(": ");
                out.push_str(&format_type(field_ty, level + 1));
                out.push_str(";\n");
            }
            out.push_str(&INDENT.repeat(level - 1));
            out.push('}');
            out
        }
    }
}

// declarations have no null literal; widen it
fn primitive_name(p: Primitive) -> &'static str {
    match p {
        Primitive::Null => "unknown",
        other => other.as_str(),
    }
}
