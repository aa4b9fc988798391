//! Structural type scaffolding from sample values.
//!
//! [`infer`] describes the shape of a [`Value`]; [`render`] turns that shape
//! into a `type Name = { ... };` declaration.
pub mod descriptor;
pub mod error;
pub mod inference;
pub mod render;
pub mod value;

pub use descriptor::{Primitive, TypeDescriptor};
pub use error::{PathSegment, UnsupportedTypeError};
pub use inference::infer;
pub use render::{render, render_default, render_descriptor, DEFAULT_TYPE_NAME};
pub use value::Value;
