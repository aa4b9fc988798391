//! Structural inference over sample values.
//!
//! Walk a `Value` once, top-down, and describe its shape as a
//! `TypeDescriptor`. Dispatch order matters and follows how a host runtime
//! would classify the value: absent/null first, then scalars, dates,
//! callables, sequences and finally keyed objects.
//!
//! Inputs must be finite and acyclic. Recursion depth is the nesting depth of
//! the sample; nothing here guards the stack.
pub mod arr;
pub mod obj;

use crate::descriptor::{Primitive, TypeDescriptor};
use crate::error::{InferResult, UnsupportedTypeError};
use crate::value::Value;

pub use arr::unify;

/// Infer the structural type of `value`.
///
/// Fails only when a callable is reachable from `value`; the first one found
/// aborts the whole walk.
pub fn infer(value: &Value) -> InferResult<TypeDescriptor> {
    let out = infer_value(value);
    if let Err(error) = &out {
        tracing::trace!(path = %error.path_string(), "inference rejected sample");
    }
    out
}

pub(crate) fn infer_value(value: &Value) -> InferResult<TypeDescriptor> {
    let ty: TypeDescriptor = match value {
        Value::Undefined => Primitive::Undefined.into(),
        Value::Null => Primitive::Null.into(),
        Value::String(_) => Primitive::String.into(),
        Value::Number(_) => Primitive::Number.into(),
        Value::Bool(_) => Primitive::Boolean.into(),
        Value::Date(_) => Primitive::Date.into(),
        Value::Function => return Err(UnsupportedTypeError::function()),
        Value::Array(xs) => arr::infer_array(xs)?,
        Value::Promise => Primitive::Promise.into(),
        Value::Object(map) => obj::infer_object(map)?,
        Value::BigInt(_) | Value::Symbol(_) => Primitive::Unknown.into(),
    };
    Ok(ty)
}

/// Infer one descriptor per sample.
pub fn infer_each<'a, I>(values: I) -> InferResult<Vec<TypeDescriptor>>
where
    I: IntoIterator<Item = &'a Value>,
{
    values.into_iter().map(infer).collect()
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn infer_json(v: serde_json::Value) -> InferResult<TypeDescriptor> {
        infer(&Value::from(v))
    }

    fn wire(d: &TypeDescriptor) -> serde_json::Value {
        serde_json::to_value(d).unwrap()
    }

    #[test]
    fn primitives() {
        assert_eq!(infer_json(json!(123)).unwrap(), TypeDescriptor::from(Primitive::Number));
        assert_eq!(infer_json(json!(1.5)).unwrap(), TypeDescriptor::from(Primitive::Number));
        assert_eq!(infer_json(json!("Hello")).unwrap(), TypeDescriptor::from(Primitive::String));
        assert_eq!(infer_json(json!(true)).unwrap(), TypeDescriptor::from(Primitive::Boolean));
        assert_eq!(infer(&Value::Undefined).unwrap(), TypeDescriptor::from(Primitive::Undefined));
        assert_eq!(infer_json(json!(null)).unwrap(), TypeDescriptor::from(Primitive::Null));
    }

    #[test]
    fn special_kinds() {
        assert_eq!(infer(&Value::Promise).unwrap(), TypeDescriptor::from(Primitive::Promise));
        assert_eq!(infer(&Value::Date(chrono::Utc::now())).unwrap(), TypeDescriptor::from(Primitive::Date));
        assert_eq!(infer(&Value::BigInt(9)).unwrap(), TypeDescriptor::from(Primitive::Unknown));
        assert_eq!(infer(&Value::Symbol(Some("tag".into()))).unwrap(), TypeDescriptor::from(Primitive::Unknown));
    }

    #[test]
    fn arrays() {
        assert_eq!(wire(&infer_json(json!([1, 2, 3])).unwrap()), json!(["number"]));
        assert_eq!(wire(&infer_json(json!(["a", "b", "c"])).unwrap()), json!(["string"]));
        assert_eq!(wire(&infer_json(json!([1, "a", true])).unwrap()), json!(["mixed"]));
        assert_eq!(wire(&infer_json(json!([])).unwrap()), json!(["unknown"]));
        assert_eq!(wire(&infer_json(json!([[[]]])).unwrap()), json!([[["unknown"]]]));
    }

    #[test]
    fn objects_keep_enumeration_order() {
        let d = infer_json(json!({"id": 1, "name": "Anthony"})).unwrap();
        let keys: Vec<&str> = d.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "name"]);
        assert_eq!(wire(&d), json!({"id": "number", "name": "string"}));
    }

    #[test]
    fn empty_object() {
        assert!(infer_json(json!({})).unwrap().is_empty_object());
    }

    #[test]
    fn nested_and_nullish_properties() {
        let d = infer_json(json!({
            "id": 1,
            "profile": {"name": "Anthony", "age": 30},
            "avatar": null,
        }))
        .unwrap();
        assert_eq!(
            wire(&d),
            json!({"id": "number", "profile": {"name": "string", "age": "number"}, "avatar": "null"})
        );

        let with_undefined: Value = [("id", Value::from(1_i64)), ("profile", Value::Undefined)]
            .into_iter()
            .collect();
        assert_eq!(wire(&infer(&with_undefined).unwrap()), json!({"id": "number", "profile": "undefined"}));
    }

    #[test]
    fn deeply_nested_objects() {
        let d = infer_json(json!({"user": {"profile": {"details": {"age": 30, "name": "John"}}}})).unwrap();
        assert_eq!(
            wire(&d),
            json!({"user": {"profile": {"details": {"age": "number", "name": "string"}}}})
        );
    }

    #[test]
    fn mixed_array_inside_object() {
        let d = infer_json(json!({"data": [1, {"name": "John"}, true]})).unwrap();
        assert_eq!(wire(&d), json!({"data": ["mixed"]}));
    }

    #[test]
    fn promise_property() {
        let v: Value = [("pending", Value::Promise)].into_iter().collect();
        assert_eq!(wire(&infer(&v).unwrap()), json!({"pending": "Promise"}));
    }

    #[test]
    fn callable_property_names_its_key() {
        let v: Value = [("id", Value::from(1_i64)), ("getName", Value::Function)].into_iter().collect();
        let err = infer(&v).unwrap_err();
        assert_eq!(err.key(), Some("getName"));
        assert!(err.to_string().contains("Functions are not supported for type inference"));
        assert!(err.to_string().contains("getName"));
    }

    #[test]
    fn bare_callable_has_no_key() {
        let err = infer(&Value::Function).unwrap_err();
        assert_eq!(err, UnsupportedTypeError::function());
        assert_eq!(err.key(), None);
    }

    #[test]
    fn callable_deep_inside_arrays_reports_full_path() {
        let inner: Value = [("run", Value::Function)].into_iter().collect();
        let v: Value = [("jobs", Value::Array(vec![Value::object(), inner]))].into_iter().collect();
        let err = infer(&v).unwrap_err();
        assert_eq!(err.key(), Some("run"));
        assert_eq!(err.path_string(), "$.jobs[1].run");
    }

    #[test]
    fn infer_each_stops_at_first_failure() {
        let samples = [Value::from(1_i64), Value::Function, Value::from("x")];
        assert!(infer_each(&samples).is_err());
        let samples = [Value::from(1_i64), Value::from("x")];
        assert_eq!(
            infer_each(&samples).unwrap(),
            vec![TypeDescriptor::from(Primitive::Number), TypeDescriptor::from(Primitive::String)]
        );
    }
}
