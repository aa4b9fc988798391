use indexmap::IndexMap;

use crate::descriptor::TypeDescriptor;
use crate::error::InferResult;
use crate::value::Value;

/// Describe every own key of `map`, in enumeration order.
///
/// The first callable property aborts the walk; nothing partial escapes.
pub(super) fn infer_object(map: &IndexMap<String, Value>) -> InferResult<TypeDescriptor> {
    let mut fields = IndexMap::with_capacity(map.len());
    for (key, value) in map {
        let ty = super::infer_value(value).map_err(|e| e.within_key(key))?;
        fields.insert(key.clone(), ty);
    }
    Ok(TypeDescriptor::Object(fields))
}
