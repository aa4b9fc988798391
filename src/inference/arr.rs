use crate::descriptor::{Primitive, TypeDescriptor};
use crate::error::InferResult;
use crate::value::Value;

pub(super) fn infer_array(xs: &[Value]) -> InferResult<TypeDescriptor> {
    if xs.is_empty() {
        return Ok(TypeDescriptor::array_of(Primitive::Unknown.into()));
    }
    let mut elems = Vec::with_capacity(xs.len());
    for (i, el) in xs.iter().enumerate() {
        elems.push(super::infer_value(el).map_err(|e| e.within_index(i))?);
    }
    Ok(TypeDescriptor::array_of(unify(elems)))
}

/// Collapse element descriptors into the single element type of an array.
///
/// Duplicates are removed by deep structural equality; one survivor is the
/// element type, several are `mixed`. An empty input is `unknown`.
pub fn unify<I>(elems: I) -> TypeDescriptor
where
    I: IntoIterator<Item = TypeDescriptor>,
{
    let mut distinct: Vec<TypeDescriptor> = Vec::new();
    for ty in elems {
        if !distinct.contains(&ty) {
            distinct.push(ty);
        }
        if distinct.len() > 1 {
            return Primitive::Mixed.into();
        }
    }
    distinct.pop().unwrap_or(Primitive::Unknown.into())
}
