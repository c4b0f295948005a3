//! The structural decode walk.
//!
//! This module partitions a JSON object's members between declared fields,
//! recursively-processed nested records, and the residual catch-all bucket.
//! Field-level conversion is delegated to serde_json; the walk itself only
//! decides which member goes where.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::record::{FieldTag, Record};

/// A target shape the top-level decoder knows how to populate: a record,
/// or a sequence of records.
pub trait Decode {
    /// Populate `self` from a parsed dynamic value.
    fn decode_value(&mut self, value: Value) -> Result<(), DecodeError>;
}

/// Sequence targets decode a JSON array of objects, one fresh record per
/// element, in array order. Elements are appended to the existing vec.
impl<T: Record> Decode for Vec<T> {
    fn decode_value(&mut self, value: Value) -> Result<(), DecodeError> {
        let elements = match value {
            Value::Null => return Ok(()),
            Value::Array(elements) => elements,
            other => {
                return Err(DecodeError::UnexpectedShape {
                    expected: "an array of objects",
                    found: value_kind(&other),
                });
            }
        };

        for (index, element) in elements.into_iter().enumerate() {
            let mut object = match element {
                Value::Object(object) => object,
                other => {
                    return Err(DecodeError::ElementShape {
                        index,
                        found: value_kind(&other),
                    });
                }
            };

            let mut record = T::default();
            descend_record(&mut record, &mut object)?;
            self.push(record);
        }

        Ok(())
    }
}

/// Top-level dispatch for a single record target.
///
/// A `null` input leaves the target untouched, distinguishing "document was
/// omitted" from "document was an empty object".
pub fn decode_record_value<T: Record>(target: &mut T, value: Value) -> Result<(), DecodeError> {
    match value {
        Value::Null => Ok(()),
        Value::Object(mut object) => descend_record(target, &mut object),
        other => Err(DecodeError::UnexpectedShape {
            expected: "an object",
            found: value_kind(&other),
        }),
    }
}

/// Walk the descriptor table of `T` against `object`, consuming members as
/// they are claimed.
///
/// Members are removed from `object` in place; whatever remains after the
/// walk is the catch-all residue for this record level. Each descend
/// recursion owns its disjoint sub-object, so sibling and parent levels
/// never observe each other's members.
pub fn descend_record<T: Record>(
    target: &mut T,
    object: &mut Map<String, Value>,
) -> Result<(), DecodeError> {
    let mut catch_all: Option<&'static str> = None;

    for descriptor in T::FIELDS {
        match descriptor.tag {
            FieldTag::Descend => {
                // Tag validity does not depend on the input: a descend
                // descriptor on a non-record field fails before any member
                // lookup.
                if !target.can_descend(descriptor.name) {
                    return Err(DecodeError::NotARecord {
                        field: descriptor.name,
                    });
                }
                if descriptor.name.is_empty() {
                    continue;
                }
                // An absent or null member leaves the nested record at its
                // default value; a null member is not consumed and flows to
                // the catch-all bucket.
                let claimed = match object.get(descriptor.name) {
                    None | Some(Value::Null) => false,
                    Some(Value::Object(_)) => true,
                    Some(other) => {
                        return Err(DecodeError::MemberShape {
                            name: descriptor.name,
                            found: value_kind(other),
                        });
                    }
                };
                if !claimed {
                    continue;
                }
                if let Some(Value::Object(mut sub)) = object.remove(descriptor.name) {
                    target.descend(descriptor.name, &mut sub)?;
                }
            }
            FieldTag::CatchAll => {
                if let Some(first) = catch_all {
                    return Err(DecodeError::DuplicateCatchAll {
                        first,
                        second: descriptor.name,
                    });
                }
                catch_all = Some(descriptor.name);
            }
            FieldTag::Plain => match object.remove(descriptor.name) {
                // An explicit null is consumed but converts to nothing,
                // leaving the field at its default value.
                None | Some(Value::Null) => {}
                Some(value) => target.assign(descriptor.name, value)?,
            },
        }
    }

    // Only unclaimed members remain; they become the catch-all value, or
    // are dropped when no field wants them.
    if let Some(field) = catch_all {
        target.set_catch_all(field, std::mem::take(object))?;
    }

    Ok(())
}

/// Convert one dynamic value into a concretely-typed field value using
/// standard JSON conversion rules.
///
/// Failures are wrapped with the external member name and the declared
/// Rust type for diagnosability.
pub fn convert<T: DeserializeOwned>(field: &'static str, value: Value) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|source| DecodeError::Conversion {
        name: field,
        ty: std::any::type_name::<T>(),
        source,
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
