use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Container type for the field marked `catch_all`.
///
/// Every JSON object member not claimed by a declared field of the record
/// ends up here, keyed by its external name.
pub type CatchAll = Map<String, Value>;

/// Decode behavior of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTag {
    /// Standard JSON conversion into the declared type.
    Plain,
    /// Recurse into a nested record with the same decoding rules.
    Descend,
    /// Collect every member not claimed by another field.
    CatchAll,
}

/// Metadata for one declared field of a record, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// External member name to look up in the JSON object. Normally the
    /// field's own name unless renamed.
    pub name: &'static str,
    /// Decode behavior.
    pub tag: FieldTag,
}

/// A composite target type with a fixed set of named, typed fields.
///
/// Implemented via `#[derive(Record)]`, which builds the descriptor table
/// and the per-field dispatch from `#[dross(...)]` attributes. The decoder
/// walks [`Record::FIELDS`] and routes each claimed member through one of
/// the three methods below.
///
/// `Default` supplies the value of every field whose member is absent from
/// the input.
///
/// Hand-written implementations are possible; the method defaults reject
/// descriptor tags the implementation does not actually support, so a
/// table that claims `Descend` or `CatchAll` for an unsupported field
/// surfaces a tag-usage error at decode time instead of decoding wrongly.
pub trait Record: Default {
    /// Field descriptors in declaration order.
    const FIELDS: &'static [FieldDescriptor];

    /// Convert `value` into the plain field named `field` using standard
    /// JSON conversion rules.
    fn assign(&mut self, field: &'static str, value: Value) -> Result<(), DecodeError>;

    /// Report whether the walk may recurse into the field named `field`.
    ///
    /// Consulted for every descend-tagged descriptor before any member
    /// lookup, so a descriptor on a non-record field fails even when the
    /// member is absent from the input.
    fn can_descend(&self, field: &'static str) -> bool {
        let _ = field;
        false
    }

    /// Recurse into the nested record field named `field` with the members
    /// of `object`.
    fn descend(
        &mut self,
        field: &'static str,
        object: &mut Map<String, Value>,
    ) -> Result<(), DecodeError> {
        let _ = object;
        Err(DecodeError::NotARecord { field })
    }

    /// Replace the catch-all container of the field named `field` with
    /// `rest`.
    fn set_catch_all(&mut self, field: &'static str, rest: CatchAll) -> Result<(), DecodeError> {
        let _ = rest;
        Err(DecodeError::NotACatchAll { field })
    }
}
