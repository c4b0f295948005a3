use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors produced while decoding JSON into a record target.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Input was not syntactically valid JSON.
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Top-level JSON value cannot populate the target shape.
    #[error("cannot decode {found} into {expected}")]
    UnexpectedShape {
        /// Shape the target requires.
        expected: &'static str,
        /// Shape found in the input.
        found: &'static str,
    },

    /// A member claimed by a descend field was present but not an object.
    #[error("cannot descend into member {name:?}: expected an object, got {found}")]
    MemberShape {
        /// External member name.
        name: &'static str,
        /// Shape found in the input.
        found: &'static str,
    },

    /// A sequence element was not a JSON object.
    #[error("sequence element {index} is not an object, got {found}")]
    ElementShape {
        /// Position of the offending element.
        index: usize,
        /// Shape found in the input.
        found: &'static str,
    },

    /// A member value failed standard conversion into its field's type.
    #[error("value for member {name:?} did not decode into {ty}: {source}")]
    Conversion {
        /// External member name.
        name: &'static str,
        /// Declared Rust type of the field.
        ty: &'static str,
        /// Underlying conversion failure.
        source: serde_json::Error,
    },

    /// A field descriptor is tagged descend but the record cannot recurse
    /// into it.
    #[error("cannot descend into field {field}: not a record")]
    NotARecord {
        /// Declared field name.
        field: &'static str,
    },

    /// A field descriptor is tagged catch_all but the record cannot store
    /// a catch-all container in it.
    #[error("field {field} is tagged catch_all but does not have type CatchAll")]
    NotACatchAll {
        /// Declared field name.
        field: &'static str,
    },

    /// A record declares more than one catch-all field.
    #[error("record declares more than one catch_all field: {first} and {second}")]
    DuplicateCatchAll {
        /// First catch-all field encountered.
        first: &'static str,
        /// Second catch-all field encountered.
        second: &'static str,
    },
}
