//! # Dross - JSON Decoding with Catch-All Residue
//!
//! A drop-in-shaped extension of standard JSON decoding for record types
//! that want to keep the members nobody declared. Two opt-in, per-field
//! behaviors are available through `#[derive(Record)]`:
//!
//! - **catch_all**: every JSON object member not claimed by a declared
//!   field lands in one designated [`CatchAll`] container field
//! - **descend**: a nested record field is decoded recursively with the
//!   same rules instead of one-shot standard conversion
//!
//! Fields without a tag decode exactly as serde_json would decode them.
//!
//! ## Quick Start
//!
//! ```rust
//! use dross::{CatchAll, Record};
//!
//! #[derive(Debug, Default, Record)]
//! struct Animal {
//!     name: String,
//!     order: String,
//!     #[dross(catch_all)]
//!     rest: CatchAll,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let animal: Animal = dross::from_str(r#"{
//!     "name": "Platypus",
//!     "order": "Monotremata",
//!     "beak": "yellow",
//!     "is_a_groundhog": false
//! }"#)?;
//!
//! assert_eq!(animal.name, "Platypus");
//! assert_eq!(animal.rest["beak"], "yellow");
//! assert_eq!(animal.rest["is_a_groundhog"], false);
//! # Ok(())
//! # }
//! ```
//!
//! ## Sequences
//!
//! A JSON array of objects decodes into `Vec<T>` element by element:
//!
//! ```rust
//! use dross::{CatchAll, Record};
//!
//! #[derive(Debug, Default, Record)]
//! struct Event {
//!     #[dross(rename = "_id")]
//!     id: String,
//!     #[dross(catch_all)]
//!     rest: CatchAll,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let events: Vec<Event> = dross::from_str(r#"[
//!     {"_id": "a", "kind": "open"},
//!     {"_id": "b", "kind": "close"}
//! ]"#)?;
//!
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[1].id, "b");
//! assert_eq!(events[1].rest["kind"], "close");
//! # Ok(())
//! # }
//! ```

use std::io;

pub mod decode;
pub mod error;
pub mod record;

// Re-export commonly used types for convenience
pub use decode::Decode;
pub use error::{DecodeError, Result};
pub use record::{CatchAll, FieldDescriptor, FieldTag, Record};

pub use dross_derive::Record;

// The dynamic value tree the decoder walks; re-exported so generated code
// and downstream signatures need no direct serde_json dependency.
pub use serde_json::{Map, Value};

/// Decode a JSON byte slice into a fresh target value.
pub fn from_slice<T: Decode + Default>(bytes: &[u8]) -> Result<T> {
    let mut target = T::default();
    decode_into(bytes, &mut target)?;
    Ok(target)
}

/// Decode a JSON string into a fresh target value.
pub fn from_str<T: Decode + Default>(input: &str) -> Result<T> {
    from_slice(input.as_bytes())
}

/// Decode JSON from a reader into a fresh target value.
///
/// The input is fully materialized into a dynamic value tree before the
/// structural walk begins.
pub fn from_reader<R: io::Read, T: Decode + Default>(reader: R) -> Result<T> {
    let value: Value = serde_json::from_reader(reader)?;
    from_value(value)
}

/// Decode an already-parsed dynamic value into a fresh target value.
pub fn from_value<T: Decode + Default>(value: Value) -> Result<T> {
    let mut target = T::default();
    target.decode_value(value)?;
    Ok(target)
}

/// Decode a JSON byte slice into an existing target value.
///
/// Record targets are populated field by field; sequence targets append
/// decoded elements to the existing vec.
pub fn decode_into<T: Decode>(bytes: &[u8], target: &mut T) -> Result<()> {
    let value: Value = serde_json::from_slice(bytes)?;
    target.decode_value(value)
}
