//! A library which assembles a nested JSON document from a flat mapping of
//! dot-delimited keys to values.
//!
//! Every key is an address into the document. A component made only of
//! digits is an array index, any other component is an object member:
//!
//! ```
//! let bytes = jpath::marshal([
//!     ("price.value", "100.00"),
//!     ("price.currency", "EU"),
//!     ("shipping.0.country", "GB"),
//! ])
//! .unwrap();
//!
//! assert_eq!(
//!     bytes,
//!     br#"{"price":{"currency":"EU","value":"100.00"},"shipping":[{"country":"GB"}]}"#
//! );
//! ```
//!
//! # Directives
//! A key may end with one directive which changes how its string value is
//! stored:
//! * `[]` splits the value on `,` into an array of strings.
//! * `num()` parses the value as a number.
//! * `bool()` stores `true` for exactly `"true"` and `false` otherwise.
//!
//! # Conflicts
//! Two keys which need different kinds of node at the same location (an
//! object and an array, or a value and anything below it) fail the whole
//! call. When an input holds several conflicts, which one is reported
//! depends on iteration order.

#![warn(missing_debug_implementations)]

pub mod coerce;
pub mod error;
pub mod marshal;
pub mod path;
pub mod tree;
pub mod value;

pub use self::error::{JpathError, Result};
pub use self::marshal::{Marshaller, MarshallerBuilder};
pub use self::path::{Directive, Path, Segment};
pub use self::tree::{Limits, Node, TreeBuilder};
pub use self::value::{EntriesBuilder, FlatValue};

/// Assembles `entries` into a nested document and encodes it as compact
/// JSON, with object members ordered by key.
///
/// Uses a default [`Marshaller`].
pub fn marshal<I, K, V>(entries: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<FlatValue>,
{
    Marshaller::default().marshal(entries)
}

/// Assembles `entries` into a nested document without encoding it.
pub fn to_value<I, K, V>(entries: I) -> Result<serde_json::Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<FlatValue>,
{
    Marshaller::default().to_value(entries)
}
