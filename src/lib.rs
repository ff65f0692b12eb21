//! Fixed-capacity JSON document store with generation-checked handles.
//!
//! Every value lives in storage allocated once, up front, and sized by
//! [`DocumentConfig::max_value_count`]: a slot arena for values plus two
//! free-list pools backing arrays and object member lists. There is no
//! per-node heap allocation (string payloads excepted) and no garbage
//! collector; freed slots are detected through per-slot generation counters,
//! so a stale [`ValueHandle`] is caught instead of dereferencing freed
//! memory.
//!
//! # Handles alias
//!
//! [`ValueHandle`] is a cheap `Copy` reference, not a container. Assigning or
//! passing one by value creates an alias of the same stored value; mutating
//! through any alias is visible through all of them. The only way to obtain
//! an independent value is [`Document::deep_copy`].
//!
//! ```
//! use genjson::{Document, SerializeOptions};
//!
//! let mut doc = Document::new();
//! let root = doc.parse(r#"{"name":"probe","tries":3}"#)?;
//!
//! let tries = doc.member(root, "tries");
//! doc.set_int(tries, 4);
//!
//! let text = doc.serialize(root, &SerializeOptions::minified())?;
//! assert_eq!(text, r#"{"name":"probe","tries":4}"#);
//! # Ok::<(), genjson::Error>(())
//! ```
//!
//! # Faults
//!
//! Accessors and mutators never return `Result`; on a stale handle, type
//! mismatch, missing entry, or pool exhaustion they report through the
//! document's failure hook and return a documented safe default. The default
//! hook panics; install a hook with [`Document::set_failure_hook`] to keep
//! going instead. The parse and serialize pipelines return [`Result`].

mod arena;
mod decode;
mod document;
mod encode;
mod error;
mod hash;
mod options;
mod pool;

pub use arena::{ValueHandle, ValueType};
pub use document::{Document, Members, NumberKind, UsageStats};
pub use error::{Error, Result};
pub use hash::key_hash;
pub use options::{DocumentConfig, Indent, NewlineStyle, SerializeMode, SerializeOptions};
pub use pool::ELEMENT_END;

/// Parse a JSON text into `doc`, returning the root value.
pub fn parse(doc: &mut Document, input: &str) -> Result<ValueHandle> {
    doc.parse(input)
}

/// Serialize with default options (pretty, LF, two-space indent).
pub fn to_string(doc: &Document, value: ValueHandle) -> Result<String> {
    doc.serialize(value, &SerializeOptions::default())
}

pub fn to_string_with_options(
    doc: &Document,
    value: ValueHandle,
    options: &SerializeOptions,
) -> Result<String> {
    doc.serialize(value, options)
}
