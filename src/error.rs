use thiserror::Error;

use crate::arena::ValueType;

/// Every fault the library can raise.
///
/// Capacity, stale-handle, type-mismatch, and missing-entry faults are
/// reported through the document's failure hook and answered with a safe
/// default; `Syntax` faults unwind out of the parse pipeline as `Err`.
/// `Corrupt` indicates a broken internal invariant and is a library bug.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("value arena is out of slots (capacity {capacity})")]
    ArenaFull { capacity: u32 },

    #[error("array pool is out of nodes (capacity {capacity})")]
    ArrayPoolFull { capacity: u32 },

    #[error("member pool is out of nodes (capacity {capacity})")]
    MemberPoolFull { capacity: u32 },

    #[error("stale handle while {context}")]
    StaleHandle { context: &'static str },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },

    #[error("object has no member with key hash {key_hash:#010x}")]
    MissingMember { key_hash: u32 },

    #[error("array has no element at index {index}")]
    MissingElement { index: u32 },

    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("internal structure corrupted: {0}")]
    Corrupt(&'static str),
}

impl Error {
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn stale(context: &'static str) -> Self {
        Error::StaleHandle { context }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_display_messages() {
        let err = Error::ArenaFull { capacity: 16 };
        assert_eq!(err.to_string(), "value arena is out of slots (capacity 16)");

        let err = Error::syntax(7, "unexpected token");
        assert_eq!(err.to_string(), "syntax error at byte 7: unexpected token");

        let err = Error::TypeMismatch {
            expected: ValueType::Array,
            found: ValueType::Bool,
        };
        assert_eq!(err.to_string(), "type mismatch: expected array, found bool");

        let err = Error::MissingMember {
            key_hash: 0xdead_beef,
        };
        assert_eq!(
            err.to_string(),
            "object has no member with key hash 0xdeadbeef"
        );
    }
}
