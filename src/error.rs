use thiserror::Error;

/// Errors reported by the checked operations of [`OrderedMap`](crate::OrderedMap).
///
/// Out-of-range indices are not represented here; they are caller bugs and panic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The key is already present at another position.
    #[error("duplicate key")]
    DuplicateKey,

    /// An encoded pair sequence ended after a key, before its value.
    #[error("corrupted data: key without a value")]
    MissingValue,
}
