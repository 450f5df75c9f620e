//! Typed failures shared by `ProbeMap` and `ProbeSet`.

/// Errors returned by fallible container operations.
///
/// Every variant is reported at the call site and leaves the stored
/// entries unchanged; nothing is retried or logged internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// Strict insert of a key that is already present.
    #[error("the key is already present")]
    DuplicateKey,
    /// Checked read of a key that is absent.
    #[error("the key is not present")]
    KeyNotFound,
    /// A copy target cannot hold every entry from the requested offset.
    #[error("destination holds {available} entries from the offset, {needed} are required")]
    DestinationTooSmall { needed: usize, available: usize },
}
