//! Error types for imdb-scrape.
//!
//! Only document fetching can fail hard, and only through [`FetchError`].
//! Extraction itself never errors: a field that cannot be located or
//! coerced resolves to `None` (or an empty `Vec`), and one field's miss
//! never aborts another field's extraction. [`Miss`] classifies the cause
//! of an absence where internal code needs to tell the cases apart.

/// Error type for document fetching.
///
/// The extraction engine does not distinguish transport sub-kinds: any
/// variant here makes every field depending on the document absent.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP transport failed (connection, status, decoding).
    #[error("transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was empty.
    #[error("empty response body")]
    EmptyBody,
}

/// Why a field resolved to Absent.
///
/// Used internally where the cause matters (e.g. short-circuiting a
/// dependent fetch); public accessors surface all of these uniformly
/// as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Miss {
    /// The backing document could not be fetched.
    Fetch,
    /// The selector chain matched no node.
    MissingNode,
    /// A node was found but its text did not parse as the target type.
    Coercion,
    /// A two-stage extraction's first-stage value was absent.
    Dependency,
}
