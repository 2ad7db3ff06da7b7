//! The key-level interface shared by both store strategies.

use crate::domain::value::{FromScalar, Scalar};

/// Key-level access to one configuration file.
///
/// Every method is infallible from the caller's point of view: failures are
/// reported to the store's diagnostic sink and surface as `false`, `0`,
/// `None`, or the supplied default.
///
/// Mutating methods take `&mut self` because the resident strategy updates
/// its in-memory document; the stateless strategy ignores the exclusivity.
pub trait ConfigAccess {
    /// The primitive stored at `key`, if any.
    fn scalar(&self, key: &str) -> Option<Scalar>;

    /// The value at `key` converted to `T`, or `default` when the key is
    /// missing or holds a different kind of value.
    fn get_scalar<T: FromScalar>(&self, key: &str, default: T) -> T
    where
        Self: Sized,
    {
        self.scalar(key)
            .and_then(|scalar| T::from_scalar(&scalar))
            .unwrap_or(default)
    }

    /// Stores `value` under `key`, replacing any previous value of any kind.
    /// Returns `true` once the document has been persisted.
    fn set_scalar(&mut self, key: &str, value: Scalar) -> bool;

    /// Convenience wrapper around [`set_scalar`](Self::set_scalar).
    fn set<V: Into<Scalar>>(&mut self, key: &str, value: V) -> bool
    where
        Self: Sized,
    {
        self.set_scalar(key, value.into())
    }

    fn has_key(&self, key: &str) -> bool;

    /// Removes `key`.  Returns `true` only if it was present and the document
    /// was persisted afterwards.
    fn remove_key(&mut self, key: &str) -> bool;

    fn array_contains(&self, key: &str, target: &str) -> bool;

    /// Appends `value` to the array at `key` unless it is already present.
    /// Returns `true` only if the value was appended and persisted.
    fn array_append_unique(&mut self, key: &str, value: Scalar) -> bool;

    fn array_len(&self, key: &str) -> usize;

    fn array_element_at(&self, key: &str, index: usize) -> Option<String>;
}
