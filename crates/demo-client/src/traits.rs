use std::sync::Arc;

use crate::error::ClientResult;

/// Storage backend for opaque records.
///
/// All implementations must satisfy these invariants:
/// - An identifier returned by `create` is accepted by later calls on the
///   same instance and resolves to the exact bytes last written.
/// - A deleted identifier reads as [`ClientError::NotFound`] afterwards.
/// - No two live records share an identifier.
/// - Every call releases the handles or connections it opened before
///   returning, on error paths too.
///
/// [`ClientError::NotFound`]: crate::ClientError::NotFound
pub trait Client: Send + Sync {
    /// Persist `payload` as a new record and return its identifier.
    fn create(&self, payload: &[u8]) -> ClientResult<String>;

    /// Return the current payload of the record at `id`.
    ///
    /// Returns `Err(ClientError::NotFound)` if no live record has that id.
    fn read(&self, id: &str) -> ClientResult<Vec<u8>>;

    /// Replace the payload of the record at `id` wholesale.
    ///
    /// Behavior for an absent id is backend-defined.
    fn update(&self, id: &str, payload: &[u8]) -> ClientResult<()>;

    /// Remove the record at `id`.
    ///
    /// Behavior for an absent id is backend-defined.
    fn delete(&self, id: &str) -> ClientResult<()>;
}

impl<T: Client + ?Sized> Client for &T {
    fn create(&self, payload: &[u8]) -> ClientResult<String> {
        (**self).create(payload)
    }

    fn read(&self, id: &str) -> ClientResult<Vec<u8>> {
        (**self).read(id)
    }

    fn update(&self, id: &str, payload: &[u8]) -> ClientResult<()> {
        (**self).update(id, payload)
    }

    fn delete(&self, id: &str) -> ClientResult<()> {
        (**self).delete(id)
    }
}

impl<T: Client + ?Sized> Client for Box<T> {
    fn create(&self, payload: &[u8]) -> ClientResult<String> {
        (**self).create(payload)
    }

    fn read(&self, id: &str) -> ClientResult<Vec<u8>> {
        (**self).read(id)
    }

    fn update(&self, id: &str, payload: &[u8]) -> ClientResult<()> {
        (**self).update(id, payload)
    }

    fn delete(&self, id: &str) -> ClientResult<()> {
        (**self).delete(id)
    }
}

impl<T: Client + ?Sized> Client for Arc<T> {
    fn create(&self, payload: &[u8]) -> ClientResult<String> {
        (**self).create(payload)
    }

    fn read(&self, id: &str) -> ClientResult<Vec<u8>> {
        (**self).read(id)
    }

    fn update(&self, id: &str, payload: &[u8]) -> ClientResult<()> {
        (**self).update(id, payload)
    }

    fn delete(&self, id: &str) -> ClientResult<()> {
        (**self).delete(id)
    }
}
