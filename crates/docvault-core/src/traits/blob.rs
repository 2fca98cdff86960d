//! Blob storage capability for physical file bytes.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for physical byte storage backends.
///
/// The node tree references blobs only through opaque string keys; what a
/// key maps to on disk (or elsewhere) is entirely the provider's business.
/// Defined here in `docvault-core` and implemented in `docvault-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Store the given bytes under `key`, returning the byte count written.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<u64>;

    /// Open a blob as a byte stream.
    async fn open(&self, key: &str) -> AppResult<ByteStream>;

    /// Read a blob fully into memory.
    async fn read_bytes(&self, key: &str) -> AppResult<Bytes>;

    /// Remove a blob. Removing a missing blob is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Check whether a blob exists under `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}
