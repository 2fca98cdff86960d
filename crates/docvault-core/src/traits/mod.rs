//! Trait seams between the persistence/storage substrate and the services.

pub mod blob;
pub mod tree;

pub use blob::{BlobStore, ByteStream};
pub use tree::{AncestorSource, TreeStore};
