//! # docvault-storage
//!
//! Blob storage backends. The node tree only ever sees opaque string keys;
//! this crate maps those keys to physical bytes.

pub mod local;

pub use local::LocalBlobStore;
