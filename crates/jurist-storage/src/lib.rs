//! # jurist-storage
//!
//! Blob storage for lawyer verification documents: a local filesystem
//! [`StorageProvider`](jurist_core::traits::StorageProvider) and the
//! [`DocumentStore`] that validates, names and addresses uploads.

pub mod documents;
pub mod providers;

pub use documents::{DocumentStore, ProviderDocumentStore};
pub use providers::LocalStorageProvider;
