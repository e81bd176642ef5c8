//! Storage backends for namespaced key-value data.
//!
//! Two implementations share one contract: [`DocumentBackend`] keeps the
//! whole dataset as a single JSON file and rewrites it on every mutation,
//! while [`IndexedBackend`] keeps one relational row per entry and mutates
//! rows in place. Callers pick one at startup through
//! [`create_backend`] and interact with it only through the [`Backend`]
//! trait; the two must be indistinguishable in observable behavior.

mod document;
mod entity;
mod factory;
mod indexed;

pub use document::DocumentBackend;
pub use factory::create_backend;
pub use indexed::IndexedBackend;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::model::{Entries, NamespaceInfo};

/// The storage contract shared by every backend.
///
/// Writes are last-write-wins upserts with no versioning. Absence is never
/// an error: reads of missing entries return `None` or an empty map, and
/// deletes of missing entries are no-ops. Errors signal trouble with the
/// persistent medium itself, not with what the caller asked for.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Stores a value under `(namespace, key)`, overwriting any existing
    /// value. Creates the namespace implicitly when it does not exist yet.
    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<()>;

    /// Returns the value stored under `(namespace, key)`.
    ///
    /// Returns `None` when the namespace or the key is missing; the two
    /// cases are indistinguishable to the caller.
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>>;

    /// Returns every entry of the namespace, or an empty map when the
    /// namespace does not exist.
    async fn get_namespace(&self, namespace: &str) -> Result<Entries>;

    /// Removes the entry under `(namespace, key)`. No-op when absent.
    ///
    /// Removing the last entry of a namespace removes the namespace from
    /// the directory.
    async fn delete(&self, namespace: &str, key: &str) -> Result<()>;

    /// Removes every entry of the namespace. No-op when the namespace does
    /// not exist.
    async fn delete_namespace(&self, namespace: &str) -> Result<()>;

    /// Lists every namespace currently holding at least one entry, in
    /// lexicographic order, each with its entry count.
    async fn list_namespaces(&self) -> Result<Vec<NamespaceInfo>>;
}
