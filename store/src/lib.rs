//! kvshelf store - namespaced key-value storage with interchangeable
//! backends.
//!
//! Values live under a `(namespace, key)` pair and are arbitrary JSON.
//! Namespaces exist implicitly: setting the first key creates one, removing
//! the last key retires it. Two backends implement the same contract and
//! must be indistinguishable in observable behavior:
//!
//! - **Document**: the whole dataset as one JSON file, rewritten on every
//!   mutation. Human-inspectable, linear cost, guarded by a global lock.
//! - **Indexed**: one relational row per entry with a composite primary
//!   key. Constant-time point operations, no global lock.
//!
//! # Key Concepts
//!
//! - **[`Backend`]**: the storage contract (set/get/delete plus
//!   whole-namespace reads and deletes and the namespace directory).
//! - **[`create_backend`]**: config-driven factory returning
//!   `Arc<dyn Backend>`.
//! - **[`codec`]**: JSON text round-tripping for values and datasets.
//!
//! # Example
//!
//! ```ignore
//! use store::{create_backend, BackendConfig};
//! use serde_json::json;
//!
//! let backend = create_backend(&BackendConfig::default()).await?;
//!
//! backend.set("users", "john", json!({"name": "John", "age": 30})).await?;
//! let value = backend.get("users", "john").await?;
//!
//! backend.delete("users", "john").await?;
//! assert_eq!(backend.get("users", "john").await?, None);
//! ```

pub mod codec;

mod config;
mod error;
mod model;

pub mod backend;

pub use backend::{create_backend, Backend, DocumentBackend, IndexedBackend};
pub use config::{BackendConfig, DocumentConfig, IndexedConfig};
pub use error::{Error, Result};
pub use model::{Dataset, Entries, NamespaceInfo};
