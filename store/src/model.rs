//! Data types for namespaced key-value storage.

use std::collections::BTreeMap;

use serde_json::Value;

/// All entries of a single namespace, keyed by entry key.
pub type Entries = BTreeMap<String, Value>;

/// The full dataset partitioned by namespace.
///
/// A `BTreeMap` keeps namespaces in lexicographic order, which is the
/// order the namespace directory reports.
pub type Dataset = BTreeMap<String, Entries>;

/// A namespace and its entry count, as reported by [`list_namespaces`].
///
/// A namespace only appears here while it holds at least one entry, so
/// `entries` is never zero.
///
/// [`list_namespaces`]: crate::Backend::list_namespaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceInfo {
    /// Namespace name.
    pub name: String,
    /// Number of entries currently stored under the namespace.
    pub entries: u64,
}
