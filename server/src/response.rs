//! HTTP response types for the kvshelf server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use store::{Entries, NamespaceInfo};

/// A namespace in a directory listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceEntry {
    /// Namespace name.
    pub name: String,
    /// Number of entries stored under the namespace.
    pub entries: u64,
}

impl From<&NamespaceInfo> for NamespaceEntry {
    fn from(info: &NamespaceInfo) -> Self {
        Self {
            name: info.name.clone(),
            entries: info.entries,
        }
    }
}

/// Response for namespace directory listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNamespacesResponse {
    /// Status of the response.
    pub status: String,
    /// Namespaces currently holding at least one entry.
    pub namespaces: Vec<NamespaceEntry>,
    /// Number of namespaces listed.
    pub count: usize,
}

impl ListNamespacesResponse {
    /// Create a successful directory listing response.
    pub fn success(namespaces: Vec<NamespaceEntry>) -> Self {
        let count = namespaces.len();
        Self {
            status: "success".to_string(),
            namespaces,
            count,
        }
    }
}

/// Response for whole-namespace reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceResponse {
    /// Status of the response.
    pub status: String,
    /// Namespace name.
    pub namespace: String,
    /// Every entry of the namespace; empty when the namespace does not
    /// exist.
    pub entries: Entries,
    /// Number of entries returned.
    pub count: usize,
}

impl NamespaceResponse {
    /// Create a successful namespace read response.
    pub fn success(namespace: String, entries: Entries) -> Self {
        let count = entries.len();
        Self {
            status: "success".to_string(),
            namespace,
            entries,
            count,
        }
    }
}

/// Response for single-entry reads.
///
/// `value` is omitted entirely when the entry is absent. A stored JSON
/// `null` still serializes as `"value": null`, keeping "never set" and
/// "set to null" distinguishable on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetResponse {
    /// Status of the response.
    pub status: String,
    /// Namespace name.
    pub namespace: String,
    /// Entry key.
    pub key: String,
    /// The stored value, if the entry exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl GetResponse {
    /// Create a successful entry read response.
    pub fn success(namespace: String, key: String, value: Option<Value>) -> Self {
        Self {
            status: "success".to_string(),
            namespace,
            key,
            value,
        }
    }
}

/// Response for set operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetResponse {
    /// Status of the response.
    pub status: String,
    /// Namespace name.
    pub namespace: String,
    /// Entry key.
    pub key: String,
}

impl SetResponse {
    /// Create a successful set response.
    pub fn success(namespace: String, key: String) -> Self {
        Self {
            status: "success".to_string(),
            namespace,
            key,
        }
    }
}

/// Response for single-entry deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Status of the response.
    pub status: String,
    /// Namespace name.
    pub namespace: String,
    /// Entry key.
    pub key: String,
}

impl DeleteResponse {
    /// Create a successful delete response.
    pub fn success(namespace: String, key: String) -> Self {
        Self {
            status: "success".to_string(),
            namespace,
            key,
        }
    }
}

/// Response for whole-namespace deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteNamespaceResponse {
    /// Status of the response.
    pub status: String,
    /// Namespace name.
    pub namespace: String,
}

impl DeleteNamespaceResponse {
    /// Create a successful namespace delete response.
    pub fn success(namespace: String) -> Self {
        Self {
            status: "success".to_string(),
            namespace,
        }
    }
}
