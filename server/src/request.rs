//! HTTP request types for the kvshelf server.

use serde::Deserialize;
use serde_json::Value;

/// Request body for set operations.
#[derive(Debug, Deserialize)]
pub struct SetBody {
    /// The value to store under the addressed entry. A missing field
    /// stores JSON `null`.
    #[serde(default)]
    pub value: Value,
}
