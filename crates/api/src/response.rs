//! Normalized response envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shape of every successful API response.
///
/// The backend is loose about its envelope: some endpoints answer with
/// `{success, message, data}`, others put the payload under a resource key
/// (`{success, company}`). Anything not modelled lands in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> ApiResponse<T> {
    /// Response for a 2xx with no body.
    pub fn empty() -> Self {
        Self {
            success: None,
            message: None,
            data: None,
            extra: Map::new(),
        }
    }

    /// A missing `success` flag counts as success; the HTTP status already did.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Top-level field outside the standard envelope.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}
