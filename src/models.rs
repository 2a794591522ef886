//models.rs
use serde::{Deserialize, Serialize};

/// One logged set, as parsed back out of the store.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub date: String,
    pub exercise: String,
    pub weight: f64,
}

/// Raw form values sent across the bridge on `data:save`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryRequest {
    pub date: String,
    pub exercise: String,
    pub weight: String,
}

/// No quoting scheme exists in the store, so commas are dropped from the
/// exercise name before it is written.
pub fn strip_commas(exercise: &str) -> String {
    exercise.replace(',', "")
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DataResponse {
    pub fn ok(data: String) -> Self {
        DataResponse { success: true, data: Some(data), error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        DataResponse { success: false, data: None, error: Some(error.into()) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveResponse {
    pub fn ok() -> Self {
        SaveResponse { success: true, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        SaveResponse { success: false, error: Some(error.into()) }
    }
}
