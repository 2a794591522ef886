use thiserror::Error;

use crate::models::{DataResponse, EntryRequest, SaveResponse};
use crate::store::Store;

pub const CHANNEL_GET_DATA: &str = "data:get";
pub const CHANNEL_SAVE_DATA: &str = "data:save";

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),
}

/// Everything the view is allowed to ask of the host. Nothing else about the
/// store (its path, the file system) is reachable through it.
pub trait Bridge {
    fn get_data(&self) -> DataResponse;
    fn save_entry(&self, entry: &EntryRequest) -> SaveResponse;
}

/// Host side of the bridge. Owns the store and answers JSON invocations on
/// the two named channels.
pub struct HostBridge {
    store: Store,
}

impl HostBridge {
    pub fn new(store: Store) -> Self {
        HostBridge { store }
    }

    /// Dispatches one invocation. The reply is always a response document;
    /// a bad channel or payload comes back as a failure response.
    pub fn invoke(&self, channel: &str, payload: &str) -> String {
        match self.dispatch(channel, payload) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Rejected invocation on {}: {}", channel, e);
                failure_reply(channel, &e.to_string())
            }
        }
    }

    fn dispatch(&self, channel: &str, payload: &str) -> Result<String, BridgeError> {
        match channel {
            CHANNEL_GET_DATA => Ok(serde_json::to_string(&self.handle_get())?),
            CHANNEL_SAVE_DATA => {
                let entry: EntryRequest = serde_json::from_str(payload)?;
                Ok(serde_json::to_string(&self.handle_save(&entry))?)
            }
            other => Err(BridgeError::UnknownChannel(other.to_string())),
        }
    }

    fn handle_get(&self) -> DataResponse {
        match self.store.read_all() {
            Ok(data) => DataResponse::ok(data),
            Err(e) => {
                tracing::error!("Error reading file: {}", e);
                DataResponse::failed(e.to_string())
            }
        }
    }

    fn handle_save(&self, entry: &EntryRequest) -> SaveResponse {
        match self.store.append_entry(&entry.date, &entry.exercise, &entry.weight) {
            Ok(()) => SaveResponse::ok(),
            Err(e) => {
                tracing::error!("Error appending file: {}", e);
                SaveResponse::failed(e.to_string())
            }
        }
    }
}

fn failure_reply(channel: &str, error: &str) -> String {
    let encoded = if channel == CHANNEL_GET_DATA {
        serde_json::to_string(&DataResponse::failed(error))
    } else {
        serde_json::to_string(&SaveResponse::failed(error))
    };
    encoded.unwrap_or_else(|_| r#"{"success":false}"#.to_string())
}

impl Bridge for HostBridge {
    fn get_data(&self) -> DataResponse {
        let reply = self.invoke(CHANNEL_GET_DATA, "null");
        serde_json::from_str(&reply).unwrap_or_else(|e| DataResponse::failed(e.to_string()))
    }

    fn save_entry(&self, entry: &EntryRequest) -> SaveResponse {
        let payload = match serde_json::to_string(entry) {
            Ok(payload) => payload,
            Err(e) => return SaveResponse::failed(e.to_string()),
        };
        let reply = self.invoke(CHANNEL_SAVE_DATA, &payload);
        serde_json::from_str(&reply).unwrap_or_else(|e| SaveResponse::failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_bridge() -> (HostBridge, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path().join("working_weight.csv"));
        store.ensure_store();
        (HostBridge::new(store), temp_dir)
    }

    fn request(date: &str, exercise: &str, weight: &str) -> EntryRequest {
        EntryRequest {
            date: date.to_string(),
            exercise: exercise.to_string(),
            weight: weight.to_string(),
        }
    }

    #[test]
    fn test_save_then_get_round_trip() {
        let (bridge, _temp) = create_test_bridge();

        let saved = bridge.save_entry(&request("2024-02-01", "Bench,Press", "80"));
        assert_eq!(saved, SaveResponse::ok());

        let response = bridge.get_data();
        assert!(response.success);
        assert_eq!(
            response.data.as_deref(),
            Some("date,exercise,weight\n2024-02-01,BenchPress,80\n")
        );
    }

    #[test]
    fn test_save_invalid_data() {
        let (bridge, _temp) = create_test_bridge();

        let saved = bridge.save_entry(&request("2024-02-01", "Bench", ""));
        assert_eq!(saved, SaveResponse::failed("Invalid data"));
        assert_eq!(bridge.get_data().data.as_deref(), Some("date,exercise,weight\n"));
    }

    #[test]
    fn test_get_data_failure_carries_message() {
        let temp_dir = TempDir::new().unwrap();
        let bridge = HostBridge::new(Store::new(temp_dir.path().join("absent.csv")));

        let response = bridge.get_data();
        assert!(!response.success);
        assert!(response.data.is_none());
        assert!(response.error.is_some());
    }

    #[test]
    fn test_invoke_wire_format() {
        let (bridge, _temp) = create_test_bridge();

        let reply = bridge.invoke(
            CHANNEL_SAVE_DATA,
            r#"{"date":"2024-01-01","exercise":"Squat","weight":"100"}"#,
        );
        assert_eq!(reply, r#"{"success":true}"#);

        let reply = bridge.invoke(CHANNEL_GET_DATA, "null");
        assert_eq!(
            reply,
            r#"{"success":true,"data":"date,exercise,weight\n2024-01-01,Squat,100\n"}"#
        );
    }

    #[test]
    fn test_invoke_rejects_unknown_channel_and_bad_payload() {
        let (bridge, _temp) = create_test_bridge();

        let reply: SaveResponse = serde_json::from_str(&bridge.invoke("fs:delete", "{}")).unwrap();
        assert!(!reply.success);
        assert_eq!(reply.error.as_deref(), Some("Unknown channel: fs:delete"));

        let reply: SaveResponse =
            serde_json::from_str(&bridge.invoke(CHANNEL_SAVE_DATA, r#"{"date":1}"#)).unwrap();
        assert!(!reply.success);
        assert!(reply.error.unwrap().starts_with("Malformed message"));
    }
}
