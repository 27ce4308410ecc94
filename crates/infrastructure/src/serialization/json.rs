//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to pretty JSON with 2-space indentation and a
/// trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Same as [`to_json_stable`], as bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    to_json_stable(value).map(String::into_bytes)
}

/// Deserializes JSON from a string.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddpman_domain::{
        Argument, ConnectionRegistry, EndpointLeaf, EndpointType, Folder, WorkspaceDocument,
    };
    use pretty_assertions::assert_eq;

    fn document() -> WorkspaceDocument {
        let mut registry = ConnectionRegistry::new();
        registry.initialize();
        registry.add_connection();
        registry
            .add_collection("Connection 1", Folder::new("Col"), true)
            .expect("connection exists");
        registry.add_element(
            "Connection 1",
            "Col",
            &[] as &[&str],
            EndpointLeaf::new("users.find", EndpointType::Method)
                .with_args(vec![Argument::string("admin"), Argument::blank()])
                .into(),
        );
        WorkspaceDocument::new(registry)
    }

    #[test]
    fn test_output_is_indented_with_trailing_newline() {
        let json = to_json_stable(&document()).expect("serialization should work");
        assert!(json.ends_with("}\n"));
        assert!(json.contains("\n  \"connections\": ["));
        assert!(json.contains("\"schema_version\": 1"));
    }

    #[test]
    fn test_output_is_stable() {
        let first = to_json_stable(&document()).expect("serialization should work");
        let second = to_json_stable(&document()).expect("serialization should work");
        assert_eq!(first, second);
    }

    #[test]
    fn test_document_survives_reload() {
        let original = document();
        let json = to_json_stable(&original).expect("serialization should work");
        let restored: WorkspaceDocument = from_json(&json).expect("deserialization should work");
        assert_eq!(restored, original);
    }

    #[test]
    fn test_tree_nodes_are_tagged() {
        let json = to_json_stable(&document()).expect("serialization should work");
        assert!(json.contains("\"type\": \"endpoint\""));
        assert!(json.contains("\"endpointType\": \"method\""));
    }

    #[test]
    fn test_invalid_json_is_a_deserialize_error() {
        let result: Result<WorkspaceDocument, _> = from_json_bytes(br#"{"schema_version": }"#);
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
