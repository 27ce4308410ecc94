//! ID generation utilities.

use uuid::Uuid;

/// Prefix of the synthetic ids given to open endpoint tabs.
pub const OPEN_ENDPOINT_ID_PREFIX: &str = "endpoint-";

/// Generates a new UUID v7 as a string.
///
/// Used for argument rows, which need identity but no meaning.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Builds the synthetic id of the `n`th open endpoint tab (`endpoint-<n>`).
#[must_use]
pub fn open_endpoint_id(n: usize) -> String {
    format!("{OPEN_ENDPOINT_ID_PREFIX}{n}")
}

/// Builds the id of a tree element from its collection, the folder index
/// chain below that collection and the element name.
///
/// An empty chain yields `<collection>-<name>`; otherwise the indexes are
/// concatenated without separators: `<collection>-<indexes>-<name>`.
#[must_use]
pub fn tree_element_id(collection: &str, folder_indexes: &[usize], name: &str) -> String {
    if folder_indexes.is_empty() {
        format!("{collection}-{name}")
    } else {
        let indexes: String = folder_indexes.iter().map(ToString::to_string).collect();
        format!("{collection}-{indexes}-{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id();
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generate_id_uniqueness() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_open_endpoint_id() {
        assert_eq!(open_endpoint_id(3), "endpoint-3");
    }

    #[test]
    fn test_tree_element_id() {
        assert_eq!(tree_element_id("Col", &[], "Foo"), "Col-Foo");
        assert_eq!(tree_element_id("Col", &[0, 2], "Foo"), "Col-02-Foo");
    }
}
