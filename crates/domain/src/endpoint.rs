//! Endpoint types: saved tree leaves and open working tabs.

use serde::{Deserialize, Serialize};

use crate::argument::{Argument, ArgumentList};

/// Kind of server endpoint an entry targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EndpointType {
    /// A Meteor method, invoked with `call`.
    #[default]
    Method,
    /// A Meteor publication, invoked with `subscribe`.
    Publication,
}

impl std::fmt::Display for EndpointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Method => f.write_str("method"),
            Self::Publication => f.write_str("publication"),
        }
    }
}

/// An endpoint saved in the workspace tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointLeaf {
    /// Deterministic id built from the collection, folder indexes and name.
    pub id: String,
    /// Method or publication name.
    pub name: String,
    /// Free-form markdown description.
    #[serde(default)]
    pub description: Option<String>,
    /// Method or publication.
    #[serde(default)]
    pub endpoint_type: EndpointType,
    /// Arguments as last saved.
    #[serde(default)]
    pub args: Vec<Argument>,
}

impl EndpointLeaf {
    /// Creates a leaf with no arguments. The id is assigned on insertion.
    #[must_use]
    pub fn new(name: impl Into<String>, endpoint_type: EndpointType) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: None,
            endpoint_type,
            args: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the saved arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<Argument>) -> Self {
        self.args = args;
        self
    }
}

/// A working tab. Edits here never touch the tree until the tab is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenEndpoint {
    /// `endpoint-<n>` for fresh tabs, the leaf id once saved or opened from the tree.
    pub id: String,
    /// Tab caption.
    pub title: String,
    /// Method or publication name, once chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Markdown description.
    #[serde(default)]
    pub description: Option<String>,
    /// Working arguments, owned by the tab.
    #[serde(default)]
    pub args: ArgumentList,
    /// Method or publication, once chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Option<EndpointType>,
}

impl OpenEndpoint {
    /// Creates an empty tab.
    #[must_use]
    pub fn blank(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            name: None,
            description: None,
            args: ArgumentList::new(),
            endpoint_type: None,
        }
    }

    /// Opens a tree leaf as a tab. The arguments are cloned, not shared.
    #[must_use]
    pub fn from_leaf(leaf: &EndpointLeaf) -> Self {
        Self {
            id: leaf.id.clone(),
            title: leaf.name.clone(),
            name: Some(leaf.name.clone()),
            description: leaf.description.clone(),
            args: ArgumentList::from(leaf.args.clone()),
            endpoint_type: Some(leaf.endpoint_type),
        }
    }

    /// Name used when saving: the chosen name, or the tab title.
    #[must_use]
    pub fn effective_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.title)
    }

    /// Builds the leaf this tab would be saved as under `id`.
    #[must_use]
    pub fn to_leaf(&self, id: impl Into<String>) -> EndpointLeaf {
        EndpointLeaf {
            id: id.into(),
            name: self.effective_name().to_string(),
            description: self.description.clone(),
            endpoint_type: self.endpoint_type.unwrap_or_default(),
            args: self.args.to_vec(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_tab() {
        let tab = OpenEndpoint::blank("endpoint-1", "Endpoint 1");
        assert_eq!(tab.title, "Endpoint 1");
        assert!(tab.args.has_trailing_blank());
        assert!(tab.endpoint_type.is_none());
    }

    #[test]
    fn test_leaf_round_trip() {
        let leaf = EndpointLeaf::new("users.list", EndpointType::Publication)
            .with_description("Lists users")
            .with_args(vec![Argument::string("admin"), Argument::blank()]);
        let mut leaf = leaf;
        leaf.id = "Col-users.list".into();

        let tab = OpenEndpoint::from_leaf(&leaf);
        assert_eq!(tab.title, "users.list");
        assert_eq!(tab.to_leaf(leaf.id.clone()), leaf);
    }

    #[test]
    fn test_effective_name_falls_back_to_title() {
        let mut tab = OpenEndpoint::blank("endpoint-1", "Endpoint 1");
        assert_eq!(tab.effective_name(), "Endpoint 1");
        tab.name = Some("   ".into());
        assert_eq!(tab.effective_name(), "Endpoint 1");
        tab.name = Some("login".into());
        assert_eq!(tab.effective_name(), "login");
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let mut tab = OpenEndpoint::blank("endpoint-1", "Endpoint 1");
        tab.endpoint_type = Some(EndpointType::Method);
        let json = serde_json::to_value(&tab).unwrap();
        assert_eq!(json["endpointType"], "method");
    }
}
