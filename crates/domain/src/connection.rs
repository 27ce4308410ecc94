//! A named server connection: its saved workspace tree and its open tabs.

use serde::{Deserialize, Serialize};

use crate::argument::Argument;
use crate::endpoint::{EndpointLeaf, EndpointType, OpenEndpoint};
use crate::error::{DomainError, DomainResult};
use crate::id::{open_endpoint_id, tree_element_id};
use crate::path::{closest_item, remove_item_at_index, split_path};
use crate::tree::{Collection, NodeKind, TreeNode};

/// Title prefix probed when naming new tabs.
pub const OPEN_ENDPOINT_TITLE_PREFIX: &str = "Endpoint ";

/// Result of saving an open endpoint into the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new leaf was appended and the tab adopted its identity.
    Created {
        /// Id of the new leaf.
        id: String,
    },
    /// An existing leaf with the same id was overwritten.
    Updated {
        /// Id of the overwritten leaf.
        id: String,
    },
}

impl SaveOutcome {
    /// Id of the saved leaf.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Created { id } | Self::Updated { id } => id,
        }
    }
}

/// A server connection and everything the user keeps for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Unique display name, e.g. `Connection 1`.
    pub title: String,
    /// Saved workspace tree.
    #[serde(default)]
    pub collections: Vec<Collection>,
    /// Working tabs.
    #[serde(default)]
    pub open_endpoints: Vec<OpenEndpoint>,
}

impl Connection {
    /// Creates a connection with no collections and no tabs.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            collections: Vec::new(),
            open_endpoints: Vec::new(),
        }
    }

    /// Creates a connection seeded with the default `Endpoint 1` tab.
    #[must_use]
    pub fn with_default_tab(title: impl Into<String>) -> Self {
        let mut connection = Self::new(title);
        connection.open_endpoints.push(default_tab());
        connection
    }

    // Collections

    /// Finds a collection by name.
    #[must_use]
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    fn collection_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.name == name)
    }

    /// Appends a collection; its id becomes its name.
    pub fn add_collection(&mut self, mut collection: Collection) {
        collection.id.clone_from(&collection.name);
        self.collections.push(collection);
    }

    /// Removes the collection at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if there is no collection at `index`.
    pub fn remove_collection(&mut self, index: usize) -> DomainResult<Collection> {
        remove_item_at_index(&mut self.collections, index, "collection")
    }

    // Tree elements

    /// Appends `element` to the folder reached by walking `path` (folder
    /// names below the collection). The walk stops at the first unknown
    /// segment and the element lands in the deepest folder found.
    ///
    /// Returns the id given to the element, or `None` when the collection
    /// does not exist.
    pub fn add_element<S: AsRef<str>>(
        &mut self,
        collection_name: &str,
        path: &[S],
        mut element: TreeNode,
    ) -> Option<String> {
        let collection = self.collection_mut(collection_name)?;
        let chain = collection.folder_indexes_by_names(path);
        let id = tree_element_id(collection_name, &chain, element.name());
        element.set_id(id.clone());
        collection.folder_at_mut(&chain)?.children.push(element);
        Some(id)
    }

    /// Removes the child with `element_id` and `kind` from the folder named
    /// by `path`. A folder and an endpoint with the same name share an id,
    /// so the kind picks between them.
    ///
    /// Every path segment must resolve; otherwise nothing is removed.
    pub fn remove_element<S: AsRef<str>>(
        &mut self,
        collection_name: &str,
        path: &[S],
        element_id: &str,
        kind: NodeKind,
    ) -> Option<TreeNode> {
        let collection = self.collection_mut(collection_name)?;
        let chain = collection.folder_indexes_by_names(path);
        if chain.len() != path.len() {
            return None;
        }
        let folder = collection.folder_at_mut(&chain)?;
        let index = folder.position_of(element_id, kind)?;
        Some(folder.children.remove(index))
    }

    /// Resolves a `/`-delimited path into an index chain: the collection
    /// index first, then one index per matching child folder. Resolution
    /// stops at the first segment that does not match.
    #[must_use]
    pub fn find_path_indexes(&self, path: &str) -> Vec<usize> {
        let segments = split_path(path);
        let Some((first, rest)) = segments.split_first() else {
            return Vec::new();
        };
        let Some(collection_index) = self.collections.iter().position(|c| c.name == *first)
        else {
            return Vec::new();
        };
        let mut chain = vec![collection_index];
        chain.extend(self.collections[collection_index].folder_indexes_by_names(rest));
        chain
    }

    /// Searches every collection for an endpoint leaf by id.
    #[must_use]
    pub fn find_leaf(&self, id: &str) -> Option<&EndpointLeaf> {
        self.collections.iter().find_map(|c| c.find_leaf(id))
    }

    /// Returns true once a tab has been saved to the tree.
    #[must_use]
    pub fn is_saved(&self, open_endpoint_id: &str) -> bool {
        self.find_leaf(open_endpoint_id).is_some()
    }

    /// Saves a tab into the folder addressed by `chain` (collection index
    /// first). An endpoint leaf with the same id is overwritten; a folder
    /// sharing that id is left alone. Otherwise a new leaf is appended and
    /// the tab with `open.id` takes over the new identity.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` for an empty chain and `IndexOutOfBounds` when
    /// the chain no longer matches the tree.
    pub fn save_open_endpoint(
        &mut self,
        open: &OpenEndpoint,
        chain: &[usize],
    ) -> DomainResult<SaveOutcome> {
        let Some((&collection_index, folder_chain)) = chain.split_first() else {
            return Err(DomainError::InvalidPath(
                "select a collection or folder".to_string(),
            ));
        };
        let len = self.collections.len();
        let collection = self
            .collections
            .get_mut(collection_index)
            .ok_or(DomainError::out_of_bounds("collection", collection_index, len))?;

        let id = tree_element_id(&collection.name, folder_chain, open.effective_name());
        let leaf = open.to_leaf(id.clone());
        let folder = collection.try_folder_at_mut(folder_chain)?;

        if let Some(index) = folder.position_of(&id, NodeKind::Endpoint) {
            folder.children[index] = TreeNode::Endpoint(leaf);
            return Ok(SaveOutcome::Updated { id });
        }

        let reopened = OpenEndpoint::from_leaf(&leaf);
        folder.children.push(TreeNode::Endpoint(leaf));
        if let Some(tab) = self.open_endpoints.iter_mut().find(|t| t.id == open.id) {
            *tab = reopened;
        }
        Ok(SaveOutcome::Created { id })
    }

    // Open endpoints

    /// Finds a tab by id.
    #[must_use]
    pub fn open_endpoint(&self, id: &str) -> Option<&OpenEndpoint> {
        self.open_endpoints.iter().find(|t| t.id == id)
    }

    fn open_endpoint_mut(&mut self, id: &str) -> Option<&mut OpenEndpoint> {
        self.open_endpoints.iter_mut().find(|t| t.id == id)
    }

    /// Seeds the default tab when there are no tabs. Returns true if seeded.
    pub fn seed_default_tab(&mut self) -> bool {
        if !self.open_endpoints.is_empty() {
            return false;
        }
        self.open_endpoints.push(default_tab());
        true
    }

    /// Opens a blank tab titled after the first free `Endpoint <n>`.
    ///
    /// The id starts from the same `n` but keeps counting if that id is
    /// already taken, so ids stay unique even when titles and ids drift.
    pub fn open_new_tab(&mut self) -> &OpenEndpoint {
        let mut n = 1;
        while self
            .open_endpoints
            .iter()
            .any(|t| t.title == format!("{OPEN_ENDPOINT_TITLE_PREFIX}{n}"))
        {
            n += 1;
        }
        let title = format!("{OPEN_ENDPOINT_TITLE_PREFIX}{n}");

        let mut id_n = n;
        while self.open_endpoint(&open_endpoint_id(id_n)).is_some() {
            id_n += 1;
        }

        let index = self.open_endpoints.len();
        self.open_endpoints
            .push(OpenEndpoint::blank(open_endpoint_id(id_n), title));
        &self.open_endpoints[index]
    }

    /// Closes a tab. Unknown ids are ignored.
    pub fn close_tab(&mut self, id: &str) -> Option<OpenEndpoint> {
        let index = self.open_endpoints.iter().position(|t| t.id == id)?;
        Some(self.open_endpoints.remove(index))
    }

    /// Tab to focus once `id` is closed.
    #[must_use]
    pub fn closest_tab(&self, id: &str) -> Option<&OpenEndpoint> {
        let index = self.open_endpoints.iter().position(|t| t.id == id);
        closest_item(&self.open_endpoints, index)
    }

    /// Opens a tree leaf as a tab unless a tab with its id is already open.
    /// Returns true if a tab was added.
    pub fn open_from_tree(&mut self, leaf: &EndpointLeaf) -> bool {
        if self.open_endpoint(&leaf.id).is_some() {
            return false;
        }
        self.open_endpoints.push(OpenEndpoint::from_leaf(leaf));
        true
    }

    /// Writes the endpoint name and type onto a tab. The title is kept.
    /// Returns false when no tab has that id.
    pub fn rename_tab(&mut self, id: &str, name: &str, endpoint_type: EndpointType) -> bool {
        let Some(tab) = self.open_endpoint_mut(id) else {
            return false;
        };
        tab.name = Some(name.to_string());
        tab.endpoint_type = Some(endpoint_type);
        true
    }

    /// Replaces an argument of a tab. Returns false when no tab has that id.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index` is past the end of the tab's list.
    pub fn set_argument(&mut self, id: &str, index: usize, argument: Argument) -> DomainResult<bool> {
        let Some(tab) = self.open_endpoint_mut(id) else {
            return Ok(false);
        };
        tab.args.set(index, argument)?;
        Ok(true)
    }

    /// Removes an argument of a tab. Returns `None` when no tab has that id.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index` is past the end of the tab's list.
    pub fn remove_argument(&mut self, id: &str, index: usize) -> DomainResult<Option<Argument>> {
        let Some(tab) = self.open_endpoint_mut(id) else {
            return Ok(None);
        };
        tab.args.remove(index).map(Some)
    }
}

fn default_tab() -> OpenEndpoint {
    OpenEndpoint::blank(open_endpoint_id(1), format!("{OPEN_ENDPOINT_TITLE_PREFIX}1"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tree::Folder;
    use pretty_assertions::assert_eq;

    fn connection_with_collection() -> Connection {
        let mut connection = Connection::with_default_tab("Connection 1");
        connection.add_collection(Folder::new("Col"));
        connection
    }

    fn titles(connection: &Connection) -> Vec<&str> {
        connection
            .open_endpoints
            .iter()
            .map(|t| t.title.as_str())
            .collect()
    }

    #[test]
    fn test_add_collection_uses_name_as_id() {
        let connection = connection_with_collection();
        assert_eq!(connection.collections[0].id, "Col");
    }

    #[test]
    fn test_remove_collection_out_of_bounds() {
        let mut connection = connection_with_collection();
        assert!(connection.remove_collection(1).is_err());
        assert_eq!(connection.remove_collection(0).unwrap().name, "Col");
        assert!(connection.collections.is_empty());
    }

    #[test]
    fn test_add_element_to_collection_root() {
        let mut connection = connection_with_collection();
        let leaf = EndpointLeaf::new("Foo", EndpointType::Method);
        let empty: [&str; 0] = [];

        let id = connection.add_element("Col", &empty, leaf.into());

        assert_eq!(id.as_deref(), Some("Col-Foo"));
        let col = connection.collection("Col").unwrap();
        assert_eq!(col.children.len(), 1);
        assert_eq!(col.children[0].id(), "Col-Foo");
    }

    #[test]
    fn test_add_element_into_nested_folder() {
        let mut connection = connection_with_collection();
        let empty: [&str; 0] = [];
        connection.add_element("Col", &empty, Folder::new("Users").into());
        connection.add_element("Col", &["Users"], Folder::new("Admin").into());

        let id = connection.add_element(
            "Col",
            &["Users", "Admin"],
            EndpointLeaf::new("ban", EndpointType::Method).into(),
        );

        assert_eq!(id.as_deref(), Some("Col-00-ban"));
        assert!(connection.find_leaf("Col-00-ban").is_some());
    }

    #[test]
    fn test_add_element_stops_at_unresolved_segment() {
        let mut connection = connection_with_collection();
        let empty: [&str; 0] = [];
        connection.add_element("Col", &empty, Folder::new("Users").into());

        let id = connection.add_element(
            "Col",
            &["Users", "Nope"],
            EndpointLeaf::new("x1", EndpointType::Method).into(),
        );

        assert_eq!(id.as_deref(), Some("Col-0-x1"));
        let users = connection.collection("Col").unwrap().folder_at(&[0]).unwrap();
        assert_eq!(users.children.len(), 1);
    }

    #[test]
    fn test_add_element_unknown_collection_is_noop() {
        let mut connection = connection_with_collection();
        let empty: [&str; 0] = [];
        let id = connection.add_element("Other", &empty, Folder::new("Users").into());
        assert!(id.is_none());
    }

    #[test]
    fn test_remove_element() {
        let mut connection = connection_with_collection();
        let empty: [&str; 0] = [];
        connection.add_element("Col", &empty, Folder::new("Users").into());
        let id = connection
            .add_element("Col", &["Users"], EndpointLeaf::new("list", EndpointType::Method).into())
            .unwrap();

        assert!(connection.remove_element("Col", &["Nope"], &id, NodeKind::Endpoint).is_none());
        assert!(connection.remove_element("Col", &["Users"], "missing", NodeKind::Endpoint).is_none());
        assert!(connection.remove_element("Col", &["Users"], &id, NodeKind::Directory).is_none());

        let removed = connection
            .remove_element("Col", &["Users"], &id, NodeKind::Endpoint)
            .unwrap();
        assert_eq!(removed.name(), "list");
        assert!(connection.find_leaf(&id).is_none());
    }

    fn connection_with_folder_and_endpoint_named_foo() -> Connection {
        let mut connection = connection_with_collection();
        let empty: [&str; 0] = [];
        connection.add_element("Col", &empty, Folder::new("Foo").into());
        connection.add_element("Col", &["Foo"], EndpointLeaf::new("inner", EndpointType::Method).into());
        connection.add_element("Col", &empty, EndpointLeaf::new("Foo", EndpointType::Method).into());
        connection
    }

    #[test]
    fn test_remove_element_picks_kind_among_shared_ids() {
        let mut connection = connection_with_folder_and_endpoint_named_foo();
        let empty: [&str; 0] = [];

        let removed = connection
            .remove_element("Col", &empty, "Col-Foo", NodeKind::Endpoint)
            .unwrap();

        assert_eq!(removed.kind(), NodeKind::Endpoint);
        let col = connection.collection("Col").unwrap();
        assert_eq!(col.children.len(), 1);
        assert_eq!(col.children[0].kind(), NodeKind::Directory);
        assert!(connection.find_leaf("Col-0-inner").is_some());

        let removed = connection
            .remove_element("Col", &empty, "Col-Foo", NodeKind::Directory)
            .unwrap();
        assert_eq!(removed.kind(), NodeKind::Directory);
        assert!(connection.collection("Col").unwrap().children.is_empty());
    }

    #[test]
    fn test_save_keeps_folder_sharing_the_id() {
        let mut connection = connection_with_collection();
        let empty: [&str; 0] = [];
        connection.add_element("Col", &empty, Folder::new("Foo").into());
        connection.add_element("Col", &["Foo"], EndpointLeaf::new("inner", EndpointType::Method).into());
        connection.rename_tab("endpoint-1", "Foo", EndpointType::Method);
        let tab = connection.open_endpoint("endpoint-1").unwrap().clone();

        let outcome = connection.save_open_endpoint(&tab, &[0]).unwrap();
        assert_eq!(outcome, SaveOutcome::Created { id: "Col-Foo".into() });

        let kinds: Vec<(NodeKind, &str)> = connection.collections[0]
            .children
            .iter()
            .map(|c| (c.kind(), c.id()))
            .collect();
        assert_eq!(
            kinds,
            vec![(NodeKind::Directory, "Col-Foo"), (NodeKind::Endpoint, "Col-Foo")]
        );
        assert!(connection.find_leaf("Col-0-inner").is_some());

        let saved = connection.open_endpoints[0].clone();
        let outcome = connection.save_open_endpoint(&saved, &[0]).unwrap();
        assert_eq!(outcome, SaveOutcome::Updated { id: "Col-Foo".into() });
        assert_eq!(connection.collections[0].children.len(), 2);
        assert_eq!(connection.collections[0].children[0].kind(), NodeKind::Directory);
    }

    #[test]
    fn test_find_path_indexes() {
        let mut connection = connection_with_collection();
        connection.add_collection(Folder::new("Other"));
        let empty: [&str; 0] = [];
        connection.add_element("Other", &empty, Folder::new("A").into());
        connection.add_element("Other", &empty, Folder::new("B").into());
        connection.add_element("Other", &["B"], Folder::new("C").into());

        assert_eq!(connection.find_path_indexes("Other/B/C"), vec![1, 1, 0]);
        assert_eq!(connection.find_path_indexes("Other/B/Z/C"), vec![1, 1]);
        assert_eq!(connection.find_path_indexes("Col"), vec![0]);
        assert!(connection.find_path_indexes("Missing/B").is_empty());
        assert!(connection.find_path_indexes("").is_empty());
    }

    #[test]
    fn test_open_new_tab_probes_titles() {
        let mut connection = Connection::with_default_tab("Connection 1");
        connection.open_new_tab();
        connection.open_new_tab();
        connection.open_new_tab();

        assert_eq!(
            titles(&connection),
            vec!["Endpoint 1", "Endpoint 2", "Endpoint 3", "Endpoint 4"]
        );
        assert_eq!(connection.open_endpoints[3].id, "endpoint-4");
    }

    #[test]
    fn test_open_new_tab_reuses_freed_title_with_unique_id() {
        let mut connection = Connection::with_default_tab("Connection 1");
        connection.open_new_tab();
        // Rename tab 1 away so its title frees up while its id stays.
        connection.open_endpoints[0].title = "login".into();

        let tab = connection.open_new_tab().clone();

        assert_eq!(tab.title, "Endpoint 1");
        assert_eq!(tab.id, "endpoint-3");
    }

    #[test]
    fn test_close_tab() {
        let mut connection = Connection::with_default_tab("Connection 1");
        let id = connection.open_new_tab().id.clone();

        assert_eq!(connection.closest_tab(&id).unwrap().id, "endpoint-1");
        assert!(connection.close_tab(&id).is_some());
        assert!(connection.close_tab(&id).is_none());
        assert_eq!(titles(&connection), vec!["Endpoint 1"]);
    }

    #[test]
    fn test_open_from_tree_is_idempotent() {
        let mut connection = Connection::new("Connection 1");
        let mut leaf = EndpointLeaf::new("ping", EndpointType::Method);
        leaf.id = "Col-ping".into();

        assert!(connection.open_from_tree(&leaf));
        assert!(!connection.open_from_tree(&leaf));
        assert_eq!(titles(&connection), vec!["ping"]);
    }

    #[test]
    fn test_rename_tab_writes_name_and_type() {
        let mut connection = Connection::with_default_tab("Connection 1");
        assert!(connection.rename_tab("endpoint-1", "users.list", EndpointType::Publication));

        let tab = connection.open_endpoint("endpoint-1").unwrap();
        assert_eq!(tab.name.as_deref(), Some("users.list"));
        assert_eq!(tab.endpoint_type, Some(EndpointType::Publication));
        assert_eq!(tab.title, "Endpoint 1");
        assert!(!connection.rename_tab("nope", "x", EndpointType::Method));
    }

    #[test]
    fn test_save_creates_then_updates() {
        let mut connection = connection_with_collection();
        connection.rename_tab("endpoint-1", "login", EndpointType::Method);
        let tab = connection.open_endpoint("endpoint-1").unwrap().clone();

        let outcome = connection.save_open_endpoint(&tab, &[0]).unwrap();
        assert_eq!(outcome, SaveOutcome::Created { id: "Col-login".into() });
        assert!(connection.is_saved("Col-login"));
        assert_eq!(connection.open_endpoints[0].id, "Col-login");
        assert_eq!(connection.open_endpoints[0].title, "login");

        let mut edited = connection.open_endpoints[0].clone();
        edited.args.set(0, Argument::string("alice")).unwrap();
        let outcome = connection.save_open_endpoint(&edited, &[0]).unwrap();
        assert_eq!(outcome, SaveOutcome::Updated { id: "Col-login".into() });

        let col = connection.collection("Col").unwrap();
        assert_eq!(col.children.len(), 1);
        assert_eq!(connection.find_leaf("Col-login").unwrap().args.len(), 2);
    }

    #[test]
    fn test_save_into_nested_folder_uses_index_chain() {
        let mut connection = connection_with_collection();
        let empty: [&str; 0] = [];
        connection.add_element("Col", &empty, EndpointLeaf::new("ping", EndpointType::Method).into());
        connection.add_element("Col", &empty, Folder::new("Users").into());
        connection.rename_tab("endpoint-1", "list", EndpointType::Method);
        let tab = connection.open_endpoint("endpoint-1").unwrap().clone();

        let chain = connection.find_path_indexes("Col/Users");
        let outcome = connection.save_open_endpoint(&tab, &chain).unwrap();

        assert_eq!(outcome.id(), "Col-1-list");
    }

    #[test]
    fn test_save_rejects_stale_or_empty_chain() {
        let mut connection = connection_with_collection();
        let tab = connection.open_endpoints[0].clone();

        assert!(matches!(
            connection.save_open_endpoint(&tab, &[]),
            Err(DomainError::InvalidPath(_))
        ));
        assert_eq!(
            connection.save_open_endpoint(&tab, &[3]),
            Err(DomainError::out_of_bounds("collection", 3, 1))
        );
        assert_eq!(
            connection.save_open_endpoint(&tab, &[0, 0]),
            Err(DomainError::out_of_bounds("folder", 0, 0))
        );
    }

    #[test]
    fn test_save_then_reopen_round_trip() {
        let mut connection = connection_with_collection();
        connection.rename_tab("endpoint-1", "login", EndpointType::Publication);
        connection
            .set_argument("endpoint-1", 0, Argument::boolean(true))
            .unwrap();
        let mut tab = connection.open_endpoint("endpoint-1").unwrap().clone();
        tab.description = Some("Signs in".into());

        connection.save_open_endpoint(&tab, &[0]).unwrap();
        connection.close_tab("Col-login");
        let leaf = connection.find_leaf("Col-login").unwrap().clone();
        connection.open_from_tree(&leaf);

        let reopened = connection.open_endpoint("Col-login").unwrap();
        assert_eq!(reopened.name, tab.name);
        assert_eq!(reopened.description, tab.description);
        assert_eq!(reopened.endpoint_type, tab.endpoint_type);
        assert_eq!(reopened.args, tab.args);
    }

    #[test]
    fn test_argument_ops_on_tabs() {
        let mut connection = Connection::with_default_tab("Connection 1");

        assert!(connection.set_argument("endpoint-1", 0, Argument::number(1.0)).unwrap());
        assert_eq!(connection.open_endpoints[0].args.len(), 2);
        assert!(connection.set_argument("endpoint-1", 9, Argument::number(1.0)).is_err());
        assert!(!connection.set_argument("missing", 0, Argument::number(1.0)).unwrap());

        let removed = connection.remove_argument("endpoint-1", 0).unwrap();
        assert!(removed.is_some());
        assert_eq!(connection.remove_argument("missing", 0), Ok(None));
    }
}
