//! Registry of server connections.
//!
//! Connections are held behind `Arc`. Cloning the registry is cheap, and a
//! mutation only copies the connection it touches (`Arc::make_mut`), so
//! every untouched connection keeps its pointer identity across snapshots.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::argument::Argument;
use crate::connection::{Connection, SaveOutcome};
use crate::endpoint::{EndpointLeaf, EndpointType, OpenEndpoint};
use crate::error::{DomainError, DomainResult};
use crate::tree::{Collection, NodeKind, TreeNode};

/// Title prefix probed when naming new connections.
pub const CONNECTION_TITLE_PREFIX: &str = "Connection ";

/// Ordered list of connections. At least one exists once initialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionRegistry {
    connections: Vec<Arc<Connection>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connections: Vec::new(),
        }
    }

    /// Builds a registry from existing connections.
    #[must_use]
    pub fn from_connections(connections: Vec<Connection>) -> Self {
        Self {
            connections: connections.into_iter().map(Arc::new).collect(),
        }
    }

    /// The connections, in tab order.
    #[must_use]
    pub fn connections(&self) -> &[Arc<Connection>] {
        &self.connections
    }

    /// Number of connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns true when no connection exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Finds a connection by title.
    #[must_use]
    pub fn connection(&self, title: &str) -> Option<&Arc<Connection>> {
        self.connections.iter().find(|c| c.title == title)
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.connections.iter().position(|c| c.title == title)
    }

    fn connection_mut(&mut self, title: &str) -> Option<&mut Connection> {
        self.connections
            .iter_mut()
            .find(|c| c.title == title)
            .map(Arc::make_mut)
    }

    fn require_mut(&mut self, title: &str) -> DomainResult<&mut Connection> {
        self.connection_mut(title)
            .ok_or_else(|| DomainError::ConnectionNotFound(title.to_string()))
    }

    // Connections

    /// Seeds `Connection 1` with its default tab when the registry is empty.
    /// Returns true if seeded.
    pub fn initialize(&mut self) -> bool {
        if !self.connections.is_empty() {
            return false;
        }
        self.connections.push(Arc::new(Connection::with_default_tab(format!(
            "{CONNECTION_TITLE_PREFIX}1"
        ))));
        true
    }

    /// Appends a connection titled after the first free `Connection <n>`
    /// and returns that title.
    pub fn add_connection(&mut self) -> String {
        let mut n = 1;
        let title = loop {
            let candidate = format!("{CONNECTION_TITLE_PREFIX}{n}");
            if self.connection(&candidate).is_none() {
                break candidate;
            }
            n += 1;
        };
        self.connections
            .push(Arc::new(Connection::with_default_tab(title.clone())));
        title
    }

    /// Removes the first connection titled `title`. Does nothing while only
    /// one connection remains. Returns true if removed.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionNotFound` if no connection has that title.
    pub fn remove_connection(&mut self, title: &str) -> DomainResult<bool> {
        if self.connections.len() <= 1 {
            return Ok(false);
        }
        let index = self
            .position(title)
            .ok_or_else(|| DomainError::ConnectionNotFound(title.to_string()))?;
        self.connections.remove(index);
        Ok(true)
    }

    /// Replaces every connection, e.g. after the tabs were reordered.
    /// No validation is performed.
    pub fn replace_all(&mut self, connections: Vec<Connection>) {
        *self = Self::from_connections(connections);
    }

    // Workspace tree

    /// Appends a collection to a connection. With `require_peer` set, this
    /// does nothing while only one connection exists. Returns true if added.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionNotFound` if no connection has that title.
    pub fn add_collection(
        &mut self,
        title: &str,
        collection: Collection,
        require_peer: bool,
    ) -> DomainResult<bool> {
        if require_peer && self.connections.len() <= 1 {
            return Ok(false);
        }
        self.require_mut(title)?.add_collection(collection);
        Ok(true)
    }

    /// Removes a connection's collection by position. With `require_peer`
    /// set, this does nothing while only one connection exists.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionNotFound` for an unknown title and
    /// `IndexOutOfBounds` for an invalid index.
    pub fn remove_collection(
        &mut self,
        title: &str,
        index: usize,
        require_peer: bool,
    ) -> DomainResult<Option<Collection>> {
        if require_peer && self.connections.len() <= 1 {
            return Ok(None);
        }
        self.require_mut(title)?.remove_collection(index).map(Some)
    }

    /// See [`Connection::add_element`]. Unknown connections are ignored.
    pub fn add_element<S: AsRef<str>>(
        &mut self,
        title: &str,
        collection_name: &str,
        path: &[S],
        element: TreeNode,
    ) -> Option<String> {
        self.connection_mut(title)?
            .add_element(collection_name, path, element)
    }

    /// See [`Connection::remove_element`]. Unknown connections are ignored.
    pub fn remove_element<S: AsRef<str>>(
        &mut self,
        title: &str,
        collection_name: &str,
        path: &[S],
        element_id: &str,
        kind: NodeKind,
    ) -> Option<TreeNode> {
        self.connection_mut(title)?
            .remove_element(collection_name, path, element_id, kind)
    }

    /// See [`Connection::find_path_indexes`]. Empty for unknown connections.
    #[must_use]
    pub fn find_path_indexes(&self, title: &str, path: &str) -> Vec<usize> {
        self.connection(title)
            .map(|c| c.find_path_indexes(path))
            .unwrap_or_default()
    }

    // Open endpoints

    /// Seeds the default tab of the first connection when it has none.
    /// Any other connection is left alone. Returns true if seeded.
    pub fn initialize_default_tab(&mut self, title: &str) -> bool {
        if self.position(title) != Some(0) {
            return false;
        }
        self.connections
            .first_mut()
            .is_some_and(|c| c.open_endpoints.is_empty() && Arc::make_mut(c).seed_default_tab())
    }

    /// Opens a blank tab and returns its id. Unknown connections are ignored.
    pub fn open_new_tab(&mut self, title: &str) -> Option<String> {
        Some(self.connection_mut(title)?.open_new_tab().id.clone())
    }

    /// Closes a tab. Unknown connections and tabs are ignored.
    pub fn close_tab(&mut self, title: &str, open_endpoint_id: &str) -> Option<OpenEndpoint> {
        self.connection_mut(title)?.close_tab(open_endpoint_id)
    }

    /// Opens a tree leaf as a tab. Returns true if a tab was added.
    pub fn open_from_tree(&mut self, title: &str, leaf: &EndpointLeaf) -> bool {
        self.connection_mut(title)
            .is_some_and(|c| c.open_from_tree(leaf))
    }

    /// Writes a tab's endpoint name and type. Returns true if the tab exists.
    pub fn rename_tab(
        &mut self,
        title: &str,
        open_endpoint_id: &str,
        name: &str,
        endpoint_type: EndpointType,
    ) -> bool {
        self.connection_mut(title)
            .is_some_and(|c| c.rename_tab(open_endpoint_id, name, endpoint_type))
    }

    /// Saves a tab into the tree at the given index chain.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionNotFound`, `InvalidPath` or `IndexOutOfBounds`.
    pub fn save_open_endpoint(
        &mut self,
        title: &str,
        open: &OpenEndpoint,
        chain: &[usize],
    ) -> DomainResult<SaveOutcome> {
        self.require_mut(title)?.save_open_endpoint(open, chain)
    }

    /// Replaces an argument of a tab. Returns false for unknown connections or tabs.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` for an invalid argument index.
    pub fn set_argument(
        &mut self,
        title: &str,
        open_endpoint_id: &str,
        index: usize,
        argument: Argument,
    ) -> DomainResult<bool> {
        match self.connection_mut(title) {
            Some(c) => c.set_argument(open_endpoint_id, index, argument),
            None => Ok(false),
        }
    }

    /// Removes an argument of a tab. `None` for unknown connections or tabs.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` for an invalid argument index.
    pub fn remove_argument(
        &mut self,
        title: &str,
        open_endpoint_id: &str,
        index: usize,
    ) -> DomainResult<Option<Argument>> {
        match self.connection_mut(title) {
            Some(c) => c.remove_argument(open_endpoint_id, index),
            None => Ok(None),
        }
    }
}
