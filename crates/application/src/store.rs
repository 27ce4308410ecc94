//! Connection store: the single owner of the connection registry.
//!
//! Views read immutable snapshots and send [`Intent`]s. Each intent is
//! applied to a copy of the current registry; the copy replaces the
//! published snapshot only when the intent changed something and returned
//! no error. Connections the intent did not touch keep their `Arc` across
//! snapshots, so views can skip re-rendering them by pointer comparison.

use std::sync::Arc;

use ddpman_domain::{
    Argument, ClientSettings, Collection, ConnectionRegistry, DomainResult, EndpointLeaf,
    EndpointType, NodeKind, OpenEndpoint, SaveOutcome, TreeNode,
};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::ApplicationResult;

/// A request to change the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Seed `Connection 1` when the registry is empty.
    Initialize,
    /// Append a connection with the first free `Connection <n>` title.
    AddConnection,
    /// Remove a connection, unless it is the last one.
    RemoveConnection {
        /// Connection title.
        title: String,
    },
    /// Replace every connection, e.g. after the tabs were reordered.
    ReplaceAll {
        /// The new connection list, unvalidated.
        connections: ConnectionRegistry,
    },
    /// Append a collection to a connection.
    AddCollection {
        /// Connection title.
        title: String,
        /// The new collection.
        collection: Collection,
    },
    /// Remove a collection by position.
    RemoveCollection {
        /// Connection title.
        title: String,
        /// Collection position.
        index: usize,
    },
    /// Append a folder or endpoint below a collection.
    AddElement {
        /// Connection title.
        title: String,
        /// Collection name.
        collection_name: String,
        /// Folder names below the collection.
        path: Vec<String>,
        /// The node to append.
        element: TreeNode,
    },
    /// Remove a folder or endpoint below a collection.
    RemoveElement {
        /// Connection title.
        title: String,
        /// Collection name.
        collection_name: String,
        /// Folder names below the collection.
        path: Vec<String>,
        /// Id of the node to remove.
        element_id: String,
        /// Folder or endpoint; both kinds can share an id.
        kind: NodeKind,
    },
    /// Seed the default tab of the first connection.
    InitializeDefaultTab {
        /// Connection title.
        title: String,
    },
    /// Open a blank tab.
    OpenNewTab {
        /// Connection title.
        title: String,
    },
    /// Close a tab.
    CloseTab {
        /// Connection title.
        title: String,
        /// Tab id.
        open_endpoint_id: String,
    },
    /// Open a saved endpoint as a tab.
    OpenFromTree {
        /// Connection title.
        title: String,
        /// The tree leaf to open.
        leaf: EndpointLeaf,
    },
    /// Set the endpoint name and type of a tab.
    RenameTab {
        /// Connection title.
        title: String,
        /// Tab id.
        open_endpoint_id: String,
        /// Method or publication name.
        name: String,
        /// Method or publication.
        endpoint_type: EndpointType,
    },
    /// Save a tab into the tree.
    SaveOpenEndpoint {
        /// Connection title.
        title: String,
        /// The tab as currently edited.
        open_endpoint: OpenEndpoint,
        /// Target folder: collection index, then folder indexes.
        chain: Vec<usize>,
    },
    /// Replace an argument of a tab.
    SetArgument {
        /// Connection title.
        title: String,
        /// Tab id.
        open_endpoint_id: String,
        /// Argument position.
        index: usize,
        /// The new argument.
        argument: Argument,
    },
    /// Remove an argument of a tab.
    RemoveArgument {
        /// Connection title.
        title: String,
        /// Tab id.
        open_endpoint_id: String,
        /// Argument position.
        index: usize,
    },
}

impl Intent {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::AddConnection => "add_connection",
            Self::RemoveConnection { .. } => "remove_connection",
            Self::ReplaceAll { .. } => "replace_all",
            Self::AddCollection { .. } => "add_collection",
            Self::RemoveCollection { .. } => "remove_collection",
            Self::AddElement { .. } => "add_element",
            Self::RemoveElement { .. } => "remove_element",
            Self::InitializeDefaultTab { .. } => "initialize_default_tab",
            Self::OpenNewTab { .. } => "open_new_tab",
            Self::CloseTab { .. } => "close_tab",
            Self::OpenFromTree { .. } => "open_from_tree",
            Self::RenameTab { .. } => "rename_tab",
            Self::SaveOpenEndpoint { .. } => "save_open_endpoint",
            Self::SetArgument { .. } => "set_argument",
            Self::RemoveArgument { .. } => "remove_argument",
        }
    }
}

/// What a dispatched intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing changed and no snapshot was published.
    Ignored,
    /// The registry changed.
    Updated,
    /// A connection was added under this title.
    ConnectionAdded(String),
    /// A tab was opened with this id.
    TabOpened(String),
    /// A tree element was added with this id.
    ElementAdded(String),
    /// A tab was saved to the tree.
    EndpointSaved(SaveOutcome),
}

impl Effect {
    /// Returns true when a new snapshot was published.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

const fn changed_if(changed: bool) -> Effect {
    if changed { Effect::Updated } else { Effect::Ignored }
}

/// State container for the connection registry.
pub struct ConnectionStore {
    sender: watch::Sender<Arc<ConnectionRegistry>>,
    collections_require_peer: bool,
}

impl ConnectionStore {
    /// Creates a store around an existing registry.
    #[must_use]
    pub fn new(registry: ConnectionRegistry, settings: &ClientSettings) -> Self {
        let (sender, _) = watch::channel(Arc::new(registry));
        Self {
            sender,
            collections_require_peer: settings.collections_require_peer_connection,
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ConnectionRegistry> {
        self.sender.borrow().clone()
    }

    /// Receiver notified on every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<ConnectionRegistry>> {
        self.sender.subscribe()
    }

    /// Applies an intent and publishes a new snapshot if it changed anything.
    ///
    /// # Errors
    ///
    /// Returns bounds errors (`IndexOutOfBounds`, `ConnectionNotFound`) and
    /// `InvalidPath`. The snapshot is left untouched on error.
    pub fn dispatch(&self, intent: Intent) -> ApplicationResult<Effect> {
        let name = intent.name();
        let require_peer = self.collections_require_peer;
        let mut outcome = Ok(Effect::Ignored);

        self.sender.send_if_modified(|current| {
            let mut next = ConnectionRegistry::clone(current);
            outcome = apply(&mut next, intent, require_peer);
            match &outcome {
                Ok(effect) if effect.is_change() => {
                    *current = Arc::new(next);
                    true
                }
                Ok(_) | Err(_) => false,
            }
        });

        match &outcome {
            Ok(Effect::Ignored) => warn!(intent = name, "intent ignored"),
            Ok(effect) => debug!(intent = name, ?effect, "snapshot published"),
            Err(e) => warn!(intent = name, error = %e, "intent rejected"),
        }
        outcome.map_err(Into::into)
    }

    /// Resolves a `/`-delimited path into an index chain for saving.
    #[must_use]
    pub fn find_path_indexes(&self, title: &str, path: &str) -> Vec<usize> {
        self.sender.borrow().find_path_indexes(title, path)
    }

    /// Tab to focus once `open_endpoint_id` is closed.
    #[must_use]
    pub fn closest_tab(&self, title: &str, open_endpoint_id: &str) -> Option<OpenEndpoint> {
        self.sender
            .borrow()
            .connection(title)?
            .closest_tab(open_endpoint_id)
            .cloned()
    }
}

fn apply(registry: &mut ConnectionRegistry, intent: Intent, require_peer: bool) -> DomainResult<Effect> {
    let effect = match intent {
        Intent::Initialize => changed_if(registry.initialize()),
        Intent::AddConnection => Effect::ConnectionAdded(registry.add_connection()),
        Intent::RemoveConnection { title } => changed_if(registry.remove_connection(&title)?),
        Intent::ReplaceAll { connections } => {
            *registry = connections;
            Effect::Updated
        }
        Intent::AddCollection { title, collection } => {
            changed_if(registry.add_collection(&title, collection, require_peer)?)
        }
        Intent::RemoveCollection { title, index } => {
            changed_if(registry.remove_collection(&title, index, require_peer)?.is_some())
        }
        Intent::AddElement {
            title,
            collection_name,
            path,
            element,
        } => registry
            .add_element(&title, &collection_name, path.as_slice(), element)
            .map_or(Effect::Ignored, Effect::ElementAdded),
        Intent::RemoveElement {
            title,
            collection_name,
            path,
            element_id,
            kind,
        } => changed_if(
            registry
                .remove_element(&title, &collection_name, path.as_slice(), &element_id, kind)
                .is_some(),
        ),
        Intent::InitializeDefaultTab { title } => {
            changed_if(registry.initialize_default_tab(&title))
        }
        Intent::OpenNewTab { title } => registry
            .open_new_tab(&title)
            .map_or(Effect::Ignored, Effect::TabOpened),
        Intent::CloseTab {
            title,
            open_endpoint_id,
        } => changed_if(registry.close_tab(&title, &open_endpoint_id).is_some()),
        Intent::OpenFromTree { title, leaf } => {
            if registry.open_from_tree(&title, &leaf) {
                Effect::TabOpened(leaf.id)
            } else {
                Effect::Ignored
            }
        }
        Intent::RenameTab {
            title,
            open_endpoint_id,
            name,
            endpoint_type,
        } => changed_if(registry.rename_tab(&title, &open_endpoint_id, &name, endpoint_type)),
        Intent::SaveOpenEndpoint {
            title,
            open_endpoint,
            chain,
        } => Effect::EndpointSaved(registry.save_open_endpoint(&title, &open_endpoint, &chain)?),
        Intent::SetArgument {
            title,
            open_endpoint_id,
            index,
            argument,
        } => changed_if(registry.set_argument(&title, &open_endpoint_id, index, argument)?),
        Intent::RemoveArgument {
            title,
            open_endpoint_id,
            index,
        } => changed_if(
            registry
                .remove_argument(&title, &open_endpoint_id, index)?
                .is_some(),
        ),
    };
    Ok(effect)
}
