//! Workspace tree: collections, folders and endpoint leaves.
//!
//! Writes coming from tree navigation address folders by name; the
//! "save endpoint" flow addresses them by an index chain. Both walks live
//! here so every traversal matches on [`TreeNode`] exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::endpoint::EndpointLeaf;
use crate::error::{DomainError, DomainResult};

/// Variant of a [`TreeNode`], without its payload.
///
/// Folder and endpoint siblings may share a name and therefore an id, so
/// lookups by id also take the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A folder.
    Directory,
    /// A saved endpoint.
    Endpoint,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => f.write_str("directory"),
            Self::Endpoint => f.write_str("endpoint"),
        }
    }
}

/// A node of the workspace tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    /// A folder of further nodes.
    #[serde(rename = "directory")]
    Directory(Folder),
    /// A saved endpoint.
    Endpoint(EndpointLeaf),
}

impl TreeNode {
    /// Returns the node id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Directory(f) => &f.id,
            Self::Endpoint(e) => &e.id,
        }
    }

    /// Returns the node name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Directory(f) => &f.name,
            Self::Endpoint(e) => &e.name,
        }
    }

    /// Overwrites the node id.
    pub fn set_id(&mut self, id: String) {
        match self {
            Self::Directory(f) => f.id = id,
            Self::Endpoint(e) => e.id = id,
        }
    }

    /// Returns true for folders.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// Variant of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Directory(_) => NodeKind::Directory,
            Self::Endpoint(_) => NodeKind::Endpoint,
        }
    }
}

impl From<Folder> for TreeNode {
    fn from(folder: Folder) -> Self {
        Self::Directory(folder)
    }
}

impl From<EndpointLeaf> for TreeNode {
    fn from(leaf: EndpointLeaf) -> Self {
        Self::Endpoint(leaf)
    }
}

/// A folder. Collections are folders attached directly to a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique id within the connection.
    pub id: String,
    /// Display name, unique among sibling folders by convention only.
    pub name: String,
    /// Child folders and endpoints, in display order.
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

/// Top-level folder directly under a connection.
pub type Collection = Folder;

impl Folder {
    /// Creates an empty folder. The id is assigned on insertion.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Adds a child and returns `self` for chaining.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<TreeNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Finds a direct child folder by name.
    #[must_use]
    pub fn child_folder(&self, name: &str) -> Option<(usize, &Self)> {
        self.children
            .iter()
            .enumerate()
            .find_map(|(i, child)| match child {
                TreeNode::Directory(f) if f.name == name => Some((i, f)),
                TreeNode::Directory(_) | TreeNode::Endpoint(_) => None,
            })
    }

    /// Walks child folders by name and returns the index chain of the
    /// deepest folder reached. Stops at the first unresolved segment.
    #[must_use]
    pub fn folder_indexes_by_names<S: AsRef<str>>(&self, names: &[S]) -> Vec<usize> {
        let mut chain = Vec::with_capacity(names.len());
        let mut folder = self;
        for name in names {
            match folder.child_folder(name.as_ref()) {
                Some((index, child)) => {
                    chain.push(index);
                    folder = child;
                }
                None => break,
            }
        }
        chain
    }

    /// Follows an index chain of child folders.
    #[must_use]
    pub fn folder_at(&self, chain: &[usize]) -> Option<&Self> {
        let mut folder = self;
        for &index in chain {
            match folder.children.get(index) {
                Some(TreeNode::Directory(child)) => folder = child,
                Some(TreeNode::Endpoint(_)) | None => return None,
            }
        }
        Some(folder)
    }

    /// Mutable variant of [`Folder::folder_at`].
    pub fn folder_at_mut(&mut self, chain: &[usize]) -> Option<&mut Self> {
        let mut folder = self;
        for &index in chain {
            match folder.children.get_mut(index) {
                Some(TreeNode::Directory(child)) => folder = child,
                Some(TreeNode::Endpoint(_)) | None => return None,
            }
        }
        Some(folder)
    }

    /// Like [`Folder::folder_at_mut`] but reports where the chain broke.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` when an index is past the end of its
    /// folder or addresses an endpoint instead of a folder.
    pub fn try_folder_at_mut(&mut self, chain: &[usize]) -> DomainResult<&mut Self> {
        let mut folder = self;
        for &index in chain {
            let len = folder.children.len();
            match folder.children.get_mut(index) {
                Some(TreeNode::Directory(child)) => folder = child,
                Some(TreeNode::Endpoint(_)) | None => {
                    return Err(DomainError::out_of_bounds("folder", index, len));
                }
            }
        }
        Ok(folder)
    }

    /// Position of the direct child with the given id and kind.
    #[must_use]
    pub fn position_of(&self, id: &str, kind: NodeKind) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.kind() == kind && child.id() == id)
    }

    /// Returns true if a direct child has this name and node kind.
    #[must_use]
    pub fn has_child_named(&self, name: &str, kind: NodeKind) -> bool {
        self.children
            .iter()
            .any(|child| child.name() == name && child.kind() == kind)
    }

    /// Searches the subtree for an endpoint leaf by id.
    #[must_use]
    pub fn find_leaf(&self, id: &str) -> Option<&EndpointLeaf> {
        self.children.iter().find_map(|child| match child {
            TreeNode::Endpoint(leaf) if leaf.id == id => Some(leaf),
            TreeNode::Endpoint(_) => None,
            TreeNode::Directory(folder) => folder.find_leaf(id),
        })
    }

    /// Number of endpoint leaves in the subtree.
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                TreeNode::Endpoint(_) => 1,
                TreeNode::Directory(folder) => folder.endpoint_count(),
            })
            .sum()
    }

    /// Renders an indented outline of the subtree, one node per line.
    #[must_use]
    pub fn render_tree(&self) -> String {
        let mut out = format!("{}/\n", self.name);
        self.render_children(1, &mut out);
        out
    }

    fn render_children(&self, depth: usize, out: &mut String) {
        for child in &self.children {
            let indent = "  ".repeat(depth);
            match child {
                TreeNode::Directory(folder) => {
                    out.push_str(&format!("{indent}{}/\n", folder.name));
                    folder.render_children(depth + 1, out);
                }
                TreeNode::Endpoint(leaf) => {
                    out.push_str(&format!("{indent}{} ({})\n", leaf.name, leaf.endpoint_type));
                }
            }
        }
    }
}

/// Checks a name entered for a new tree element against its future siblings.
///
/// The tree accepts duplicates; callers run this before inserting.
///
/// # Errors
///
/// Returns `InvalidName` for names shorter than two characters and
/// `DuplicateName` when a sibling of the same kind already uses the name.
pub fn validate_name(parent: &Folder, name: &str, kind: NodeKind) -> DomainResult<()> {
    if name.trim().chars().count() < 2 {
        return Err(DomainError::InvalidName(
            "name must be at least 2 characters".to_string(),
        ));
    }
    if parent.has_child_named(name, kind) {
        return Err(DomainError::DuplicateName(name.to_string()));
    }
    Ok(())
}
