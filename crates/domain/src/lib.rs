//! Ddpman Domain - Core business types
//!
//! This crate defines the workspace model of the Ddpman Meteor DDP client:
//! connections, their saved collection trees, their open endpoint tabs and
//! the typed call arguments of each endpoint.
//! All types here are pure Rust with no I/O dependencies.

pub mod argument;
pub mod connection;
pub mod document;
pub mod endpoint;
pub mod error;
pub mod id;
pub mod path;
pub mod registry;
pub mod server;
pub mod settings;
pub mod state;
pub mod tree;

pub use argument::{Argument, ArgumentKind, ArgumentList, ArgumentType};
pub use connection::{Connection, SaveOutcome};
pub use document::{CURRENT_SCHEMA_VERSION, WorkspaceDocument};
pub use endpoint::{EndpointLeaf, EndpointType, OpenEndpoint};
pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use registry::ConnectionRegistry;
pub use server::{
    ConnectOptions, ConnectionStatus, Credentials, Protocol, ServerSettings, validate_endpoint,
};
pub use settings::ClientSettings;
pub use state::CallState;
pub use tree::{Collection, Folder, NodeKind, TreeNode, validate_name};
