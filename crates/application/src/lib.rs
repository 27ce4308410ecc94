//! Ddpman Application - Store, use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The connection store (snapshot read, intent dispatch)
//! - Use case orchestration
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod store;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    Clock, DdpClient, DdpClientError, DdpEvent, FileSystem, FileSystemError, WorkspaceError,
    WorkspaceRepository,
};
pub use store::{ConnectionStore, Effect, Intent};
pub use use_cases::{CallEndpoint, ConnectServer, ConnectServerInput, LoadWorkspace, SaveWorkspace};
