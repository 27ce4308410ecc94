//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod ddp_client;
mod file_system;
mod workspace_repository;

pub use clock::Clock;
pub use ddp_client::{DdpClient, DdpClientError, DdpEvent};
pub use file_system::{FileSystem, FileSystemError};
pub use workspace_repository::{WorkspaceError, WorkspaceRepository};
