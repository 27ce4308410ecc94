//! Use cases for the application layer.

mod call_endpoint;
mod connect_server;
mod load_workspace;
mod save_workspace;

pub use call_endpoint::CallEndpoint;
pub use connect_server::{ConnectServer, ConnectServerInput};
pub use load_workspace::LoadWorkspace;
pub use save_workspace::SaveWorkspace;
