//! Ddpman - Main Entry Point
//!
//! Loads the settings and the persisted workspace, seeds the first
//! connection when the workspace is new, saves it back and prints an
//! outline of every connection.

use std::path::PathBuf;

use ddpman_application::{ConnectionStore, Intent, LoadWorkspace, SaveWorkspace};
use ddpman_domain::ConnectionRegistry;
use ddpman_infrastructure::{
    FileWorkspaceRepository, SettingsRepository, TokioFileSystem, default_workspace_path,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn workspace_path() -> Option<PathBuf> {
    std::env::var_os("DDPMAN_WORKSPACE")
        .map(PathBuf::from)
        .or_else(default_workspace_path)
}

fn outline(registry: &ConnectionRegistry) -> String {
    let mut out = String::new();
    for connection in registry.connections() {
        out.push_str(&format!(
            "{} ({} open)\n",
            connection.title,
            connection.open_endpoints.len()
        ));
        for collection in &connection.collections {
            for line in collection.render_tree().lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }
    }
    out
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Ddpman v{}", env!("CARGO_PKG_VERSION"));

    let settings = SettingsRepository::new().load().await?;
    tracing::info!(server = %settings.server.endpoint_url(), "settings loaded");

    let path = workspace_path().ok_or("no data directory; set DDPMAN_WORKSPACE")?;
    let registry =
        LoadWorkspace::new(FileWorkspaceRepository::new(TokioFileSystem::new()), &path)
            .execute()
            .await?;

    let store = ConnectionStore::new(registry, &settings);
    store.dispatch(Intent::Initialize)?;
    if let Some(first) = store.snapshot().connections().first() {
        store.dispatch(Intent::InitializeDefaultTab {
            title: first.title.clone(),
        })?;
    }

    let snapshot = store.snapshot();
    SaveWorkspace::new(FileWorkspaceRepository::new(TokioFileSystem::new()), &path)
        .execute(&snapshot)
        .await?;

    print!("{}", outline(&snapshot));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddpman_domain::{Connection, EndpointLeaf, EndpointType, Folder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outline_indents_each_collection() {
        let mut connection = Connection::with_default_tab("Connection 1");
        connection.add_collection(
            Folder::new("Col")
                .with_child(EndpointLeaf::new("ping", EndpointType::Method))
                .with_child(Folder::new("Users")),
        );
        let registry = ConnectionRegistry::from_connections(vec![connection]);

        assert_eq!(
            outline(&registry),
            "Connection 1 (1 open)\n  Col/\n    ping (method)\n    Users/\n"
        );
    }
}
