//! Layered in-memory configuration store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Map, Value};
use url::Url;

use super::{ConfigurationStore, Inspect, WriteLocation, resolve_write_location};
use crate::error::Result;
use crate::types::{ConfigTarget, Scope};
use crate::workspace::Workspace;

#[derive(Debug, Default, Clone)]
struct Layers {
    defaults: Map<String, Value>,
    user: Map<String, Value>,
    workspace: Map<String, Value>,
    folders: HashMap<Url, Map<String, Value>>,
}

/// Configuration store holding every scope in memory.
///
/// Useful for embedding the resolver without a host editor and for tests.
#[derive(Debug, Default)]
pub struct MemoryConfigurationStore {
    workspace: Workspace,
    layers: Mutex<Layers>,
    writes: AtomicUsize,
}

impl MemoryConfigurationStore {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            layers: Mutex::new(Layers::default()),
            writes: AtomicUsize::new(0),
        }
    }

    /// Seed a value at `scope`. Folder values go to the first workspace root.
    ///
    /// # Panics
    ///
    /// Panics when seeding [`Scope::Folder`] while no workspace root is open;
    /// there is no folder to hold the value.
    pub fn with_value(self, scope: Scope, key: &str, value: Value) -> Self {
        if scope == Scope::Folder {
            let Some(root) = self.workspace.first_root() else {
                panic!("cannot seed folder setting '{key}': no workspace root is open");
            };
            let uri = root.uri.clone();
            return self.with_folder_value(&uri, key, value);
        }
        {
            let mut layers = self.lock_layers();
            let layer = match scope {
                Scope::Default => &mut layers.defaults,
                Scope::User => &mut layers.user,
                _ => &mut layers.workspace,
            };
            layer.insert(key.to_string(), value);
        }
        self
    }

    /// Seed a folder-scoped value for the folder at `folder_uri`.
    pub fn with_folder_value(self, folder_uri: &Url, key: &str, value: Value) -> Self {
        self.lock_layers()
            .folders
            .entry(folder_uri.clone())
            .or_default()
            .insert(key.to_string(), value);
        self
    }

    /// Number of `update` calls served so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock_layers(&self) -> MutexGuard<'_, Layers> {
        self.layers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ConfigurationStore for MemoryConfigurationStore {
    fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    async fn inspect(&self, key: &str, resource: Option<&Url>) -> Result<Inspect<Value>> {
        let layers = self.lock_layers().clone();
        let folder = resource.and_then(|r| self.workspace.folder_for(r));

        let mut inspect = Inspect::new(key);
        inspect.default_value = layers.defaults.get(key).cloned();
        inspect.global_value = layers.user.get(key).cloned();
        inspect.workspace_value = layers.workspace.get(key).cloned();
        inspect.workspace_folder_value = folder
            .and_then(|f| layers.folders.get(&f.uri))
            .and_then(|layer| layer.get(key))
            .cloned();
        Ok(inspect)
    }

    async fn update(&self, key: &str, value: Option<Value>, target: &ConfigTarget) -> Result<()> {
        let location = resolve_write_location(&self.workspace, target)?;
        let mut layers = self.lock_layers();
        let layer = match &location {
            WriteLocation::User => &mut layers.user,
            WriteLocation::Workspace => &mut layers.workspace,
            WriteLocation::Folder(folder) => layers.folders.entry(folder.uri.clone()).or_default(),
        };
        match value {
            Some(value) => {
                layer.insert(key.to_string(), value);
            }
            None => {
                layer.remove(key);
            }
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(key, scope = %location.scope(), "updated in-memory setting");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    #[should_panic(expected = "no workspace root is open")]
    fn folder_seed_without_root_panics() {
        let _ = MemoryConfigurationStore::new(Workspace::default()).with_value(
            Scope::Folder,
            "language",
            json!("en"),
        );
    }

    #[test]
    fn folder_seed_lands_in_first_root() {
        let store = MemoryConfigurationStore::new(Workspace::from_paths(["/work/app", "/work/lib"]))
            .with_value(Scope::Folder, "language", json!("en"));

        let layers = store.lock_layers();
        let uri = &store.workspace.folders[0].uri;
        assert_eq!(layers.folders[uri]["language"], json!("en"));
    }
}
