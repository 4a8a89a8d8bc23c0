//! Configuration-store collaborator.
//!
//! The host editor owns the settings of every scope. The resolver talks to it
//! only through [`ConfigurationStore`]: effective reads, per-scope inspection
//! and scoped writes. Two implementations ship with the crate: a layered
//! in-memory store and a store backed by JSON settings files.

pub mod json;
pub mod memory;

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{Result, SettingsError};
use crate::types::{ConfigTarget, Scope};
use crate::workspace::{Workspace, WorkspaceFolder};

pub use json::JsonSettingsStore;
pub use memory::MemoryConfigurationStore;

/// Section all extension settings live under.
pub const SECTION: &str = "cSpell";

/// A setting as stored at every scope, before any merging.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspect<T> {
    pub key: String,
    pub default_value: Option<T>,
    pub global_value: Option<T>,
    pub workspace_value: Option<T>,
    pub workspace_folder_value: Option<T>,
}

impl<T> Inspect<T> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default_value: None,
            global_value: None,
            workspace_value: None,
            workspace_folder_value: None,
        }
    }

    /// Value stored exactly at `scope`.
    pub fn value_at(&self, scope: Scope) -> Option<&T> {
        match scope {
            Scope::Default => self.default_value.as_ref(),
            Scope::User => self.global_value.as_ref(),
            Scope::Workspace => self.workspace_value.as_ref(),
            Scope::Folder => self.workspace_folder_value.as_ref(),
        }
    }

    pub fn set(&mut self, scope: Scope, value: Option<T>) {
        match scope {
            Scope::Default => self.default_value = value,
            Scope::User => self.global_value = value,
            Scope::Workspace => self.workspace_value = value,
            Scope::Folder => self.workspace_folder_value = value,
        }
    }

    /// Value an observer at `scope` sees: the narrowest defined value at or
    /// below `scope`. Narrower scopes are never consulted.
    pub fn effective_at(&self, scope: Scope) -> Option<&T> {
        Scope::all()
            .iter()
            .rev()
            .filter(|s| **s <= scope)
            .find_map(|s| self.value_at(*s))
    }

    pub fn effective(&self) -> Option<&T> {
        self.effective_at(Scope::Folder)
    }

    /// Scope the effective value comes from.
    pub fn effective_scope(&self) -> Option<Scope> {
        Scope::all()
            .iter()
            .rev()
            .copied()
            .find(|s| self.value_at(*s).is_some())
    }
}

impl Inspect<Value> {
    /// Deserialize every stored value into `T`.
    pub fn typed<T: DeserializeOwned>(self) -> Result<Inspect<T>> {
        let key = self.key;
        let convert = |value: Option<Value>| -> Result<Option<T>> {
            value
                .map(|v| {
                    serde_json::from_value(v).map_err(|source| SettingsError::InvalidValue {
                        key: key.clone(),
                        source,
                    })
                })
                .transpose()
        };
        Ok(Inspect {
            default_value: convert(self.default_value)?,
            global_value: convert(self.global_value)?,
            workspace_value: convert(self.workspace_value)?,
            workspace_folder_value: convert(self.workspace_folder_value)?,
            key: key.clone(),
        })
    }
}

/// Host configuration store.
///
/// Keys are relative to [`SECTION`]. Reads are resolved relative to an
/// optional resource so folder settings of the owning folder apply.
pub trait ConfigurationStore: Send + Sync {
    fn workspace(&self) -> &Workspace;

    /// Every scope's stored value for `key`.
    fn inspect(
        &self,
        key: &str,
        resource: Option<&Url>,
    ) -> impl Future<Output = Result<Inspect<Value>>> + Send;

    /// Store `value` at `target`; `None` removes the key from that scope.
    fn update(
        &self,
        key: &str,
        value: Option<Value>,
        target: &ConfigTarget,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Effective value with every scope merged.
    fn get(
        &self,
        key: &str,
        resource: Option<&Url>,
    ) -> impl Future<Output = Result<Option<Value>>> + Send {
        async move { Ok(self.inspect(key, resource).await?.effective().cloned()) }
    }
}

/// Concrete location a write lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteLocation {
    User,
    Workspace,
    Folder(WorkspaceFolder),
}

impl WriteLocation {
    pub fn scope(&self) -> Scope {
        match self {
            WriteLocation::User => Scope::User,
            WriteLocation::Workspace => Scope::Workspace,
            WriteLocation::Folder(_) => Scope::Folder,
        }
    }
}

/// Map a target onto a writable location of `workspace`.
///
/// Folder targets whose resource has no owning folder fall back to the
/// workspace; workspace writes without an open workspace fail.
pub fn resolve_write_location(
    workspace: &Workspace,
    target: &ConfigTarget,
) -> Result<WriteLocation> {
    match target {
        ConfigTarget::Global => Ok(WriteLocation::User),
        ConfigTarget::Workspace | ConfigTarget::WorkspaceFolder(None) => {
            if workspace.has_root() {
                Ok(WriteLocation::Workspace)
            } else {
                Err(SettingsError::NoWorkspace)
            }
        }
        ConfigTarget::WorkspaceFolder(Some(resource)) => match workspace.folder_for(resource) {
            Some(folder) => Ok(WriteLocation::Folder(folder.clone())),
            None if workspace.has_root() => {
                tracing::debug!(%resource, "resource outside workspace folders, writing workspace settings");
                Ok(WriteLocation::Workspace)
            }
            None => Err(SettingsError::NoWorkspace),
        },
    }
}

/// Scope a write to `target` lands in.
///
/// Differs from [`ConfigTarget::scope`] when a folder resource has no owning
/// root and the write falls back to the workspace. Reads that feed a write
/// use this scope so both sides see the same stored value.
pub fn write_scope(workspace: &Workspace, target: &ConfigTarget) -> Result<Scope> {
    resolve_write_location(workspace, target).map(|location| location.scope())
}

/// Typed effective read.
pub async fn get_typed<S, T>(store: &S, key: &str, resource: Option<&Url>) -> Result<Option<T>>
where
    S: ConfigurationStore,
    T: DeserializeOwned,
{
    store
        .get(key, resource)
        .await?
        .map(|value| {
            serde_json::from_value(value).map_err(|source| SettingsError::InvalidValue {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
}

/// Typed per-scope read.
pub async fn inspect_typed<S, T>(store: &S, key: &str, resource: Option<&Url>) -> Result<Inspect<T>>
where
    S: ConfigurationStore,
    T: DeserializeOwned,
{
    store.inspect(key, resource).await?.typed()
}

/// Serialize and write a typed value.
pub async fn update_typed<S, T>(
    store: &S,
    key: &str,
    value: Option<&T>,
    target: &ConfigTarget,
) -> Result<()>
where
    S: ConfigurationStore,
    T: Serialize + Sync,
{
    let value = value
        .map(|v| {
            serde_json::to_value(v).map_err(|source| SettingsError::InvalidValue {
                key: key.to_string(),
                source,
            })
        })
        .transpose()?;
    store.update(key, value, target).await
}
