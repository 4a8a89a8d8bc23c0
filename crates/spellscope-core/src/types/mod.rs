//! Shared core types: settings scopes and write targets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// Settings scope levels, ordered by increasing precedence.
///
/// A narrower scope overrides every broader one when values are merged.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Built-in defaults shipped with the extension.
    Default,
    /// User (global) settings.
    User,
    /// Workspace settings.
    Workspace,
    /// Settings of the workspace folder owning a resource.
    Folder,
}

impl Scope {
    /// All scopes from broadest to narrowest.
    pub fn all() -> &'static [Scope] {
        &[Self::Default, Self::User, Self::Workspace, Self::Folder]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Default => "default",
            Scope::User => "user",
            Scope::Workspace => "workspace",
            Scope::Folder => "folder",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a settings write should land.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "target", content = "resource")]
pub enum ConfigTarget {
    /// User settings.
    Global,
    /// Workspace settings.
    Workspace,
    /// Settings of the folder owning `resource`.
    ///
    /// Without a resource there is no folder to resolve, and the target
    /// behaves as [`ConfigTarget::Workspace`].
    WorkspaceFolder(Option<Url>),
}

impl ConfigTarget {
    /// Folder target for a specific resource.
    pub fn folder(resource: Url) -> Self {
        Self::WorkspaceFolder(Some(resource))
    }

    /// Precedence scope the target reads and writes at.
    pub fn scope(&self) -> Scope {
        match self {
            ConfigTarget::Global => Scope::User,
            ConfigTarget::Workspace => Scope::Workspace,
            ConfigTarget::WorkspaceFolder(Some(_)) => Scope::Folder,
            ConfigTarget::WorkspaceFolder(None) => Scope::Workspace,
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, ConfigTarget::Global)
    }

    /// True for the folder tag, with or without a resource.
    pub fn is_folder_level(&self) -> bool {
        matches!(self, ConfigTarget::WorkspaceFolder(_))
    }

    pub fn has_resource(&self) -> bool {
        self.resource().is_some()
    }

    pub fn resource(&self) -> Option<&Url> {
        match self {
            ConfigTarget::WorkspaceFolder(resource) => resource.as_ref(),
            ConfigTarget::Global | ConfigTarget::Workspace => None,
        }
    }
}

impl fmt::Display for ConfigTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigTarget::Global => f.write_str("global"),
            ConfigTarget::Workspace => f.write_str("workspace"),
            ConfigTarget::WorkspaceFolder(Some(uri)) => write!(f, "folder({uri})"),
            ConfigTarget::WorkspaceFolder(None) => f.write_str("folder"),
        }
    }
}

/// Parses the resource-less target tags: `global`/`user`, `workspace`, `folder`.
impl FromStr for ConfigTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" | "user" => Ok(Self::Global),
            "workspace" => Ok(Self::Workspace),
            "folder" => Ok(Self::WorkspaceFolder(None)),
            _ => Err(format!(
                "unknown target: {s}. Use 'global', 'workspace' or 'folder'"
            )),
        }
    }
}

/// Target for "current document" commands.
///
/// A document with a resource resolves to its owning folder; otherwise the
/// caller's `base` target is used unchanged.
pub fn create_target_for_document(base: ConfigTarget, document: Option<&Url>) -> ConfigTarget {
    match document {
        Some(uri) => ConfigTarget::WorkspaceFolder(Some(uri.clone())),
        None => base,
    }
}
