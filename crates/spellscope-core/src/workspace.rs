//! Open workspace roots and resource-to-folder resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

/// One root folder of the open workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceFolder {
    pub name: String,
    pub uri: Url,
}

impl WorkspaceFolder {
    /// Build a folder from an absolute directory path.
    pub fn from_path(path: &Path) -> Option<Self> {
        let uri = Url::from_file_path(path).ok()?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Some(Self { name, uri })
    }

    /// Filesystem path of the folder, when it is a `file://` folder.
    pub fn path(&self) -> Option<PathBuf> {
        self.uri.to_file_path().ok()
    }

    fn contains(&self, resource: &Url) -> bool {
        let root = self.uri.as_str().trim_end_matches('/');
        let candidate = resource.as_str();
        candidate == root
            || candidate
                .strip_prefix(root)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// The set of open project roots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub folders: Vec<WorkspaceFolder>,
}

impl Workspace {
    pub fn new(folders: Vec<WorkspaceFolder>) -> Self {
        Self { folders }
    }

    /// Workspace from absolute directory paths; relative paths are skipped.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            folders: paths
                .into_iter()
                .filter_map(|p| WorkspaceFolder::from_path(p.as_ref()))
                .collect(),
        }
    }

    pub fn has_root(&self) -> bool {
        !self.folders.is_empty()
    }

    pub fn first_root(&self) -> Option<&WorkspaceFolder> {
        self.folders.first()
    }

    /// Folder owning `resource`. Nested roots resolve to the deepest match.
    pub fn folder_for(&self, resource: &Url) -> Option<&WorkspaceFolder> {
        self.folders
            .iter()
            .filter(|folder| folder.contains(resource))
            .max_by_key(|folder| folder.uri.as_str().trim_end_matches('/').len())
    }
}
