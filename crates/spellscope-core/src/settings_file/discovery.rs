//! Locating project settings files under the workspace roots.

use std::path::{Path, PathBuf};

use url::Url;

use crate::config::json_file::file_exists;
use crate::config::paths::SETTINGS_DIR;
use crate::error::Result;
use crate::workspace::{Workspace, WorkspaceFolder};

/// Canonical settings file name.
pub const CONFIG_FILE_NAME: &str = "cspell.json";

/// Relative paths checked under each root, in lookup order: the canonical
/// name and its lowercase form, at the root and in the hidden settings
/// directory. Identical spellings are checked once.
pub fn candidate_paths() -> Vec<PathBuf> {
    let names = [
        CONFIG_FILE_NAME.to_string(),
        CONFIG_FILE_NAME.to_lowercase(),
    ];
    let mut candidates: Vec<PathBuf> = Vec::new();
    let relative = names
        .iter()
        .map(PathBuf::from)
        .chain(names.iter().map(|name| Path::new(SETTINGS_DIR).join(name)));
    for path in relative {
        if !candidates.contains(&path) {
            candidates.push(path);
        }
    }
    candidates
}

fn roots_for<'a>(workspace: &'a Workspace, uri: Option<&Url>) -> Vec<&'a WorkspaceFolder> {
    match uri {
        Some(uri) => workspace.folder_for(uri).into_iter().collect(),
        None => workspace.folders.iter().collect(),
    }
}

/// Every existing settings file under the roots of `workspace`, or only under
/// the root owning `uri` when one is given.
pub async fn find_settings_files(workspace: &Workspace, uri: Option<&Url>) -> Result<Vec<PathBuf>> {
    let candidates = candidate_paths();
    let mut found = Vec::new();
    for root in roots_for(workspace, uri) {
        let Some(root_path) = root.path() else {
            continue;
        };
        for candidate in &candidates {
            let path = root_path.join(candidate);
            if file_exists(&path).await? {
                found.push(path);
            }
        }
    }
    Ok(found)
}

/// The existing settings file with the shortest path.
///
/// Path length stands in for "closest to a root"; in nested multi-root
/// workspaces it can pick a file from a different root than the most
/// specific one. Ties keep lookup order.
pub async fn find_existing_settings_file_location(
    workspace: &Workspace,
    uri: Option<&Url>,
) -> Result<Option<PathBuf>> {
    let found = find_settings_files(workspace, uri).await?;
    let chosen = found
        .into_iter()
        .min_by_key(|path| path.as_os_str().len());
    if let Some(path) = &chosen {
        tracing::debug!(path = %path.display(), "using existing settings file");
    }
    Ok(chosen)
}

/// Existing settings file, else the default location in the first root's
/// hidden settings directory. `None` only when no root is open.
pub async fn find_settings_file_location(
    workspace: &Workspace,
    uri: Option<&Url>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = find_existing_settings_file_location(workspace, uri).await? {
        return Ok(Some(path));
    }
    Ok(workspace
        .first_root()
        .and_then(WorkspaceFolder::path)
        .map(|root| root.join(SETTINGS_DIR).join(CONFIG_FILE_NAME)))
}
