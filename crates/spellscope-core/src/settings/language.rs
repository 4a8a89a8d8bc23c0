//! Enabling and disabling spell checking per programming language.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use url::Url;

use super::keys::ENABLED_LANGUAGE_IDS;
use super::reader::get_scoped_setting;
use crate::error::Result;
use crate::settings_file::{
    SettingsFile, find_existing_settings_file_location, find_settings_file_location,
};
use crate::store::{ConfigurationStore, update_typed, write_scope};
use crate::types::ConfigTarget;

/// Outcome of the best-effort settings-file write that accompanies a
/// folder-level language change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompanionWrite {
    /// Not a folder target with a resource, or no settings file applies.
    Skipped,
    /// The file already had the requested state.
    Unchanged { path: PathBuf },
    Written { path: PathBuf },
    /// The write failed; the configuration store change stands.
    Failed {
        path: Option<PathBuf>,
        message: String,
    },
}

/// Result of [`enable_language`] / [`disable_language`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageToggle {
    /// Enabled language ids now stored at the target, sorted.
    pub language_ids: Vec<String>,
    pub settings_file: CompanionWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toggle {
    Enable,
    Disable,
}

/// Add `language_id` to the enabled ids effective at `target`'s scope and
/// store the sorted, de-duplicated result at `target`.
pub async fn enable_language_id_in_config<S: ConfigurationStore>(
    store: &S,
    target: &ConfigTarget,
    language_id: &str,
) -> Result<Vec<String>> {
    update_language_ids(store, target, language_id, Toggle::Enable).await
}

/// Remove `language_id` from the enabled ids effective at `target`'s scope
/// and store the result at `target`.
pub async fn disable_language_id_in_config<S: ConfigurationStore>(
    store: &S,
    target: &ConfigTarget,
    language_id: &str,
) -> Result<Vec<String>> {
    update_language_ids(store, target, language_id, Toggle::Disable).await
}

async fn update_language_ids<S: ConfigurationStore>(
    store: &S,
    target: &ConfigTarget,
    language_id: &str,
    toggle: Toggle,
) -> Result<Vec<String>> {
    let scope = write_scope(store.workspace(), target)?;
    let current: Vec<String> =
        get_scoped_setting(store, ENABLED_LANGUAGE_IDS, scope, target.resource())
            .await?
            .unwrap_or_default();

    let mut ids: BTreeSet<String> = current.into_iter().collect();
    match toggle {
        Toggle::Enable => {
            ids.insert(language_id.to_string());
        }
        Toggle::Disable => {
            ids.remove(language_id);
        }
    }
    let ids: Vec<String> = ids.into_iter().collect();

    update_typed(store, ENABLED_LANGUAGE_IDS, Some(&ids), target).await?;
    tracing::info!(%target, language_id, ?toggle, "updated enabled language ids");
    Ok(ids)
}

/// Enable `language_id` at `target`, mirroring the change into the project
/// settings file for folder targets.
///
/// The configuration store stays the source of truth: the file write runs
/// after the store write and its failure does not undo it.
pub async fn enable_language<S: ConfigurationStore>(
    store: &S,
    target: &ConfigTarget,
    language_id: &str,
) -> Result<LanguageToggle> {
    let language_ids = enable_language_id_in_config(store, target, language_id).await?;
    let settings_file = match folder_resource(target) {
        Some(resource) => mirror_to_settings_file(store, resource, language_id, Toggle::Enable).await,
        None => CompanionWrite::Skipped,
    };
    Ok(LanguageToggle {
        language_ids,
        settings_file,
    })
}

/// Disable `language_id` at `target`. A missing settings file is left alone.
pub async fn disable_language<S: ConfigurationStore>(
    store: &S,
    target: &ConfigTarget,
    language_id: &str,
) -> Result<LanguageToggle> {
    let language_ids = disable_language_id_in_config(store, target, language_id).await?;
    let settings_file = match folder_resource(target) {
        Some(resource) => {
            mirror_to_settings_file(store, resource, language_id, Toggle::Disable).await
        }
        None => CompanionWrite::Skipped,
    };
    Ok(LanguageToggle {
        language_ids,
        settings_file,
    })
}

fn folder_resource(target: &ConfigTarget) -> Option<&Url> {
    if target.is_folder_level() {
        target.resource()
    } else {
        None
    }
}

async fn mirror_to_settings_file<S: ConfigurationStore>(
    store: &S,
    resource: &Url,
    language_id: &str,
    toggle: Toggle,
) -> CompanionWrite {
    let workspace = store.workspace();
    let path = match toggle {
        Toggle::Enable => find_settings_file_location(workspace, Some(resource)).await,
        Toggle::Disable => find_existing_settings_file_location(workspace, Some(resource)).await,
    };
    let path = match path {
        Ok(Some(path)) => path,
        Ok(None) => return CompanionWrite::Skipped,
        Err(err) => {
            tracing::warn!(error = %err, "settings file lookup failed");
            return CompanionWrite::Failed {
                path: None,
                message: err.to_string(),
            };
        }
    };

    match apply_to_file(&path, language_id, toggle).await {
        Ok(true) => CompanionWrite::Written { path },
        Ok(false) => CompanionWrite::Unchanged { path },
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "failed to update settings file"
            );
            CompanionWrite::Failed {
                path: Some(path),
                message: err.to_string(),
            }
        }
    }
}

async fn apply_to_file(path: &Path, language_id: &str, toggle: Toggle) -> Result<bool> {
    let mut file = SettingsFile::load(path).await?;
    let changed = match toggle {
        Toggle::Enable => file.add_to_list(ENABLED_LANGUAGE_IDS, [language_id])?,
        Toggle::Disable => {
            if !file.exists() {
                return Ok(false);
            }
            file.remove_from_list(ENABLED_LANGUAGE_IDS, [language_id])?
        }
    };
    if changed {
        file.save().await?;
    }
    Ok(changed)
}
