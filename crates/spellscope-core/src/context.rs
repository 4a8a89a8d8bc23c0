//! Application context for unified dependency injection.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::paths::{SETTINGS_FILE, TOOL_CONFIG_FILE, global_config_dir};
use crate::config::{ToolConfig, parse_tool_config};
use crate::store::JsonSettingsStore;
use crate::workspace::Workspace;

/// Unified application context.
///
/// Resolves the workspace roots and settings file locations once; front ends
/// create it at start-up and take the settings store from it.
#[derive(Debug, Clone)]
pub struct AppContext {
    project_root: PathBuf,
    global_config_dir: PathBuf,
    config: ToolConfig,
}

impl AppContext {
    /// Create a context with explicit paths.
    pub fn new(project_root: PathBuf, global_config_dir: PathBuf, config: ToolConfig) -> Self {
        Self {
            project_root,
            global_config_dir,
            config,
        }
    }

    /// Context for the current directory, reading `config_path` or, when
    /// absent, `./spellscope.toml` if it exists.
    pub fn with_defaults(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let project_root =
            std::env::current_dir().context("Could not determine current directory")?;
        let global_config_dir = global_config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config = match config_path {
            Some(path) => parse_tool_config(path)?,
            None => {
                let local = project_root.join(TOOL_CONFIG_FILE);
                if local.exists() {
                    parse_tool_config(&local)?
                } else {
                    ToolConfig::new()
                }
            }
        };

        Ok(Self::new(project_root, global_config_dir, config))
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn global_config_dir(&self) -> &Path {
        &self.global_config_dir
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Configured folders, else the project root as a single-root workspace.
    pub fn workspace(&self) -> Workspace {
        if self.config.folders.is_empty() {
            Workspace::from_paths([&self.project_root])
        } else {
            Workspace::from_paths(&self.config.folders)
        }
    }

    pub fn user_settings_path(&self) -> PathBuf {
        self.config
            .user_settings
            .clone()
            .unwrap_or_else(|| self.global_config_dir.join(SETTINGS_FILE))
    }

    /// Settings store over the resolved workspace.
    pub fn settings_store(&self) -> JsonSettingsStore {
        let store = JsonSettingsStore::new(self.workspace(), self.user_settings_path())
            .with_defaults(self.config.defaults.clone());
        match &self.config.workspace_settings {
            Some(path) => store.with_workspace_settings(path.clone()),
            None => store,
        }
    }
}
