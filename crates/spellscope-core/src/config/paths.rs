//! Settings path resolution helpers.

use std::path::PathBuf;

/// Hidden per-project settings directory.
pub const SETTINGS_DIR: &str = ".vscode";
/// Editor settings file name, inside [`SETTINGS_DIR`] for projects.
pub const SETTINGS_FILE: &str = "settings.json";
/// Workspace-scope settings of a multi-root workspace without an explicit
/// workspace settings file, inside the first root's [`SETTINGS_DIR`].
pub const MULTI_ROOT_WORKSPACE_FILE: &str = "workspace.settings.json";
/// Tool configuration file looked up in the current directory.
pub const TOOL_CONFIG_FILE: &str = "spellscope.toml";

/// Global config directory: `<config_dir>/spellscope`, else `~/.config/spellscope`.
pub fn global_config_dir() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .map(|dir| dir.join("spellscope"))
}
