//! Spellscope Core Library
//!
//! Scoped settings resolution for a spell-checking editor extension: which
//! locales, dictionaries and language ids are in effect across the default,
//! user, workspace and folder scopes, and how writes to one scope interact
//! with the others.

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod settings;
pub mod settings_file;
pub mod store;
pub mod types;
pub mod workspace;

pub use error::{Result, SettingsError};

/// Re-exports of commonly used types
pub mod prelude {
    // Scopes and targets
    pub use crate::types::{ConfigTarget, Scope, create_target_for_document};
    pub use crate::workspace::{Workspace, WorkspaceFolder};

    // Stores
    pub use crate::store::{
        ConfigurationStore, Inspect, JsonSettingsStore, MemoryConfigurationStore,
    };

    // Resolver operations
    pub use crate::settings::{
        LocaleSet, add_ignore_word_to_settings, add_word_to_settings, disable_language,
        disable_language_id_in_config, disable_locale, enable_language,
        enable_language_id_in_config, enable_locale, get_scoped_setting,
        inspect_scoped_setting, normalize_locale, override_locale, remove_word_from_settings,
    };

    // Settings file
    pub use crate::settings_file::SettingsFile;

    // Commands
    pub use crate::commands::{CommandReport, SettingsCommand};
    pub use crate::context::AppContext;
    pub use crate::error::{Result, SettingsError};
}
