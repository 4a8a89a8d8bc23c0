//! Command surface for editor and CLI front ends.
//!
//! Each command names a target and a payload and maps onto one resolver
//! operation. Front ends build a [`SettingsCommand`], execute it against a
//! store and render the returned report.

pub mod info;

use serde::Serialize;

use crate::error::Result;
use crate::settings::{
    LanguageToggle, WordsUpdate, add_ignore_word_to_settings, add_word_to_settings,
    disable_language, disable_locale, enable_language, enable_locale, override_locale,
    remove_word_from_settings,
};
use crate::store::ConfigurationStore;
use crate::types::ConfigTarget;

pub use info::{SettingSummary, info_locale_table, show_setting};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommand {
    EnableLanguage {
        target: ConfigTarget,
        language_id: String,
    },
    DisableLanguage {
        target: ConfigTarget,
        language_id: String,
    },
    EnableLocale {
        target: ConfigTarget,
        locale: String,
    },
    DisableLocale {
        target: ConfigTarget,
        locale: String,
    },
    OverrideLocale {
        target: ConfigTarget,
        enable: bool,
    },
    AddWord {
        target: ConfigTarget,
        word: String,
    },
    AddIgnoreWord {
        target: ConfigTarget,
        word: String,
    },
    RemoveWord {
        target: ConfigTarget,
        word: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandReport {
    Language(LanguageToggle),
    Locale {
        target: ConfigTarget,
        language: Option<String>,
    },
    Words(WordsUpdate),
}

impl SettingsCommand {
    pub fn target(&self) -> &ConfigTarget {
        match self {
            SettingsCommand::EnableLanguage { target, .. }
            | SettingsCommand::DisableLanguage { target, .. }
            | SettingsCommand::EnableLocale { target, .. }
            | SettingsCommand::DisableLocale { target, .. }
            | SettingsCommand::OverrideLocale { target, .. }
            | SettingsCommand::AddWord { target, .. }
            | SettingsCommand::AddIgnoreWord { target, .. }
            | SettingsCommand::RemoveWord { target, .. } => target,
        }
    }

    pub async fn execute<S: ConfigurationStore>(&self, store: &S) -> Result<CommandReport> {
        tracing::debug!(command = ?self, "executing settings command");
        let report = match self {
            SettingsCommand::EnableLanguage {
                target,
                language_id,
            } => CommandReport::Language(enable_language(store, target, language_id).await?),
            SettingsCommand::DisableLanguage {
                target,
                language_id,
            } => CommandReport::Language(disable_language(store, target, language_id).await?),
            SettingsCommand::EnableLocale { target, locale } => CommandReport::Locale {
                target: target.clone(),
                language: enable_locale(store, target, locale).await?,
            },
            SettingsCommand::DisableLocale { target, locale } => CommandReport::Locale {
                target: target.clone(),
                language: disable_locale(store, target, locale).await?,
            },
            SettingsCommand::OverrideLocale { target, enable } => CommandReport::Locale {
                target: target.clone(),
                language: override_locale(store, *enable, target).await?,
            },
            SettingsCommand::AddWord { target, word } => {
                CommandReport::Words(add_word_to_settings(store, target, word).await?)
            }
            SettingsCommand::AddIgnoreWord { target, word } => {
                CommandReport::Words(add_ignore_word_to_settings(store, target, word).await?)
            }
            SettingsCommand::RemoveWord { target, word } => {
                CommandReport::Words(remove_word_from_settings(store, target, word).await?)
            }
        };
        Ok(report)
    }
}
