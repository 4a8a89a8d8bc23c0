//! Scoped settings resolution.
//!
//! Every mutation follows the same shape: pick the scope a target maps to,
//! read the current value at that scope (effective or stored, depending on
//! the operation), compute the new value with a pure set or string
//! operation, and write it back to the target. Read-then-write is not
//! transactional; a concurrent external write in between is lost.

pub mod language;
pub mod locale;
pub mod locale_table;
pub mod reader;
pub mod words;

pub use language::{
    CompanionWrite, LanguageToggle, disable_language, disable_language_id_in_config,
    enable_language, enable_language_id_in_config,
};
pub use locale::{
    LocaleSet, disable_locale, enable_locale, normalize_locale, override_locale,
};
pub use locale_table::{KnownLocales, LocaleRow, LocaleTable, compose_locale_table};
pub use reader::{get_scoped_setting, inspect_scoped_setting};
pub use words::{
    WordsUpdate, add_ignore_word_to_settings, add_word_to_settings, remove_word_from_settings,
};

/// Setting keys, relative to [`crate::store::SECTION`].
pub mod keys {
    pub const LANGUAGE: &str = "language";
    pub const ENABLED_LANGUAGE_IDS: &str = "enabledLanguageIds";
    pub const WORDS: &str = "words";
    pub const USER_WORDS: &str = "userWords";
    pub const IGNORE_WORDS: &str = "ignoreWords";
}
