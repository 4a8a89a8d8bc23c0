//! Locale normalization and the `language` setting mutations.

use std::fmt;

use super::keys::LANGUAGE;
use super::reader::{get_scoped_setting, inspect_scoped_setting};
use crate::error::Result;
use crate::store::{ConfigurationStore, update_typed, write_scope};
use crate::types::ConfigTarget;

/// Ordered, de-duplicated list of normalized locale codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleSet(Vec<String>);

impl LocaleSet {
    /// Parse a comma-separated locale list. Entries are trimmed and
    /// lower-cased; empty entries and repeats are dropped, first one wins.
    pub fn parse(input: &str) -> Self {
        let mut set = Self::default();
        set.extend(input);
        set
    }

    /// Append the codes of a comma-separated list not already present.
    pub fn extend(&mut self, input: &str) {
        for code in input.split(',').map(normalize_code) {
            if !code.is_empty() && !self.0.contains(&code) {
                self.0.push(code);
            }
        }
    }

    /// Drop every code listed in the comma-separated `input`.
    pub fn remove(&mut self, input: &str) {
        let removed = Self::parse(input);
        self.0.retain(|code| !removed.contains(code));
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c == code)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn codes(&self) -> &[String] {
        &self.0
    }

    /// Setting value for this set. An empty set clears the override instead
    /// of pinning the scope to "no locales".
    pub fn to_setting(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join(","))
        }
    }
}

impl fmt::Display for LocaleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Canonical form of a comma-separated locale list: trimmed, lower-cased,
/// de-duplicated, order kept.
pub fn normalize_locale(input: &str) -> String {
    LocaleSet::parse(input).to_string()
}

/// Add `locale` to the locales effective at `target`'s scope and store the
/// result at `target`. Enabling an already enabled locale leaves the value
/// unchanged but still writes it.
pub async fn enable_locale<S: ConfigurationStore>(
    store: &S,
    target: &ConfigTarget,
    locale: &str,
) -> Result<Option<String>> {
    let scope = write_scope(store.workspace(), target)?;
    let current: Option<String> =
        get_scoped_setting(store, LANGUAGE, scope, target.resource()).await?;

    let mut locales = LocaleSet::parse(current.as_deref().unwrap_or_default());
    locales.extend(locale);

    let value = locales.to_setting();
    update_typed(store, LANGUAGE, value.as_ref(), target).await?;
    tracing::debug!(%target, locale, value = ?value, "enabled locale");
    Ok(value)
}

/// Remove `locale` from the value stored at `target`'s own scope.
///
/// Inherited values are not consulted, so disabling never forks a broader
/// scope's setting into a narrower override. Removing the last locale clears
/// the scope's value.
pub async fn disable_locale<S: ConfigurationStore>(
    store: &S,
    target: &ConfigTarget,
    locale: &str,
) -> Result<Option<String>> {
    let scope = write_scope(store.workspace(), target)?;
    let stored: Option<String> =
        inspect_scoped_setting(store, LANGUAGE, scope, target.resource()).await?;

    let mut locales = LocaleSet::parse(stored.as_deref().unwrap_or_default());
    locales.remove(&normalize_locale(locale));

    let value = locales.to_setting();
    update_typed(store, LANGUAGE, value.as_ref(), target).await?;
    tracing::debug!(%target, locale, value = ?value, "disabled locale");
    Ok(value)
}

/// Materialize or drop a locale override at `target`.
///
/// With `enable`, the locale value inherited at `target`'s scope is copied
/// verbatim into the scope. Without it, the scope's own value is cleared and
/// the inherited value shows through again.
pub async fn override_locale<S: ConfigurationStore>(
    store: &S,
    enable: bool,
    target: &ConfigTarget,
) -> Result<Option<String>> {
    let scope = write_scope(store.workspace(), target)?;
    let value: Option<String> = if enable {
        get_scoped_setting(store, LANGUAGE, scope, target.resource()).await?
    } else {
        None
    };
    update_typed(store, LANGUAGE, value.as_ref(), target).await?;
    tracing::debug!(%target, enable, value = ?value, "overrode locale");
    Ok(value)
}
