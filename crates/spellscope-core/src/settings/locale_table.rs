//! Locale-by-scope table shown by the info view.

use serde::Serialize;
use url::Url;

use super::keys::LANGUAGE;
use super::locale::LocaleSet;
use crate::error::Result;
use crate::store::{ConfigurationStore, inspect_typed};
use crate::types::Scope;

/// Locale codes the table has rows for.
///
/// Owned by the caller composing the table; rebuilt on every composition.
#[derive(Debug, Clone, Default)]
pub struct KnownLocales {
    codes: Vec<String>,
}

impl KnownLocales {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.codes.clear();
    }

    pub fn remember(&mut self, locales: &LocaleSet) {
        for code in locales.codes() {
            if !self.codes.contains(code) {
                self.codes.push(code.clone());
            }
        }
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleRow {
    pub code: String,
    pub default: bool,
    pub user: bool,
    pub workspace: bool,
    pub folder: bool,
    pub effective: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleTable {
    pub rows: Vec<LocaleRow>,
    /// Effective `language` value and the scope it comes from.
    pub effective: Option<String>,
    pub effective_scope: Option<Scope>,
}

/// Compose the table for `resource`, repopulating `known` from every scope,
/// broadest first.
pub async fn compose_locale_table<S: ConfigurationStore>(
    store: &S,
    resource: Option<&Url>,
    known: &mut KnownLocales,
) -> Result<LocaleTable> {
    let inspect = inspect_typed::<S, String>(store, LANGUAGE, resource).await?;
    let at = |scope: Scope| LocaleSet::parse(inspect.value_at(scope).map_or("", String::as_str));

    let default = at(Scope::Default);
    let user = at(Scope::User);
    let workspace = at(Scope::Workspace);
    let folder = at(Scope::Folder);
    let effective = LocaleSet::parse(inspect.effective().map_or("", String::as_str));

    known.reset();
    for set in [&default, &user, &workspace, &folder] {
        known.remember(set);
    }

    let rows = known
        .codes()
        .iter()
        .map(|code| LocaleRow {
            code: code.clone(),
            default: default.contains(code),
            user: user.contains(code),
            workspace: workspace.contains(code),
            folder: folder.contains(code),
            effective: effective.contains(code),
        })
        .collect();

    Ok(LocaleTable {
        rows,
        effective: inspect.effective().cloned(),
        effective_scope: inspect.effective_scope(),
    })
}
