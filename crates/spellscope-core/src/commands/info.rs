//! Read-only views: per-scope setting summary and the locale table.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::settings::{KnownLocales, LocaleTable, compose_locale_table};
use crate::store::{ConfigurationStore, Inspect};
use crate::types::Scope;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingSummary {
    #[serde(flatten)]
    pub inspect: Inspect<Value>,
    pub effective_value: Option<Value>,
    pub effective_scope: Option<Scope>,
}

/// Every scope's value of `key` plus the merged result.
pub async fn show_setting<S: ConfigurationStore>(
    store: &S,
    key: &str,
    resource: Option<&Url>,
) -> Result<SettingSummary> {
    let inspect = store.inspect(key, resource).await?;
    Ok(SettingSummary {
        effective_value: inspect.effective().cloned(),
        effective_scope: inspect.effective_scope(),
        inspect,
    })
}

/// Locale table for a one-off view with a fresh known-locale context.
pub async fn info_locale_table<S: ConfigurationStore>(
    store: &S,
    resource: Option<&Url>,
) -> Result<LocaleTable> {
    let mut known = KnownLocales::new();
    compose_locale_table(store, resource, &mut known).await
}
