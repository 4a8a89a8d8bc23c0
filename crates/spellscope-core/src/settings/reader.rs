//! Effective and per-scope reads.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::Result;
use crate::store::{ConfigurationStore, inspect_typed};
use crate::types::Scope;

/// Value of `key` as an observer at `scope` sees it.
///
/// Walks from `scope` down to the built-in default; the first defined value
/// wins. Scopes narrower than `scope` are never consulted.
pub async fn get_scoped_setting<S, T>(
    store: &S,
    key: &str,
    scope: Scope,
    resource: Option<&Url>,
) -> Result<Option<T>>
where
    S: ConfigurationStore,
    T: DeserializeOwned,
{
    let mut inspect = inspect_typed::<S, T>(store, key, resource).await?;
    let found = Scope::all()
        .iter()
        .rev()
        .copied()
        .filter(|s| *s <= scope)
        .find(|s| inspect.value_at(*s).is_some());
    Ok(found.and_then(|s| take_at(&mut inspect, s)))
}

/// Value stored exactly at `scope`, without inheritance.
pub async fn inspect_scoped_setting<S, T>(
    store: &S,
    key: &str,
    scope: Scope,
    resource: Option<&Url>,
) -> Result<Option<T>>
where
    S: ConfigurationStore,
    T: DeserializeOwned,
{
    let mut inspect = inspect_typed::<S, T>(store, key, resource).await?;
    Ok(take_at(&mut inspect, scope))
}

fn take_at<T>(inspect: &mut crate::store::Inspect<T>, scope: Scope) -> Option<T> {
    match scope {
        Scope::Default => inspect.default_value.take(),
        Scope::User => inspect.global_value.take(),
        Scope::Workspace => inspect.workspace_value.take(),
        Scope::Folder => inspect.workspace_folder_value.take(),
    }
}
