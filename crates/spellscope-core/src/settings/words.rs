//! Dictionary word lists in settings.

use std::collections::BTreeSet;

use serde::Serialize;

use super::keys::{IGNORE_WORDS, USER_WORDS, WORDS};
use super::reader::get_scoped_setting;
use crate::error::Result;
use crate::store::{ConfigurationStore, update_typed, write_scope};
use crate::types::ConfigTarget;
use crate::workspace::Workspace;

/// Where a word-list change landed and the resulting list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordsUpdate {
    /// Target actually written, which may differ from the requested one.
    pub target: ConfigTarget,
    pub section: &'static str,
    pub words: Vec<String>,
}

/// Target and section a dictionary word is written to.
///
/// Global requests, and any request while no workspace is open, go to the
/// user's `userWords`. Everything else goes to `words` at the requested
/// target.
pub fn resolve_word_target(
    target: &ConfigTarget,
    workspace: &Workspace,
) -> (ConfigTarget, &'static str) {
    if target.is_global() || !workspace.has_root() {
        (ConfigTarget::Global, USER_WORDS)
    } else {
        (target.clone(), WORDS)
    }
}

/// Add `word` to the dictionary at `target`. Space-separated phrases add
/// each word as its own entry.
pub async fn add_word_to_settings<S: ConfigurationStore>(
    store: &S,
    target: &ConfigTarget,
    word: &str,
) -> Result<WordsUpdate> {
    let (target, section) = resolve_word_target(target, store.workspace());
    let words = update_word_list(store, &target, section, word, Edit::Add).await?;
    Ok(WordsUpdate {
        target,
        section,
        words,
    })
}

/// Remove `word` (or each word of a phrase) from the dictionary at `target`.
pub async fn remove_word_from_settings<S: ConfigurationStore>(
    store: &S,
    target: &ConfigTarget,
    word: &str,
) -> Result<WordsUpdate> {
    let (target, section) = resolve_word_target(target, store.workspace());
    let words = update_word_list(store, &target, section, word, Edit::Remove).await?;
    Ok(WordsUpdate {
        target,
        section,
        words,
    })
}

/// Add `word` to `ignoreWords` at `target`, or at the user scope when no
/// workspace is open.
pub async fn add_ignore_word_to_settings<S: ConfigurationStore>(
    store: &S,
    target: &ConfigTarget,
    word: &str,
) -> Result<WordsUpdate> {
    let target = if store.workspace().has_root() {
        target.clone()
    } else {
        ConfigTarget::Global
    };
    let words = update_word_list(store, &target, IGNORE_WORDS, word, Edit::Add).await?;
    Ok(WordsUpdate {
        target,
        section: IGNORE_WORDS,
        words,
    })
}

#[derive(Debug, Clone, Copy)]
enum Edit {
    Add,
    Remove,
}

/// Split a phrase into dictionary entries.
pub fn split_words(phrase: &str) -> impl Iterator<Item = &str> {
    phrase.split(' ').map(str::trim).filter(|w| !w.is_empty())
}

async fn update_word_list<S: ConfigurationStore>(
    store: &S,
    target: &ConfigTarget,
    section: &str,
    phrase: &str,
    edit: Edit,
) -> Result<Vec<String>> {
    let scope = write_scope(store.workspace(), target)?;
    let current: Vec<String> =
        get_scoped_setting(store, section, scope, target.resource())
            .await?
            .unwrap_or_default();

    let mut words: BTreeSet<String> = current.into_iter().collect();
    for word in split_words(phrase) {
        match edit {
            Edit::Add => {
                words.insert(word.to_string());
            }
            Edit::Remove => {
                words.remove(word);
            }
        }
    }
    let words: Vec<String> = words.into_iter().collect();

    update_typed(store, section, Some(&words), target).await?;
    tracing::info!(%target, section, ?edit, count = words.len(), "updated word list");
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn global_or_rootless_requests_use_user_words() {
        let workspace = Workspace::from_paths(["/work/app"]);
        let folder = ConfigTarget::folder(Url::parse("file:///work/app/a.md").unwrap());

        assert_eq!(
            resolve_word_target(&ConfigTarget::Global, &workspace),
            (ConfigTarget::Global, USER_WORDS)
        );
        assert_eq!(
            resolve_word_target(&folder, &workspace),
            (folder.clone(), WORDS)
        );
        assert_eq!(
            resolve_word_target(&folder, &Workspace::default()),
            (ConfigTarget::Global, USER_WORDS)
        );
    }

    #[test]
    fn split_words_ignores_extra_spaces() {
        let words: Vec<&str> = split_words("  foo  bar ").collect();
        assert_eq!(words, ["foo", "bar"]);
    }
}
