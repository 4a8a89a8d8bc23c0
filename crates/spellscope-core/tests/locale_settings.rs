use serde_json::json;
use url::Url;

use spellscope_core::prelude::*;
use spellscope_core::settings::keys::LANGUAGE;

fn workspace() -> Workspace {
    Workspace::from_paths(["/work/app"])
}

fn document() -> Url {
    Url::parse("file:///work/app/README.md").unwrap()
}

async fn stored_at(store: &MemoryConfigurationStore, scope: Scope) -> Option<String> {
    inspect_scoped_setting(store, LANGUAGE, scope, Some(&document()))
        .await
        .unwrap()
}

#[tokio::test]
async fn enabling_locale_twice_is_idempotent() {
    let store = MemoryConfigurationStore::new(workspace());

    enable_locale(&store, &ConfigTarget::Workspace, "en").await.unwrap();
    enable_locale(&store, &ConfigTarget::Workspace, "en").await.unwrap();

    assert_eq!(stored_at(&store, Scope::Workspace).await.as_deref(), Some("en"));
    assert_eq!(store.write_count(), 2);
}

#[tokio::test]
async fn enable_locale_builds_on_inherited_value() {
    let store = MemoryConfigurationStore::new(workspace())
        .with_value(Scope::User, LANGUAGE, json!("en"));

    let value = enable_locale(&store, &ConfigTarget::folder(document()), " FR ")
        .await
        .unwrap();

    assert_eq!(value.as_deref(), Some("en,fr"));
    assert_eq!(stored_at(&store, Scope::Folder).await.as_deref(), Some("en,fr"));
    assert_eq!(stored_at(&store, Scope::User).await.as_deref(), Some("en"));
}

#[tokio::test]
async fn enable_locale_ignores_narrower_scopes() {
    let store = MemoryConfigurationStore::new(workspace())
        .with_value(Scope::User, LANGUAGE, json!("en"))
        .with_value(Scope::Folder, LANGUAGE, json!("de"));

    let value = enable_locale(&store, &ConfigTarget::Workspace, "fr")
        .await
        .unwrap();

    assert_eq!(value.as_deref(), Some("en,fr"));
}

#[tokio::test]
async fn disabling_absent_locale_keeps_value() {
    let store = MemoryConfigurationStore::new(workspace())
        .with_value(Scope::Workspace, LANGUAGE, json!("en,fr"));

    let value = disable_locale(&store, &ConfigTarget::Workspace, "de")
        .await
        .unwrap();

    assert_eq!(value.as_deref(), Some("en,fr"));
    assert_eq!(stored_at(&store, Scope::Workspace).await.as_deref(), Some("en,fr"));
}

#[tokio::test]
async fn disabling_last_locale_clears_override() {
    let store = MemoryConfigurationStore::new(workspace())
        .with_value(Scope::Default, LANGUAGE, json!("en"))
        .with_value(Scope::Workspace, LANGUAGE, json!("en"));

    let value = disable_locale(&store, &ConfigTarget::Workspace, "EN")
        .await
        .unwrap();

    assert_eq!(value, None);
    assert_eq!(stored_at(&store, Scope::Workspace).await, None);
    let effective: Option<String> =
        get_scoped_setting(&store, LANGUAGE, Scope::Workspace, None).await.unwrap();
    assert_eq!(effective.as_deref(), Some("en"));
}

#[tokio::test]
async fn disable_locale_does_not_fork_broader_scope() {
    let store = MemoryConfigurationStore::new(workspace())
        .with_value(Scope::User, LANGUAGE, json!("en,fr"));

    disable_locale(&store, &ConfigTarget::Workspace, "fr")
        .await
        .unwrap();

    assert_eq!(stored_at(&store, Scope::Workspace).await, None);
    assert_eq!(stored_at(&store, Scope::User).await.as_deref(), Some("en,fr"));
}

#[tokio::test]
async fn override_round_trip_restores_inherited_value() {
    let store = MemoryConfigurationStore::new(workspace())
        .with_value(Scope::User, LANGUAGE, json!("en,de"));
    let target = ConfigTarget::folder(document());

    let before: Option<String> = store
        .get(LANGUAGE, Some(&document()))
        .await
        .unwrap()
        .and_then(|v| v.as_str().map(str::to_string));

    let copied = override_locale(&store, true, &target).await.unwrap();
    assert_eq!(copied.as_deref(), Some("en,de"));
    assert_eq!(stored_at(&store, Scope::Folder).await.as_deref(), Some("en,de"));

    let cleared = override_locale(&store, false, &target).await.unwrap();
    assert_eq!(cleared, None);
    assert_eq!(stored_at(&store, Scope::Folder).await, None);

    let after: Option<String> = store
        .get(LANGUAGE, Some(&document()))
        .await
        .unwrap()
        .and_then(|v| v.as_str().map(str::to_string));
    assert_eq!(before, after);
}

#[tokio::test]
async fn normalize_locale_is_stable_for_comparison() {
    assert_eq!(normalize_locale("EN-us, fr"), normalize_locale("en-US,FR "));
}

fn outside_document() -> Url {
    Url::parse("file:///elsewhere/notes.md").unwrap()
}

#[tokio::test]
async fn disable_locale_outside_roots_reads_workspace_value() {
    let store = MemoryConfigurationStore::new(workspace())
        .with_value(Scope::Workspace, LANGUAGE, json!("en,fr"));
    let target = ConfigTarget::folder(outside_document());

    let value = disable_locale(&store, &target, "de").await.unwrap();

    assert_eq!(value.as_deref(), Some("en,fr"));
    assert_eq!(stored_at(&store, Scope::Workspace).await.as_deref(), Some("en,fr"));

    let value = disable_locale(&store, &target, "fr").await.unwrap();
    assert_eq!(value.as_deref(), Some("en"));
}

#[tokio::test]
async fn override_outside_roots_round_trips_at_workspace() {
    let store = MemoryConfigurationStore::new(workspace())
        .with_value(Scope::User, LANGUAGE, json!("en,de"))
        .with_value(Scope::Folder, LANGUAGE, json!("fr"));
    let target = ConfigTarget::folder(outside_document());

    let copied = override_locale(&store, true, &target).await.unwrap();
    assert_eq!(copied.as_deref(), Some("en,de"));
    assert_eq!(stored_at(&store, Scope::Workspace).await.as_deref(), Some("en,de"));

    override_locale(&store, false, &target).await.unwrap();
    assert_eq!(stored_at(&store, Scope::Workspace).await, None);
    assert_eq!(stored_at(&store, Scope::Folder).await.as_deref(), Some("fr"));
}

#[tokio::test]
async fn enable_locale_outside_roots_ignores_folder_values() {
    let store = MemoryConfigurationStore::new(workspace())
        .with_value(Scope::Workspace, LANGUAGE, json!("en"))
        .with_value(Scope::Folder, LANGUAGE, json!("de"));

    let value = enable_locale(&store, &ConfigTarget::folder(outside_document()), "fr")
        .await
        .unwrap();

    assert_eq!(value.as_deref(), Some("en,fr"));
    assert_eq!(stored_at(&store, Scope::Folder).await.as_deref(), Some("de"));
}
