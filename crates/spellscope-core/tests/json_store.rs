use std::fs;
use std::path::Path;

use serde_json::{Map, Value, json};
use tempfile::TempDir;
use url::Url;

use spellscope_core::prelude::*;
use spellscope_core::settings::keys::{ENABLED_LANGUAGE_IDS, LANGUAGE};

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

struct Fixture {
    _temp: TempDir,
    user: std::path::PathBuf,
    app: std::path::PathBuf,
    lib: std::path::PathBuf,
    workspace_file: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("app");
    let lib = temp.path().join("lib");
    fs::create_dir_all(&app).unwrap();
    fs::create_dir_all(&lib).unwrap();
    Fixture {
        user: temp.path().join("user").join("settings.json"),
        workspace_file: temp.path().join("project.code-workspace.json"),
        app,
        lib,
        _temp: temp,
    }
}

fn multi_root_store(f: &Fixture) -> JsonSettingsStore {
    let mut defaults = Map::new();
    defaults.insert(LANGUAGE.to_string(), json!("en"));
    JsonSettingsStore::new(Workspace::from_paths([&f.app, &f.lib]), f.user.clone())
        .with_defaults(defaults)
        .with_workspace_settings(f.workspace_file.clone())
}

#[tokio::test]
async fn global_write_uses_qualified_key() {
    let f = fixture();
    let store = multi_root_store(&f);

    enable_locale(&store, &ConfigTarget::Global, "fr").await.unwrap();

    let written = read_json(&f.user);
    assert_eq!(written["cSpell.language"], "en,fr");
}

#[tokio::test]
async fn folder_write_targets_owning_root() {
    let f = fixture();
    let store = multi_root_store(&f);
    let document = Url::from_file_path(f.lib.join("src").join("lib.rs")).unwrap();

    enable_language_id_in_config(&store, &ConfigTarget::folder(document.clone()), "rust")
        .await
        .unwrap();

    let folder_file = f.lib.join(".vscode").join("settings.json");
    assert_eq!(read_json(&folder_file)["cSpell.enabledLanguageIds"], json!(["rust"]));
    assert!(!f.app.join(".vscode").exists());
    assert!(!f.workspace_file.exists());

    let inspect = store.inspect(ENABLED_LANGUAGE_IDS, Some(&document)).await.unwrap();
    assert_eq!(inspect.workspace_folder_value, Some(json!(["rust"])));

    let other = Url::from_file_path(f.app.join("main.rs")).unwrap();
    let inspect = store.inspect(ENABLED_LANGUAGE_IDS, Some(&other)).await.unwrap();
    assert_eq!(inspect.workspace_folder_value, None);
}

#[tokio::test]
async fn clearing_value_removes_key_only() {
    let f = fixture();
    fs::write(
        &f.workspace_file,
        r#"{"editor.tabSize": 4, "cSpell.language": "en,de"}"#,
    )
    .unwrap();
    let store = multi_root_store(&f);

    override_locale(&store, false, &ConfigTarget::Workspace)
        .await
        .unwrap();

    let written = read_json(&f.workspace_file);
    assert_eq!(written["editor.tabSize"], 4);
    assert!(written.get("cSpell.language").is_none());
}

#[tokio::test]
async fn clearing_absent_value_does_not_create_file() {
    let f = fixture();
    let store = multi_root_store(&f);

    disable_locale(&store, &ConfigTarget::Workspace, "en").await.unwrap();

    assert!(!f.workspace_file.exists());
}

#[tokio::test]
async fn defaults_show_through_every_scope() {
    let f = fixture();
    let store = multi_root_store(&f);

    let value: Option<String> = get_scoped_setting(&store, LANGUAGE, Scope::Folder, None)
        .await
        .unwrap();
    assert_eq!(value.as_deref(), Some("en"));
}

#[tokio::test]
async fn workspace_write_without_roots_is_rejected() {
    let temp = TempDir::new().unwrap();
    let store = JsonSettingsStore::new(Workspace::default(), temp.path().join("settings.json"));

    let err = enable_locale(&store, &ConfigTarget::Workspace, "en")
        .await
        .unwrap_err();
    assert!(matches!(err, SettingsError::NoWorkspace));
}

#[tokio::test]
async fn invalid_settings_json_is_reported() {
    let f = fixture();
    fs::create_dir_all(f.user.parent().unwrap()).unwrap();
    fs::write(&f.user, "{ broken").unwrap();
    let store = multi_root_store(&f);

    let err = enable_locale(&store, &ConfigTarget::Global, "en")
        .await
        .unwrap_err();
    assert!(matches!(err, SettingsError::InvalidJson { .. }));
}

fn default_multi_root_store(f: &Fixture) -> JsonSettingsStore {
    JsonSettingsStore::new(Workspace::from_paths([&f.app, &f.lib]), f.user.clone())
}

#[tokio::test]
async fn multi_root_workspace_scope_has_its_own_file() {
    let f = fixture();
    let store = default_multi_root_store(&f);

    let workspace_file = store.workspace_settings_path().unwrap();
    assert_ne!(workspace_file, f.app.join(".vscode").join("settings.json"));

    enable_locale(&store, &ConfigTarget::Workspace, "en,fr").await.unwrap();
    let in_app = Url::from_file_path(f.app.join("x.md")).unwrap();
    disable_locale(&store, &ConfigTarget::folder(in_app.clone()), "fr")
        .await
        .unwrap();

    let in_lib = Url::from_file_path(f.lib.join("y.md")).unwrap();
    let seen_from_lib: Option<String> =
        inspect_scoped_setting(&store, LANGUAGE, Scope::Workspace, Some(&in_lib))
            .await
            .unwrap();
    assert_eq!(seen_from_lib.as_deref(), Some("en,fr"));

    let folder: Option<String> =
        inspect_scoped_setting(&store, LANGUAGE, Scope::Folder, Some(&in_app))
            .await
            .unwrap();
    assert_eq!(folder, None);
}

#[tokio::test]
async fn multi_root_folder_override_stays_in_folder() {
    let f = fixture();
    let store = default_multi_root_store(&f);
    enable_locale(&store, &ConfigTarget::Workspace, "en").await.unwrap();
    let in_app = Url::from_file_path(f.app.join("x.md")).unwrap();

    enable_language_id_in_config(&store, &ConfigTarget::folder(in_app.clone()), "rust")
        .await
        .unwrap();
    override_locale(&store, true, &ConfigTarget::folder(in_app.clone()))
        .await
        .unwrap();

    let inspect = store.inspect(LANGUAGE, Some(&in_app)).await.unwrap();
    assert_eq!(inspect.workspace_value, Some(json!("en")));
    assert_eq!(inspect.workspace_folder_value, Some(json!("en")));
    let ids = store.inspect(ENABLED_LANGUAGE_IDS, Some(&in_app)).await.unwrap();
    assert_eq!(ids.workspace_value, None);
    assert_eq!(ids.workspace_folder_value, Some(json!(["rust"])));
}

#[tokio::test]
async fn single_root_workspace_shares_folder_file() {
    let f = fixture();
    let store = JsonSettingsStore::new(Workspace::from_paths([&f.app]), f.user.clone());

    assert_eq!(
        store.workspace_settings_path(),
        Some(f.app.join(".vscode").join("settings.json"))
    );
}

#[tokio::test]
async fn outside_roots_disable_keeps_workspace_file_value() {
    let f = fixture();
    let store = multi_root_store(&f);
    enable_locale(&store, &ConfigTarget::Workspace, "fr").await.unwrap();
    let outside = Url::parse("file:///elsewhere/notes.md").unwrap();

    disable_locale(&store, &ConfigTarget::folder(outside), "de")
        .await
        .unwrap();

    assert_eq!(read_json(&f.workspace_file)["cSpell.language"], "en,fr");
}

#[tokio::test]
async fn non_file_folder_write_is_rejected() {
    let temp = TempDir::new().unwrap();
    let remote = Url::parse("vscode-vfs://github/owner/repo").unwrap();
    let workspace = Workspace::new(vec![WorkspaceFolder {
        name: "repo".to_string(),
        uri: remote.clone(),
    }]);
    let store = JsonSettingsStore::new(workspace, temp.path().join("settings.json"));
    let document = Url::parse("vscode-vfs://github/owner/repo/README.md").unwrap();

    let err = enable_locale(&store, &ConfigTarget::folder(document), "en")
        .await
        .unwrap_err();
    assert!(matches!(err, SettingsError::NotAFileFolder { ref uri } if *uri == remote));

    let err = enable_locale(&store, &ConfigTarget::Workspace, "en")
        .await
        .unwrap_err();
    assert!(matches!(err, SettingsError::NotAFileFolder { .. }));
}
