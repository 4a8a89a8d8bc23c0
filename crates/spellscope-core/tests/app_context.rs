use spellscope_core::config::parse_tool_config;
use spellscope_core::context::AppContext;
use spellscope_core::prelude::*;
use tempfile::TempDir;

#[test]
fn app_context_creates_from_paths() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    let global = temp.path().join("config");

    let ctx = AppContext::new(project.clone(), global.clone(), Default::default());

    assert_eq!(ctx.project_root(), project.as_path());
    assert_eq!(ctx.global_config_dir(), global.as_path());
    assert_eq!(ctx.user_settings_path(), global.join("settings.json"));
    assert_eq!(ctx.workspace().folders.len(), 1);
}

#[tokio::test]
async fn app_context_store_follows_tool_config() {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("app");
    let lib = temp.path().join("lib");
    std::fs::create_dir_all(&app).unwrap();
    std::fs::create_dir_all(&lib).unwrap();
    let user = temp.path().join("user.json");
    let shared = temp.path().join("shared.json");

    let config_path = temp.path().join("spellscope.toml");
    std::fs::write(
        &config_path,
        format!(
            "user_settings = {user:?}\nworkspace_settings = {shared:?}\nfolders = [{app:?}, {lib:?}]\n\n[defaults]\nlanguage = \"en\"\n",
            user = user.display().to_string(),
            shared = shared.display().to_string(),
            app = app.display().to_string(),
            lib = lib.display().to_string(),
        ),
    )
    .unwrap();
    let config = parse_tool_config(&config_path).unwrap();
    let ctx = AppContext::new(app.clone(), temp.path().join("config"), config);
    let store = ctx.settings_store();

    assert_eq!(store.workspace().folders.len(), 2);
    enable_locale(&store, &ConfigTarget::Workspace, "fr").await.unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&shared).unwrap()).unwrap();
    assert_eq!(written["cSpell.language"], "en,fr");
    assert!(!user.exists());
}
