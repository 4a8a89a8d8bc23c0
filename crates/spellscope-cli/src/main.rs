//! Spellscope - scoped spell-checker settings
//!
//! Usage:
//!   spellscope language enable rust --target workspace
//!   spellscope locale disable fr --file src/main.rs
//!   spellscope word add "foo bar"
//!   spellscope show language

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use spellscope_core::commands::{
    CommandReport, SettingSummary, SettingsCommand, info_locale_table, show_setting,
};
use spellscope_core::context::AppContext;
use spellscope_core::settings::{CompanionWrite, LocaleTable};
use spellscope_core::settings_file::{
    add_words_to_settings_file, find_settings_file_location, find_settings_files,
};
use spellscope_core::store::ConfigurationStore;
use spellscope_core::types::{ConfigTarget, create_target_for_document};

#[derive(Parser)]
#[command(name = "spellscope")]
#[command(about = "Scoped spell-checker settings", long_about = None)]
struct Cli {
    /// Tool configuration file (defaults to ./spellscope.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enable or disable spell checking for a language id
    Language {
        #[command(subcommand)]
        action: LanguageAction,
    },

    /// Enable, disable or override dictionary locales
    Locale {
        #[command(subcommand)]
        action: LocaleAction,
    },

    /// Manage dictionary words
    Word {
        #[command(subcommand)]
        action: WordAction,
    },

    /// Show a setting at every scope and its effective value
    Show {
        /// Setting key, e.g. language or enabledLanguageIds
        key: String,
        /// Resolve folder settings for this document
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show which scopes enable each locale
    Locales {
        /// Resolve folder settings for this document
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List project settings files
    Files {
        /// Only search the workspace folder owning this document
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Target scope (global, workspace, folder)
    #[arg(long, short, default_value = "workspace")]
    target: ConfigTarget,

    /// Document the command applies to; selects its workspace folder
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum LanguageAction {
    Enable {
        language_id: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    Disable {
        language_id: String,
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Subcommand)]
enum LocaleAction {
    Enable {
        /// Locale code or comma-separated list
        locale: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    Disable {
        locale: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Copy the inherited locales into the target scope (on) or clear them (off)
    Override {
        state: Toggle,
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Subcommand)]
enum WordAction {
    /// Add a word or space-separated phrase to the dictionary
    Add {
        word: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Add words to the ignore list
    Ignore {
        word: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Remove words from the dictionary
    Remove {
        word: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Add words to the project settings file instead of editor settings
    AddToFile {
        word: String,
        /// Document whose workspace folder selects the settings file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spellscope=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::with_defaults(cli.config.as_deref())?;
    tracing::debug!(
        root = %ctx.project_root().display(),
        folders = ctx.config().folders.len(),
        "loaded context"
    );

    run_cli(&ctx, cli.command, cli.format).await
}

async fn run_cli(ctx: &AppContext, command: Commands, format: OutputFormat) -> Result<()> {
    let store = ctx.settings_store();
    match command {
        Commands::Language { action } => {
            let command = match action {
                LanguageAction::Enable {
                    language_id,
                    target,
                } => SettingsCommand::EnableLanguage {
                    target: resolve_target(ctx, &target)?,
                    language_id,
                },
                LanguageAction::Disable {
                    language_id,
                    target,
                } => SettingsCommand::DisableLanguage {
                    target: resolve_target(ctx, &target)?,
                    language_id,
                },
            };
            run_command(&store, command, format).await
        }
        Commands::Locale { action } => {
            let command = match action {
                LocaleAction::Enable { locale, target } => SettingsCommand::EnableLocale {
                    target: resolve_target(ctx, &target)?,
                    locale,
                },
                LocaleAction::Disable { locale, target } => SettingsCommand::DisableLocale {
                    target: resolve_target(ctx, &target)?,
                    locale,
                },
                LocaleAction::Override { state, target } => SettingsCommand::OverrideLocale {
                    target: resolve_target(ctx, &target)?,
                    enable: matches!(state, Toggle::On),
                },
            };
            run_command(&store, command, format).await
        }
        Commands::Word { action } => {
            let command = match action {
                WordAction::Add { word, target } => SettingsCommand::AddWord {
                    target: resolve_target(ctx, &target)?,
                    word,
                },
                WordAction::Ignore { word, target } => SettingsCommand::AddIgnoreWord {
                    target: resolve_target(ctx, &target)?,
                    word,
                },
                WordAction::Remove { word, target } => SettingsCommand::RemoveWord {
                    target: resolve_target(ctx, &target)?,
                    word,
                },
                WordAction::AddToFile { word, file } => {
                    let uri = file.as_deref().map(|f| document_uri(ctx, f)).transpose()?;
                    return run_add_to_file(&store, uri.as_ref(), &word, format).await;
                }
            };
            run_command(&store, command, format).await
        }
        Commands::Show { key, file } => {
            let uri = file.as_deref().map(|f| document_uri(ctx, f)).transpose()?;
            let summary = show_setting(&store, &key, uri.as_ref()).await?;
            print_summary(&summary, format)
        }
        Commands::Locales { file } => {
            let uri = file.as_deref().map(|f| document_uri(ctx, f)).transpose()?;
            let table = info_locale_table(&store, uri.as_ref()).await?;
            print_locale_table(&table, format)
        }
        Commands::Files { file } => {
            let uri = file.as_deref().map(|f| document_uri(ctx, f)).transpose()?;
            let files = find_settings_files(store.workspace(), uri.as_ref()).await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&files)?),
                OutputFormat::Table => {
                    if files.is_empty() {
                        println!("No settings files found");
                    }
                    for path in files {
                        println!("{}", path.display());
                    }
                }
            }
            Ok(())
        }
    }
}

fn resolve_target(ctx: &AppContext, args: &TargetArgs) -> Result<ConfigTarget> {
    let uri = args
        .file
        .as_deref()
        .map(|f| document_uri(ctx, f))
        .transpose()?;
    Ok(target_for_document(args.target.clone(), uri.as_ref()))
}

/// User settings are not tied to a document, so `--file` only narrows
/// workspace and folder targets.
fn target_for_document(target: ConfigTarget, uri: Option<&Url>) -> ConfigTarget {
    if target.is_global() {
        if let Some(uri) = uri {
            tracing::warn!(%uri, "ignoring --file for a global target");
        }
        return target;
    }
    create_target_for_document(target, uri)
}

fn document_uri(ctx: &AppContext, file: &Path) -> Result<Url> {
    let absolute = if file.is_absolute() {
        file.to_path_buf()
    } else {
        ctx.project_root().join(file)
    };
    Url::from_file_path(&absolute)
        .map_err(|_| anyhow::anyhow!("Not a valid document path: {}", absolute.display()))
}

async fn run_command<S: ConfigurationStore>(
    store: &S,
    command: SettingsCommand,
    format: OutputFormat,
) -> Result<()> {
    let report = command
        .execute(store)
        .await
        .with_context(|| format!("Failed to update settings at {}", command.target()))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_report(&report),
    }
    Ok(())
}

async fn run_add_to_file<S: ConfigurationStore>(
    store: &S,
    uri: Option<&Url>,
    word: &str,
    format: OutputFormat,
) -> Result<()> {
    let path = find_settings_file_location(store.workspace(), uri)
        .await?
        .ok_or_else(|| anyhow::anyhow!("No workspace folder to hold a settings file"))?;
    let words = add_words_to_settings_file(&path, word).await?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "path": path,
                "words": words,
            }))?
        ),
        OutputFormat::Table => {
            println!("Settings file: {}", path.display());
            println!("Words: {}", words.join(", "));
        }
    }
    Ok(())
}

fn print_report(report: &CommandReport) {
    match report {
        CommandReport::Language(toggle) => {
            println!("Enabled language ids: {}", toggle.language_ids.join(", "));
            match &toggle.settings_file {
                CompanionWrite::Skipped => {}
                CompanionWrite::Unchanged { path } => {
                    println!("Settings file unchanged: {}", path.display())
                }
                CompanionWrite::Written { path } => {
                    println!("Settings file updated: {}", path.display())
                }
                CompanionWrite::Failed { path, message } => match path {
                    Some(path) => println!(
                        "Warning: settings file {} not updated: {message}",
                        path.display()
                    ),
                    None => println!("Warning: settings file not updated: {message}"),
                },
            }
        }
        CommandReport::Locale { target, language } => match language {
            Some(language) => println!("Locales at {target}: {language}"),
            None => println!("Locales at {target}: (inherited)"),
        },
        CommandReport::Words(update) => {
            println!("{} at {}: {}", update.section, update.target, update.words.join(", "));
        }
    }
}

fn print_summary(summary: &SettingSummary, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    let inspect = &summary.inspect;
    println!("{}", inspect.key);
    for (label, value) in [
        ("default", &inspect.default_value),
        ("user", &inspect.global_value),
        ("workspace", &inspect.workspace_value),
        ("folder", &inspect.workspace_folder_value),
    ] {
        let rendered = value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {label:<10} {rendered}");
    }
    match (&summary.effective_value, summary.effective_scope) {
        (Some(value), Some(scope)) => println!("  effective  {value} (from {scope})"),
        _ => println!("  effective  -"),
    }
    Ok(())
}

fn print_locale_table(table: &LocaleTable, format: OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(table)?);
        return Ok(());
    }

    let mark = |on: bool| if on { "x" } else { "" };
    println!(
        "{:<10} {:^8} {:^6} {:^10} {:^7} {:^10}",
        "LOCALE", "DEFAULT", "USER", "WORKSPACE", "FOLDER", "EFFECTIVE"
    );
    for row in &table.rows {
        println!(
            "{:<10} {:^8} {:^6} {:^10} {:^7} {:^10}",
            row.code,
            mark(row.default),
            mark(row.user),
            mark(row.workspace),
            mark(row.folder),
            mark(row.effective)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Url {
        Url::parse("file:///work/app/src/main.rs").unwrap()
    }

    #[test]
    fn file_narrows_workspace_target_to_folder() {
        assert_eq!(
            target_for_document(ConfigTarget::Workspace, Some(&document())),
            ConfigTarget::folder(document())
        );
        assert_eq!(
            target_for_document(ConfigTarget::WorkspaceFolder(None), Some(&document())),
            ConfigTarget::folder(document())
        );
    }

    #[test]
    fn file_leaves_global_target_alone() {
        assert_eq!(
            target_for_document(ConfigTarget::Global, Some(&document())),
            ConfigTarget::Global
        );
    }

    #[test]
    fn no_file_keeps_requested_target() {
        assert_eq!(
            target_for_document(ConfigTarget::Workspace, None),
            ConfigTarget::Workspace
        );
    }
}
