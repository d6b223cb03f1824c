use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, path: &Path) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        if *print_config {
            print(path)?;
        }
        if *edit_config {
            edit(path, editor.as_deref())?;
        }
    }

    Ok(())
}

fn print(path: &Path) -> AppResult<()> {
    let cfg = Config::load(path)?;
    let yaml =
        serde_yaml::to_string(&cfg.redacted()).map_err(|e| AppError::Config(e.to_string()))?;
    println!("📄 {}:\n", path.display());
    println!("{}", yaml);
    Ok(())
}

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .is_ok_and(|s| s.success())
}

/// Opens the file in `--editor`, falling back to `$EDITOR`/`$VISUAL`/nano.
fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
    if !path.exists() {
        return Err(AppError::ConfigLoad(path.display().to_string()));
    }

    let fallback = default_editor();
    let chosen = editor.unwrap_or(&fallback);

    if run_editor(chosen, path) {
        success(format!("Configuration edited with '{}'", chosen));
        return Ok(());
    }

    if chosen != fallback {
        warning(format!(
            "Editor '{}' not available, falling back to '{}'",
            chosen, fallback
        ));
        if run_editor(&fallback, path) {
            success(format!("Configuration edited with '{}'", fallback));
            return Ok(());
        }
    }

    error(format!("Failed to edit {}", path.display()));
    Ok(())
}
