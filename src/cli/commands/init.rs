use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use std::path::Path;

/// Handle the `init` command: write a configuration file with the given
/// credentials, or placeholders to fill in with `config --edit`.
pub fn handle(cmd: &Commands, path: &Path) -> AppResult<()> {
    if let Commands::Init {
        username,
        password,
        worker,
        force,
    } = cmd
    {
        if path.exists() && !*force {
            return Err(AppError::ConfigSave(format!(
                "{} already exists, use --force to overwrite it",
                path.display()
            )));
        }

        let cfg = Config {
            username: username.clone().unwrap_or_else(|| "user@example.com".into()),
            password: password.clone().unwrap_or_else(|| "change-me".into()),
            worker: worker.unwrap_or_default(),
            ..Config::default()
        };
        cfg.save(path)?;

        success(format!("Config file: {}", path.display()));
        if username.is_none() || password.is_none() {
            info("Fill in your credentials with `hrflow config --edit`");
        }
    }

    Ok(())
}
