use std::path::Path;

use anyhow::Context;
use exm_config::ExamConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<ExamConfig> {
    load_project_dotenv()?;

    let mut config = ExamConfig::load().context("failed to load examina configuration")?;
    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
        config.validate()?;
    }
    Ok(config)
}

fn load_project_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    // Fall back to a `.env` next to the nearest `.examina` directory above cwd.
    if let Some(root) = find_examina_root(&cwd) {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path).with_context(|| {
                format!("failed to load dotenv file at {}", env_path.display())
            })?;
        }
    }
    Ok(())
}

fn find_examina_root(start: &Path) -> Option<&Path> {
    start
        .ancestors()
        .find(|dir| dir.join(".examina").is_dir())
}
