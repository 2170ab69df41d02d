use exm_config::{DEFAULT_DB_PATH, ExamConfig};

/// Emit warnings for env keys that look like configuration but were ignored.
pub fn warn_unconfigured(config: &ExamConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &ExamConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let default_path = config.database.path == DEFAULT_DB_PATH;
    let default_env = config.general.environment == "development";

    let mut warnings = Vec::new();

    if default_path && has_key(&env_keys, "EXAMINA_DATABASE_PATH") {
        warnings.push(
            "database.path is the default while EXAMINA_DATABASE_PATH is set. Use double underscores (EXAMINA_DATABASE__PATH)."
                .to_string(),
        );
    }

    if default_path && has_key(&env_keys, "DB_PATH") {
        warnings.push(
            "DB_PATH is not read by examina. Set EXAMINA_DATABASE__PATH or pass --db."
                .to_string(),
        );
    }

    if default_env && has_key(&env_keys, "EXAMINA_GENERAL_ENVIRONMENT") {
        warnings.push(
            "general.environment is the default while EXAMINA_GENERAL_ENVIRONMENT is set. Use double underscores (EXAMINA_GENERAL__ENVIRONMENT)."
                .to_string(),
        );
    }

    if config.database.is_in_memory() {
        warnings.push(
            "database.path is :memory:. Everything written by this command is discarded on exit."
                .to_string(),
        );
    }

    if default_env && has_key(&env_keys, "APP_ENV") {
        warnings.push(
            "APP_ENV is not read by examina. Set EXAMINA_GENERAL__ENVIRONMENT instead."
                .to_string(),
        );
    }

    warnings
}

fn has_key(keys: &[String], wanted: &str) -> bool {
    keys.iter().any(|key| key == wanted)
}

#[cfg(test)]
mod tests {
    use exm_config::ExamConfig;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_and_legacy_keys() {
        let config = ExamConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("EXAMINA_DATABASE_PATH".to_string(), "x.db".to_string()),
                ("DB_PATH".to_string(), "x.db".to_string()),
                ("EXAMINA_GENERAL_ENVIRONMENT".to_string(), "staging".to_string()),
                ("APP_ENV".to_string(), "production".to_string()),
            ],
        );

        assert_eq!(warnings.len(), 4);
    }

    #[test]
    fn does_not_warn_when_values_are_configured() {
        let mut config = ExamConfig::default();
        config.database.path = "custom.db".to_string();
        config.general.environment = "staging".to_string();

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("DB_PATH".to_string(), "x.db".to_string()),
                ("APP_ENV".to_string(), "production".to_string()),
            ],
        );

        assert!(warnings.is_empty());
    }

    #[test]
    fn warns_when_database_is_in_memory() {
        let mut config = ExamConfig::default();
        config.database.path = exm_config::IN_MEMORY.to_string();

        let warnings = collect_unconfigured_warnings(&config, Vec::new());

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains(":memory:"));
    }
}
