use anyhow::Context;
use exm_config::ExamConfig;
use exm_db::service::ExamService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: ExamService,
    pub config: ExamConfig,
}

impl AppContext {
    /// Open the configured database and wrap it in a service.
    pub async fn init(config: ExamConfig) -> anyhow::Result<Self> {
        let service = ExamService::new_local(&config.database.path)
            .await
            .with_context(|| {
                format!(
                    "failed to open exam database at '{}'",
                    config.database.path
                )
            })?;
        tracing::debug!(path = %config.database.path, "exam database ready");
        Ok(Self { service, config })
    }
}
