use exm_config::ExamConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SeedArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::seeds;

/// Seeding is a development tool; production databases are never touched.
fn ensure_not_production(config: &ExamConfig) -> anyhow::Result<()> {
    if config.general.is_production() {
        anyhow::bail!(
            "cannot run seeder in production environment (general.environment = '{}')",
            config.general.environment
        );
    }
    Ok(())
}

pub async fn handle(args: &SeedArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ensure_not_production(&ctx.config)?;
    let summary = seeds::run(args.name, &ctx.service).await?;
    output(&summary, flags.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_is_refused() {
        let mut config = ExamConfig::default();
        assert!(ensure_not_production(&config).is_ok());

        config.general.environment = "Production".to_string();
        let err = ensure_not_production(&config).unwrap_err();
        assert!(err.to_string().contains("production"));
    }
}
