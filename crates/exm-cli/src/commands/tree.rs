use exm_db::error::{DatabaseError, ErrorStatus};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TreeArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &TreeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let selector = args.target.selector()?;
    let locale = args
        .locale
        .as_deref()
        .unwrap_or(&ctx.config.general.default_locale);

    let tree = ctx
        .service
        .load_exam_tree(&selector, locale)
        .await
        .map_err(with_seed_hint)?;
    output(&tree, flags.format)
}

/// Point at the seeder when the requested exam does not exist.
fn with_seed_hint(error: DatabaseError) -> anyhow::Error {
    if error.status() == ErrorStatus::NotFound {
        anyhow::Error::new(error).context("exam not found. Did you run `exm seed`?")
    } else {
        error.into()
    }
}

#[cfg(test)]
mod tests {
    use exm_core::enums::EntityKind;

    use super::*;

    #[test]
    fn not_found_carries_seed_hint() {
        let error = with_seed_hint(DatabaseError::not_found(EntityKind::Exam, "id=1"));
        let rendered = format!("{error:#}");
        assert!(rendered.starts_with("exam not found. Did you run `exm seed`?"));
        assert!(rendered.contains("exam not found (id=1)"));
    }

    #[test]
    fn other_errors_pass_through() {
        let error = with_seed_hint(DatabaseError::InvariantViolation("x".into()));
        assert_eq!(error.to_string(), "Invariant violation: x");
    }
}
