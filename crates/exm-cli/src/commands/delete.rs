use crate::cli::GlobalFlags;
use crate::cli::root_commands::DeleteArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &DeleteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let selector = args.target.selector()?;
    let report = ctx.service.delete_exam_cascade_by(&selector).await?;
    output(&report, flags.format)
}
