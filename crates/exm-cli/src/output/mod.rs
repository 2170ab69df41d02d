use serde::Serialize;

use crate::cli::OutputFormat;

pub mod outline;

pub use outline::Outline;

/// Render a response to a string in the requested format.
pub fn render<T: Serialize + Outline>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Outline => Ok(value.outline()),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + Outline>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}
