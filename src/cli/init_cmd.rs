//! Handler for the `errcode init` subcommand.

use crate::error::Result;
use crate::store::DefinitionFile;

use super::output::Output;

pub(crate) fn run_init(file: &DefinitionFile, output: &Output) -> Result<()> {
    let created = file.ensure()?;

    if output.is_json() {
        output.json(&serde_json::json!({
            "file": file.path(),
            "created": created,
        }));
    } else if created {
        output.success(format_args!("Created {}", file.path().display()));
        output.plain("  errcode add     # Register the first error code");
        output.plain("  errcode list    # Show defined codes");
    } else {
        output.info(format_args!("{} already exists", file.path().display()));
    }

    Ok(())
}
