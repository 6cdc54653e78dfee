//! Handler for the `errcode next` subcommand.

use serde::Serialize;

use crate::definition::{self, Prefix};
use crate::error::Result;
use crate::store::DefinitionFile;

use super::output::Output;

#[derive(Debug, Serialize)]
struct NextReport {
    prefix: String,
    suffix: String,
    code: u64,
}

pub(crate) fn run_next(
    file: &DefinitionFile,
    service: &str,
    module: &str,
    output: &Output,
) -> Result<()> {
    let prefix = Prefix::new(service, module)?;

    // A missing file is not created here; its scaffold is what `add` would start from
    let snapshot = file.preview()?;
    if snapshot.scaffolded {
        output.detail(format_args!(
            "{} does not exist yet, using the scaffold",
            file.path().display()
        ));
    }

    let definitions = definition::parse(&snapshot.content);
    let suffix = definition::next_suffix(&definitions, &prefix)?;
    let code = prefix.code(suffix);

    if output.is_json() {
        output.json(&NextReport {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            code,
        });
    } else {
        output.plain(code);
    }
    Ok(())
}
