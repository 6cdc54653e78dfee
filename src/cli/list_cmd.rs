//! Handler for the `errcode list` subcommand.

use crate::definition::parser::parse_file;
use crate::definition::{CodeEntry, Prefix};
use crate::error::Result;
use crate::store::{DefinitionFile, StoreError};

use super::output::Output;

pub(crate) fn run_list(file: &DefinitionFile, prefix: Option<&str>, output: &Output) -> Result<()> {
    let definitions = parse_file(file.path()).map_err(|source| StoreError::Read {
        path: file.path().to_path_buf(),
        source,
    })?;
    let band = prefix.map(|digits| Prefix::new(digits, "")).transpose()?;

    let entries = select_entries(definitions.entries(), band.as_ref());

    if output.is_json() {
        output.json(&entries);
        return Ok(());
    }

    if entries.is_empty() {
        output.info("no entries");
        return Ok(());
    }
    for entry in &entries {
        output.plain(format_args!(
            "{:>10}  {:<32} line {}",
            entry.code, entry.key, entry.line
        ));
    }
    output.info(format_args!("{} entries", entries.len()));
    Ok(())
}

/// Entries of one band (or all), ordered by code
pub(super) fn select_entries<'a>(entries: &'a [CodeEntry], band: Option<&Prefix>) -> Vec<&'a CodeEntry> {
    let mut selected: Vec<&CodeEntry> = entries
        .iter()
        .filter(|entry| band.map_or(true, |prefix| prefix.owns(entry.code)))
        .collect();
    selected.sort_by_key(|entry| (entry.code, entry.line));
    selected
}
