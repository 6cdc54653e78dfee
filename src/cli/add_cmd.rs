//! Handler for the `errcode add` subcommand.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{CodeLabel, Config};
use crate::definition::{is_valid_key, normalize_key, NewEntry, PatchError};
use crate::error::{Error, Result};
use crate::store::DefinitionFile;
use crate::workflow::Session;

use super::output::Output;
use super::prompt::Prompter;
use super::AddArgs;

#[derive(Debug, Serialize)]
struct AddReport {
    key: String,
    code: u64,
    line: usize,
    anchor: u64,
    file: PathBuf,
    dry_run: bool,
}

pub(crate) fn run_add(
    config: &Config,
    file: DefinitionFile,
    args: AddArgs,
    output: &Output,
) -> Result<()> {
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
    add_with(config, file, args, &mut prompter, output)
}

pub(super) fn add_with<R: BufRead, W: Write>(
    config: &Config,
    file: DefinitionFile,
    args: AddArgs,
    prompter: &mut Prompter<R, W>,
    output: &Output,
) -> Result<()> {
    let service = choose(
        prompter,
        args.service,
        "Select a service-level code:",
        &config.service_codes,
        output,
    )?;
    let module = choose(
        prompter,
        args.module,
        "Select a module-level code:",
        &config.module_codes,
        output,
    )?;

    let raw_key = match args.key {
        Some(key) => key,
        None => prompter.line("Error code key: ")?,
    };
    let key = normalize_key(&raw_key);
    if !is_valid_key(&key) {
        return Err(PatchError::InvalidKey { key }.into());
    }

    let session = if args.dry_run {
        Session::preview(file)?
    } else {
        Session::open(file)?
    };
    if session.scaffolded() {
        let verb = if args.dry_run { "would create" } else { "created" };
        output.info(format_args!("{} {}", verb, session.file().path().display()));
    }
    output.detail(format_args!(
        "parsed {} existing entries",
        session.definitions().len()
    ));

    // Checked before asking for messages so nothing is typed in vain
    session.ensure_unique(&key)?;

    let messages = collect_messages(prompter, &config.i18n, args.messages)?;

    let mut request = NewEntry::new(key, service, module).message_option(&config.message_option);
    request.messages = messages;

    let patch = session.add(&request, args.dry_run)?;
    output.detail(format_args!("inserted after code {}", patch.anchor));

    if output.is_json() {
        output.json(&AddReport {
            key: patch.entry.key.clone(),
            code: patch.entry.code,
            line: patch.entry.line,
            anchor: patch.anchor,
            file: session.file().path().to_path_buf(),
            dry_run: args.dry_run,
        });
        return Ok(());
    }

    let text = patch
        .content
        .lines()
        .nth(patch.entry.line - 1)
        .unwrap_or_default()
        .trim();
    if args.dry_run {
        output.plain(text);
        output.info(format_args!(
            "dry run: would insert at line {} of {}",
            patch.entry.line,
            session.file().path().display()
        ));
    } else {
        output.success(format_args!(
            "Added {} = {} to {} (line {})",
            patch.entry.key,
            patch.entry.code,
            session.file().path().display(),
            patch.entry.line
        ));
    }

    Ok(())
}

/// Use the code given on the command line, or ask with a menu
fn choose<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    given: Option<String>,
    title: &str,
    items: &[CodeLabel],
    output: &Output,
) -> Result<String> {
    if let Some(code) = given {
        let code = code.trim().to_string();
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Usage(format!("code `{}` must be digits only", code)));
        }
        if !items.iter().any(|item| item.code == code) {
            output.warning(format_args!("code {} is not listed in the config", code));
        }
        return Ok(code);
    }

    let selection = prompter.select(title, items)?;
    if selection.fell_back {
        output.warning(format_args!("using default `{}`", selection.item.label));
    }
    Ok(selection.item.code.clone())
}

/// One message per configured language; command-line values skip the prompt
pub(super) fn collect_messages<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    languages: &[String],
    given: Vec<(String, String)>,
) -> Result<BTreeMap<String, String>> {
    let mut messages: BTreeMap<String, String> = given.into_iter().collect();

    for lang in languages {
        if messages.contains_key(lang) {
            continue;
        }
        let text = prompter.line(&format!("Message for {}: ", lang))?;
        messages.insert(lang.clone(), text);
    }

    Ok(messages)
}
