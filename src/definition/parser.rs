//! Declaration scanner for definition files.
//!
//! Only the `KEY = CODE [` head of each declaration is recognized; everything after the
//! bracket (attributes, comments) is left alone.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::{CodeEntry, Definitions};

/// Whitespace allowed inside a declaration head: any Unicode space except line breaks
pub(super) const INLINE_SPACE: &str = r"[^\S\r\n]*";

/// Matches a declaration head at the start of a line or after a `;` on the same line
fn declaration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"(?:^|;){ws}([A-Za-z_][A-Za-z0-9_]*){ws}={ws}([0-9]+){ws}\[",
            ws = INLINE_SPACE
        );
        Regex::new(&pattern).expect("declaration pattern is valid")
    })
}

/// Parse file contents into declarations
pub fn parse(content: &str) -> Definitions {
    let re = declaration_regex();
    let mut definitions = Definitions::default();

    for (index, line) in content.lines().enumerate() {
        for caps in re.captures_iter(line) {
            let Ok(code) = caps[2].parse::<u64>() else {
                continue;
            };
            definitions.push(CodeEntry {
                key: caps[1].to_string(),
                code,
                line: index + 1,
            });
        }
    }

    definitions
}

/// Read and parse a definition file
pub fn parse_file(path: &Path) -> std::io::Result<Definitions> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse(&content))
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
