//! Splicing new entries into definition files.
//!
//! The whole patch is computed in memory; the caller decides whether to persist it.

use regex::Regex;

use super::allocator::{anchor_code, next_suffix};
use super::builder::build_entry;
use super::parser::{parse, INLINE_SPACE};
use super::{is_valid_key, CodeEntry, NewEntry, PatchError};

/// Result of inserting one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Full file content with the entry inserted
    pub content: String,
    /// The inserted declaration, with its line in `content`
    pub entry: CodeEntry,
    /// Code of the declaration the entry was inserted after
    pub anchor: u64,
    /// Whether a blank line was added before the entry to open a new band
    pub separated: bool,
}

/// Insert `request` after the highest code of its band.
///
/// Steps run in order and the first failure aborts: duplicate key, prefix and key
/// validation, suffix allocation, anchor lookup, splice.
pub fn patch(content: &str, request: &NewEntry) -> Result<Patch, PatchError> {
    let definitions = parse(content);

    if let Some(code) = definitions.code_of(&request.key) {
        return Err(PatchError::DuplicateKey {
            key: request.key.clone(),
            code,
        });
    }
    if !is_valid_key(&request.key) {
        return Err(PatchError::InvalidKey {
            key: request.key.clone(),
        });
    }

    let prefix = request.prefix()?;
    let suffix = next_suffix(&definitions, &prefix)?;
    let code = prefix.code(suffix);

    let anchor = anchor_code(&definitions, &prefix).ok_or(PatchError::AnchorNotFound { code: 0 })?;
    let declarations: Vec<&CodeEntry> = definitions.declarations_of(anchor).collect();
    let anchor_entry = match declarations.as_slice() {
        [] => return Err(PatchError::AnchorNotFound { code: anchor }),
        [entry] => *entry,
        many => {
            return Err(PatchError::AmbiguousAnchor {
                code: anchor,
                count: many.len(),
            })
        }
    };

    let insertion = insertion_point(content, &anchor_entry.key, anchor)?;
    let separated = !prefix.owns(anchor);
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };

    let mut fragment = String::from(newline);
    if separated {
        fragment.push_str(newline);
    }
    fragment.push_str(&build_entry(
        &request.key,
        code,
        &request.messages,
        &request.message_option,
    ));

    let mut patched = String::with_capacity(content.len() + fragment.len());
    patched.push_str(&content[..insertion.offset]);
    patched.push_str(&fragment);
    patched.push_str(&content[insertion.offset..]);

    Ok(Patch {
        content: patched,
        entry: CodeEntry {
            key: request.key.clone(),
            code,
            line: anchor_entry.line + insertion.spanned + 1 + usize::from(separated),
        },
        anchor,
        separated,
    })
}

/// Where the new entry goes
struct Insertion {
    /// Byte offset of the end of the line holding the anchor's `;` (before any `\r`)
    offset: usize,
    /// Line breaks inside the anchor declaration
    spanned: usize,
}

/// Find the end of the anchor declaration.
///
/// The anchor is matched on its full declaration head, `KEY = CODE [`, so a code that is a
/// substring of another code cannot match. The option list may span several lines; the entry
/// goes after the line that closes it with `;`.
fn insertion_point(content: &str, key: &str, code: u64) -> Result<Insertion, PatchError> {
    let pattern = format!(
        r"(?m)(?:^|;){ws}{}{ws}={ws}{}{ws}\[",
        regex::escape(key),
        code,
        ws = INLINE_SPACE
    );
    let re = Regex::new(&pattern).map_err(|_| PatchError::AnchorNotFound { code })?;

    let mut matches = re.find_iter(content);
    let first = matches.next().ok_or(PatchError::AnchorNotFound { code })?;
    let others = matches.count();
    if others > 0 {
        return Err(PatchError::AmbiguousAnchor {
            code,
            count: others + 1,
        });
    }

    let end = first.end()
        + declaration_end(&content[first.end()..])
            .ok_or(PatchError::UnterminatedAnchor { code })?;
    let spanned = content[first.end()..end].matches('\n').count();

    let line_end = content[end..]
        .find('\n')
        .map_or(content.len(), |i| end + i);
    let offset = if content[..line_end].ends_with('\r') {
        line_end - 1
    } else {
        line_end
    };
    Ok(Insertion { offset, spanned })
}

/// Offset of the `;` closing a declaration, given the text after its opening `[`.
///
/// String literals and comments are skipped. Anything but whitespace or a comment between the
/// closing `]` and the `;` means the declaration is malformed.
fn declaration_end(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices().peekable();
    let mut depth = 1usize;

    while let Some((i, c)) = chars.next() {
        match c {
            '"' | '\'' if depth > 0 => {
                while let Some((_, s)) = chars.next() {
                    match s {
                        '\\' => {
                            chars.next();
                        }
                        '\n' => return None,
                        _ if s == c => break,
                        _ => {}
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '/'))) => {
                for (_, s) in chars.by_ref() {
                    if s == '\n' {
                        break;
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                let mut star = false;
                for (_, s) in chars.by_ref() {
                    if star && s == '/' {
                        break;
                    }
                    star = s == '*';
                }
            }
            '[' if depth > 0 => depth += 1,
            ']' if depth > 0 => depth -= 1,
            ';' if depth == 0 => return Some(i),
            _ if depth == 0 && !c.is_whitespace() => return None,
            _ => {}
        }
    }
    None
}

#[cfg(test)]
#[path = "patcher_tests.rs"]
mod tests;
