//! Entry text for new declarations.

use std::collections::BTreeMap;

/// Language tag written as the bare message option
pub const DEFAULT_LANGUAGE: &str = "default";

/// Attribute name for a language tag: `(errors.msg)` or `(errors.msg_english)`
pub fn attribute_name(option: &str, lang: &str) -> String {
    if lang == DEFAULT_LANGUAGE {
        format!("({})", option)
    } else {
        format!("({}_{})", option, lang.to_lowercase())
    }
}

/// Escape message text for a double-quoted string literal on a single line
fn escape_message(message: &str) -> String {
    let mut escaped = String::with_capacity(message.len());
    for c in message.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_ascii_control() => escaped.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Build one declaration line (without line terminator).
///
/// Languages come out in lexicographic order because `messages` is a `BTreeMap`.
pub fn build_entry(
    key: &str,
    code: u64,
    messages: &BTreeMap<String, String>,
    option: &str,
) -> String {
    let mut entry = format!("  {} = {} [", key, code);

    for (i, (lang, message)) in messages.iter().enumerate() {
        if i > 0 {
            entry.push_str(", ");
        }
        entry.push_str(&format!(
            "{} = \"{}\"",
            attribute_name(option, lang),
            escape_message(message)
        ));
    }

    entry.push_str("];");
    entry
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
