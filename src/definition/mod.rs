//! Error definition files
//!
//! This module provides:
//! - Parser (declaration scanning into `Definitions`)
//! - Allocator (next suffix and insertion anchor inside a prefix band)
//! - Builder (entry text)
//! - Patcher (splicing a new entry into existing content)
//! - Scaffold (initial content for a missing file)

pub mod allocator;
pub mod builder;
pub mod parser;
pub mod patcher;
pub mod scaffold;

pub use allocator::{anchor_code, next_code, next_suffix};
pub use builder::build_entry;
pub use parser::parse;
pub use patcher::{patch, Patch};

use miette::Diagnostic;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Width of the sequential part of a code
pub const SUFFIX_WIDTH: usize = 3;

/// Number of codes in one prefix band
pub const BAND_SIZE: u64 = 1000;

/// Largest suffix a band can hold
pub const MAX_SUFFIX: u16 = 999;

/// Default option name used for message attributes
pub const DEFAULT_MESSAGE_OPTION: &str = "errors.msg";

/// A single `KEY = CODE [...]` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeEntry {
    /// Constant name
    pub key: String,
    /// Numeric error code
    pub code: u64,
    /// Line of the declaration (1-indexed)
    pub line: usize,
}

/// Declarations found in a definition file
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    entries: Vec<CodeEntry>,
    by_key: HashMap<String, u64>,
    by_code: BTreeMap<u64, usize>,
}

impl Definitions {
    pub(crate) fn push(&mut self, entry: CodeEntry) {
        self.by_key.insert(entry.key.clone(), entry.code);
        self.by_code.insert(entry.code, entry.line);
        self.entries.push(entry);
    }

    /// All declarations in file order
    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file declared nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the code assigned to a key
    pub fn code_of(&self, key: &str) -> Option<u64> {
        self.by_key.get(key).copied()
    }

    /// Look up the line a code was declared on
    pub fn line_of(&self, code: u64) -> Option<usize> {
        self.by_code.get(&code).copied()
    }

    /// Whether a key is already declared
    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Distinct codes in ascending order
    pub fn codes(&self) -> impl DoubleEndedIterator<Item = u64> + '_ {
        self.by_code.keys().copied()
    }

    /// Distinct codes inside a numeric range, ascending
    pub fn codes_in(&self, range: RangeInclusive<u64>) -> impl DoubleEndedIterator<Item = u64> + '_ {
        self.by_code.range(range).map(|(code, _)| *code)
    }

    /// Declarations of a code, in file order
    pub fn declarations_of(&self, code: u64) -> impl Iterator<Item = &CodeEntry> + '_ {
        self.entries.iter().filter(move |entry| entry.code == code)
    }
}

/// Service and module codes joined into one numeric prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    digits: String,
    value: u64,
}

impl Prefix {
    /// Join a service code and a module code.
    ///
    /// Both parts must be ASCII digits and the joined prefix must leave room for a full band
    /// inside `u64`.
    pub fn new(service: &str, module: &str) -> Result<Self, PatchError> {
        let digits = format!("{}{}", service.trim(), module.trim());
        let invalid = || PatchError::InvalidPrefix {
            service: service.to_string(),
            module: module.to_string(),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let value: u64 = digits.parse().map_err(|_| invalid())?;
        value
            .checked_mul(BAND_SIZE)
            .and_then(|start| start.checked_add(BAND_SIZE - 1))
            .ok_or_else(invalid)?;

        Ok(Self { digits, value })
    }

    /// Prefix as typed
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Numeric prefix value
    pub fn value(&self) -> u64 {
        self.value
    }

    /// First code of the band
    pub fn band_start(&self) -> u64 {
        self.value * BAND_SIZE
    }

    /// Last code of the band
    pub fn band_end(&self) -> u64 {
        self.band_start() + (BAND_SIZE - 1)
    }

    /// Every code belonging to this prefix
    pub fn band(&self) -> RangeInclusive<u64> {
        self.band_start()..=self.band_end()
    }

    /// Full code for a suffix in this band
    pub fn code(&self, suffix: Suffix) -> u64 {
        self.band_start() + u64::from(suffix.value())
    }

    /// Whether a code belongs to this band
    pub fn owns(&self, code: u64) -> bool {
        code / BAND_SIZE == self.value
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits)
    }
}

/// Sequential part of a code, always rendered with three digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Suffix(u16);

impl Suffix {
    /// Create a suffix, rejecting values outside a band
    pub fn new(value: u16) -> Option<Self> {
        (value <= MAX_SUFFIX).then_some(Self(value))
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = SUFFIX_WIDTH)
    }
}

/// A request to add one entry
#[derive(Debug, Clone)]
pub struct NewEntry {
    /// Constant name, already normalized
    pub key: String,
    /// Service-level code
    pub service: String,
    /// Module-level code
    pub module: String,
    /// Message per language tag
    pub messages: BTreeMap<String, String>,
    /// Option name used for message attributes
    pub message_option: String,
}

impl NewEntry {
    pub fn new(key: impl Into<String>, service: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            service: service.into(),
            module: module.into(),
            messages: BTreeMap::new(),
            message_option: DEFAULT_MESSAGE_OPTION.to_string(),
        }
    }

    /// Add a message for a language tag
    pub fn message(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.messages.insert(lang.into(), text.into());
        self
    }

    /// Use a different option name for message attributes
    pub fn message_option(mut self, option: impl Into<String>) -> Self {
        self.message_option = option.into();
        self
    }

    /// Prefix band this entry belongs to
    pub fn prefix(&self) -> Result<Prefix, PatchError> {
        Prefix::new(&self.service, &self.module)
    }
}

/// Normalize raw key input: trimmed, spaces become underscores, upper-cased
pub fn normalize_key(raw: &str) -> String {
    raw.trim().replace(' ', "_").to_uppercase()
}

/// Whether a key can be declared (and found again by the parser)
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

/// Errors raised while computing a patch
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum PatchError {
    #[error("error code key `{key}` already exists (code {code})")]
    #[diagnostic(
        code(errcode::duplicate_key),
        help("choose a different key; existing keys are never overwritten")
    )]
    DuplicateKey { key: String, code: u64 },

    #[error("no declaration found to insert after (anchor code {code})")]
    #[diagnostic(
        code(errcode::anchor_not_found),
        help("the file needs at least one entry at or below the target band")
    )]
    AnchorNotFound { code: u64 },

    #[error("declaration of anchor code {code} has no terminating `;`")]
    #[diagnostic(
        code(errcode::unterminated_anchor),
        help("close the option list with `];` before adding entries after it")
    )]
    UnterminatedAnchor { code: u64 },

    #[error("anchor code {code} is declared {count} times")]
    #[diagnostic(
        code(errcode::ambiguous_anchor),
        help("make each code appear in exactly one declaration")
    )]
    AmbiguousAnchor { code: u64, count: usize },

    #[error("prefix {prefix} has no free codes left")]
    #[diagnostic(code(errcode::out_of_codes), help("use another module code"))]
    OutOfCodes { prefix: String },

    #[error("invalid prefix: service `{service}` and module `{module}` must be digits")]
    #[diagnostic(code(errcode::invalid_prefix))]
    InvalidPrefix { service: String, module: String },

    #[error("invalid key `{key}`")]
    #[diagnostic(
        code(errcode::invalid_key),
        help("keys start with a letter or `_` and contain only letters, digits and `_`")
    )]
    InvalidKey { key: String },
}

#[cfg(test)]
mod tests;
