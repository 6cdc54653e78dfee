//! Code allocation inside a prefix band.
//!
//! A band is `prefix * 1000 ..= prefix * 1000 + 999`. Both the next suffix and the insertion
//! anchor are derived from the numeric band, never from the textual form of a code.

use super::{Definitions, PatchError, Prefix, Suffix};

/// Highest code already declared inside the band
pub fn max_in_band(definitions: &Definitions, prefix: &Prefix) -> Option<u64> {
    definitions.codes_in(prefix.band()).next_back()
}

/// Next free suffix for a prefix; 001 for an empty band
pub fn next_suffix(definitions: &Definitions, prefix: &Prefix) -> Result<Suffix, PatchError> {
    let max_suffix = max_in_band(definitions, prefix)
        .map(|code| code - prefix.band_start())
        .unwrap_or(0);

    u16::try_from(max_suffix + 1)
        .ok()
        .and_then(Suffix::new)
        .ok_or_else(|| PatchError::OutOfCodes {
            prefix: prefix.to_string(),
        })
}

/// Next full code for a prefix
pub fn next_code(definitions: &Definitions, prefix: &Prefix) -> Result<u64, PatchError> {
    next_suffix(definitions, prefix).map(|suffix| prefix.code(suffix))
}

/// Code to insert after: the highest code in the band, or else the highest code below it
pub fn anchor_code(definitions: &Definitions, prefix: &Prefix) -> Option<u64> {
    definitions.codes_in(0..=prefix.band_end()).next_back()
}

#[cfg(test)]
#[path = "allocator_tests.rs"]
mod tests;
