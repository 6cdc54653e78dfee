//! Initial content for a definition file that does not exist yet.

use std::collections::BTreeMap;

use super::builder::build_entry;

/// Key of the seed entry
pub const SEED_KEY: &str = "UNKNOWN";

/// Code of the seed entry; every later band anchors on it or something after it
pub const SEED_CODE: u64 = 100_000;

const PREAMBLE: &str = r#"syntax = "proto3";

package errcode;

option go_package = "err/errcode";
import "errors/errors.proto";

enum ErrorCode {
"#;

/// Render a fresh definition file with a single seed entry
pub fn render(message_option: &str) -> String {
    let messages = BTreeMap::from([
        ("default".to_string(), "未知错误".to_string()),
        ("english".to_string(), "unknown error".to_string()),
    ]);

    let mut content = String::from(PREAMBLE);
    content.push_str(&build_entry(SEED_KEY, SEED_CODE, &messages, message_option));
    content.push_str("\n}\n");
    content
}
