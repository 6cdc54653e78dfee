use super::*;

#[test]
fn test_prefix_joins_service_and_module() {
    let prefix = Prefix::new("20", "0").unwrap();
    assert_eq!(prefix.digits(), "200");
    assert_eq!(prefix.value(), 200);
    assert_eq!(prefix.band(), 200_000..=200_999);
}

#[test]
fn test_prefix_rejects_non_digits() {
    assert!(matches!(
        Prefix::new("2a", "0"),
        Err(PatchError::InvalidPrefix { .. })
    ));
    assert!(matches!(
        Prefix::new("", ""),
        Err(PatchError::InvalidPrefix { .. })
    ));
    assert!(matches!(
        Prefix::new("-1", "0"),
        Err(PatchError::InvalidPrefix { .. })
    ));
}

#[test]
fn test_prefix_rejects_overflowing_band() {
    let result = Prefix::new("99999999999999999", "9");
    assert!(matches!(result, Err(PatchError::InvalidPrefix { .. })));
}

#[test]
fn test_prefix_with_leading_zero_uses_numeric_band() {
    let prefix = Prefix::new("02", "1").unwrap();
    assert_eq!(prefix.value(), 21);
    assert_eq!(prefix.code(Suffix::new(4).unwrap()), 21_004);
    assert!(prefix.owns(21_999));
    assert!(!prefix.owns(22_000));
}

#[test]
fn test_suffix_display_is_zero_padded() {
    assert_eq!(Suffix::new(1).unwrap().to_string(), "001");
    assert_eq!(Suffix::new(42).unwrap().to_string(), "042");
    assert_eq!(Suffix::new(999).unwrap().to_string(), "999");
    assert!(Suffix::new(1000).is_none());
}

#[test]
fn test_normalize_key() {
    assert_eq!(normalize_key("  user not found \n"), "USER_NOT_FOUND");
    assert_eq!(normalize_key("Token_Expired"), "TOKEN_EXPIRED");
}

#[test]
fn test_is_valid_key() {
    assert!(is_valid_key("USER_BAN"));
    assert!(is_valid_key("_PRIVATE2"));
    assert!(!is_valid_key(""));
    assert!(!is_valid_key("2FA_FAILED"));
    assert!(!is_valid_key("BAD-KEY"));
}

#[test]
fn test_new_entry_builder() {
    let entry = NewEntry::new("USER_BAN", "20", "1")
        .message("english", "user is banned")
        .message("default", "用户被禁用")
        .message_option("i18n.text");
    assert_eq!(entry.prefix().unwrap().value(), 201);
    assert_eq!(entry.messages.len(), 2);
    assert_eq!(entry.message_option, "i18n.text");
}
