use super::*;

const JSON_CONFIG: &str = r#"{
  "service_codes": [
    {"code": "10", "label": "common", "desc": "shared errors"},
    {"code": "20", "label": "user", "desc": "user service"}
  ],
  "module_codes": [
    {"code": "0", "label": "general", "desc": "no module"},
    {"code": "1", "label": "auth", "desc": "login and tokens"}
  ],
  "i18n": ["default", "english"],
  "file_path": "proto/errcode/errcode.proto"
}"#;

#[test]
fn test_parse_json_config() {
    let config = Config::parse_json(JSON_CONFIG).unwrap();
    assert_eq!(config.service_codes.len(), 2);
    assert_eq!(config.module_codes[1].label, "auth");
    assert_eq!(config.i18n, vec!["default", "english"]);
    assert_eq!(
        config.file_path,
        PathBuf::from("proto/errcode/errcode.proto")
    );
    assert_eq!(config.message_option, "errors.msg");
    config.validate().unwrap();
}

#[test]
fn test_parse_toml_config() {
    let content = r#"
languages = ["default"]
file_path = "errcode.proto"
message_option = "i18n.text"

[[service_codes]]
code = "30"
label = "order"
description = "order service"

[[module_codes]]
code = "2"
label = "payment"
"#;

    let config = Config::parse_toml(content).unwrap();
    assert_eq!(config.i18n, vec!["default"]);
    assert_eq!(config.service_codes[0].desc, "order service");
    assert_eq!(config.module_codes[0].desc, "");
    assert_eq!(config.message_option, "i18n.text");
}

#[test]
fn test_parse_json_malformed() {
    let result = Config::parse_json("{\"service_codes\": [");
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_validate_rejects_empty_choices() {
    let mut config = Config::parse_json(JSON_CONFIG).unwrap();
    config.module_codes.clear();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_non_digit_codes() {
    let mut config = Config::parse_json(JSON_CONFIG).unwrap();
    config.service_codes[0].code = "1a".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("1a"));
}

#[test]
fn test_validate_rejects_missing_languages() {
    let mut config = Config::parse_json(JSON_CONFIG).unwrap();
    config.i18n.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_load_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("config.json");
    std::fs::write(&json_path, JSON_CONFIG).unwrap();
    assert_eq!(Config::load(&json_path).unwrap().service_codes.len(), 2);

    let toml_path = dir.path().join("errcode.toml");
    std::fs::write(&toml_path, JSON_CONFIG).unwrap();
    match Config::load(&toml_path) {
        Err(ConfigError::Parse { path, .. }) => assert_eq!(path, toml_path),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(&dir.path().join("config.json"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}
