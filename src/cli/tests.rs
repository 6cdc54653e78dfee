use super::output::{Output, Verbosity};
use super::prompt::Prompter;
use super::*;
use crate::config::CodeLabel;
use crate::definition::{parse, scaffold, PatchError};
use crate::error::Error;
use std::io::Cursor;

fn labels(codes: &[(&str, &str)]) -> Vec<CodeLabel> {
    codes
        .iter()
        .map(|(code, label)| CodeLabel {
            code: code.to_string(),
            label: label.to_string(),
            desc: String::new(),
        })
        .collect()
}

fn config(file_path: PathBuf) -> Config {
    Config {
        service_codes: labels(&[("10", "common"), ("20", "user")]),
        module_codes: labels(&[("0", "general"), ("1", "auth")]),
        i18n: vec!["default".to_string(), "english".to_string()],
        file_path,
        message_option: "errors.msg".to_string(),
    }
}

fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
    Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

fn quiet() -> Output {
    Output::new(Verbosity::Quiet, false)
}

#[test]
fn test_select_blank_picks_first() {
    let items = labels(&[("10", "common"), ("20", "user")]);
    let mut p = prompter("\n");
    let selection = p.select("Pick:", &items).unwrap();
    assert_eq!(selection.item.code, "10");
    assert!(!selection.fell_back);
}

#[test]
fn test_select_by_index() {
    let items = labels(&[("10", "common"), ("20", "user")]);
    let mut p = prompter("1\n");
    assert_eq!(p.select("Pick:", &items).unwrap().item.code, "20");

    let shown = String::from_utf8(p.into_output()).unwrap();
    assert!(shown.contains("0: common"));
    assert!(shown.contains("1: user"));
}

#[test]
fn test_select_invalid_falls_back_with_warning() {
    let items = labels(&[("10", "common"), ("20", "user")]);
    for input in ["7\n", "abc\n", "-1\n"] {
        let mut p = prompter(input);
        let selection = p.select("Pick:", &items).unwrap();
        assert_eq!(selection.item.code, "10");
        assert!(selection.fell_back);
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.contains("Invalid input"));
    }
}

#[test]
fn test_line_at_end_of_input_is_empty() {
    let mut p = prompter("");
    assert_eq!(p.line("Key: ").unwrap(), "");
}

#[test]
fn test_parse_message() {
    assert_eq!(
        parse_message("english=user is banned").unwrap(),
        ("english".to_string(), "user is banned".to_string())
    );
    assert_eq!(
        parse_message("default=a=b").unwrap(),
        ("default".to_string(), "a=b".to_string())
    );
    assert!(parse_message("no separator").is_err());
    assert!(parse_message("=text").is_err());
}

#[test]
fn test_collect_messages_prompts_only_missing() {
    let mut p = prompter("错误\n");
    let languages = vec!["default".to_string(), "english".to_string()];
    let given = vec![("english".to_string(), "error".to_string())];

    let messages = add_cmd::collect_messages(&mut p, &languages, given).unwrap();
    assert_eq!(messages["default"], "错误");
    assert_eq!(messages["english"], "error");

    let shown = String::from_utf8(p.into_output()).unwrap();
    assert!(shown.contains("Message for default"));
    assert!(!shown.contains("Message for english"));
}

#[test]
fn test_add_interactive_on_fresh_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("proto").join("errcode.proto");
    let config = config(path.clone());
    let file = DefinitionFile::new(&path, "errors.msg");

    // service 20, module 0, key, two messages
    let mut p = prompter("1\n\nnew key\n错误\nerror\n");
    add_cmd::add_with(&config, file, AddArgs::default(), &mut p, &quiet()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains(
        "  NEW_KEY = 200001 [(errors.msg) = \"错误\", (errors.msg_english) = \"error\"];"
    ));
    assert_eq!(parse(&content).code_of("NEW_KEY"), Some(200_001));
}

#[test]
fn test_add_with_flags_needs_no_input() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("errcode.proto");
    let config = config(path.clone());
    let args = AddArgs {
        service: Some("20".to_string()),
        module: Some("1".to_string()),
        key: Some("user ban".to_string()),
        messages: vec![
            ("default".to_string(), "用户被禁用".to_string()),
            ("english".to_string(), "user is banned".to_string()),
        ],
        dry_run: false,
    };

    let mut p = prompter("");
    add_cmd::add_with(&config, DefinitionFile::new(&path, "errors.msg"), args, &mut p, &quiet())
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(parse(&content).code_of("USER_BAN"), Some(201_001));
    assert!(p.into_output().is_empty());
}

#[test]
fn test_add_duplicate_key_stops_before_messages() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("errcode.proto");
    let config = config(path.clone());
    let file = DefinitionFile::new(&path, "errors.msg");
    file.ensure().unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let mut p = prompter("\n\nunknown\n");
    let result = add_cmd::add_with(&config, file, AddArgs::default(), &mut p, &quiet());

    assert!(matches!(
        result,
        Err(Error::Patch(PatchError::DuplicateKey { code: 100_000, .. }))
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    let shown = String::from_utf8(p.into_output()).unwrap();
    assert!(!shown.contains("Message for"));
}

#[test]
fn test_add_rejects_invalid_key() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("errcode.proto");
    let config = config(path.clone());

    let mut p = prompter("\n\n42 answers\n");
    let result = add_cmd::add_with(
        &config,
        DefinitionFile::new(&path, "errors.msg"),
        AddArgs::default(),
        &mut p,
        &quiet(),
    );
    assert!(matches!(
        result,
        Err(Error::Patch(PatchError::InvalidKey { .. }))
    ));
    assert!(!path.exists());
}

#[test]
fn test_add_rejects_non_digit_service_flag() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("errcode.proto");
    let config = config(path.clone());
    let args = AddArgs {
        service: Some("user".to_string()),
        ..AddArgs::default()
    };

    let mut p = prompter("");
    let result = add_cmd::add_with(
        &config,
        DefinitionFile::new(&path, "errors.msg"),
        args,
        &mut p,
        &quiet(),
    );
    assert!(matches!(result, Err(Error::Usage(_))));
}

#[test]
fn test_add_dry_run_does_not_write() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("errcode.proto");
    let config = config(path.clone());
    let args = AddArgs {
        service: Some("10".to_string()),
        module: Some("0".to_string()),
        key: Some("PREVIEW".to_string()),
        messages: vec![
            ("default".to_string(), "预览".to_string()),
            ("english".to_string(), "preview".to_string()),
        ],
        dry_run: true,
    };
    std::fs::write(&path, scaffold::render("errors.msg")).unwrap();

    let mut p = prompter("");
    add_cmd::add_with(&config, DefinitionFile::new(&path, "errors.msg"), args, &mut p, &quiet())
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!parse(&content).contains_key("PREVIEW"));
}

#[test]
fn test_add_dry_run_does_not_create_missing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("proto").join("errcode.proto");
    let config = config(path.clone());
    let args = AddArgs {
        service: Some("20".to_string()),
        module: Some("1".to_string()),
        key: Some("user ban".to_string()),
        messages: vec![("default".to_string(), "用户被禁用".to_string())],
        dry_run: true,
    };

    let mut p = prompter("english\n");
    add_cmd::add_with(&config, DefinitionFile::new(&path, "errors.msg"), args, &mut p, &quiet())
        .unwrap();

    assert!(!path.exists());
    assert!(!tmp.path().join("proto").exists());
}

#[test]
fn test_select_entries_filters_band() {
    let definitions = parse("  B = 200002 [];\n  A = 200001 [];\n  C = 201001 [];\n");
    let prefix = crate::definition::Prefix::new("200", "").unwrap();

    let selected = list_cmd::select_entries(definitions.entries(), Some(&prefix));
    let keys: Vec<&str> = selected.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["A", "B"]);

    assert_eq!(list_cmd::select_entries(definitions.entries(), None).len(), 3);
}

#[test]
fn test_cli_parses_add_flags() {
    let cli = Cli::try_parse_from([
        "errcode",
        "--config",
        "errcode.toml",
        "add",
        "--service",
        "20",
        "--message",
        "english=user is banned",
        "--dry-run",
    ])
    .unwrap();

    assert_eq!(cli.config, PathBuf::from("errcode.toml"));
    match cli.command {
        Some(Command::Add(args)) => {
            assert_eq!(args.service.as_deref(), Some("20"));
            assert_eq!(args.messages.len(), 1);
            assert!(args.dry_run);
        }
        other => panic!("expected add, got {:?}", other),
    }
}

#[test]
fn test_cli_defaults_to_add() {
    let cli = Cli::try_parse_from(["errcode"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
}

#[test]
fn test_cli_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["errcode", "-q", "-v", "list"]).is_err());
}
