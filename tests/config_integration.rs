use std::path::PathBuf;

use urupemba::config::{ConfigFlags, load_config_flags, parse_flag_tokens};
use urupemba::hotkey::ModKey;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".urupembarc");
    let content = r"
# comment
--no-mouse

--mod-key ctrl

--log-file=edit.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_mouse);
    assert_eq!(flags.mod_key, Some(ModKey::Ctrl));
    assert_eq!(flags.log_file, Some(PathBuf::from("edit.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".urupembarc");
    let content = "--mod-key ctrl\n--history-limit 20\n--document notes.json\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "urupemba".to_string(),
        "--mod-key".to_string(),
        "super".to_string(),
        "--no-mouse".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_mouse, "cli flags should be applied");
    assert_eq!(
        effective.mod_key,
        Some(ModKey::Super),
        "cli should override mod key"
    );
    assert_eq!(effective.history_limit, Some(20));
    assert_eq!(
        effective.document,
        Some(PathBuf::from("notes.json")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "urupemba".to_string(),
        "--mod-key=super".to_string(),
        "--document=draft.json".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.mod_key, Some(ModKey::Super));
    assert_eq!(flags.document, Some(PathBuf::from("draft.json")));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        no_mouse: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&ConfigFlags::default());
    assert!(merged.no_mouse);
    assert!(ConfigFlags::default().union(&file).no_mouse);
}
