use std::path::PathBuf;

use notefield::config::{
    ConfigError, ConfigFlags, ThemeMode, clear_config_flags, load_config_flags, parse_flag_tokens,
    save_config_flags,
};
use notefield::field::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_LENGTH, TextField};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".notefieldrc");
    let content = r"
# comment
--single-line

--theme light

--debug-log=events.log
--placeholder Jot something down
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.single_line);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.debug_log, Some(PathBuf::from("events.log")));
    assert_eq!(flags.placeholder.as_deref(), Some("Jot something down"));
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_invalid_config_value_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".notefieldrc");
    std::fs::write(&path, "--max-length lots\n").unwrap();

    let err = load_config_flags(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid config"));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".notefieldrc");
    std::fs::write(&path, "--read-only\n--theme light\n--max-length 80\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_flags = parse_flag_tokens(&args(&[
        "notefield",
        "--theme",
        "dark",
        "--autofocus",
    ]))
    .unwrap();

    let effective = file_flags.union(&cli_flags);
    assert!(effective.read_only, "file flags should remain enabled");
    assert!(effective.autofocus, "cli flags should be applied");
    assert_eq!(effective.theme, Some(ThemeMode::Dark), "cli should override theme");
    assert_eq!(
        effective.max_length,
        Some(80),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_save_then_load_preserves_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config");
    let flags = parse_flag_tokens(&args(&[
        "notefield",
        "--placeholder=Title here",
        "--max-length=60",
        "--single-line",
        "--min-height",
        "4",
        "--max-height",
        "9",
    ]))
    .unwrap();

    save_config_flags(&path, &flags).unwrap();
    assert_eq!(load_config_flags(&path).unwrap(), flags);

    clear_config_flags(&path).unwrap();
    assert!(!path.exists());
}

#[test]
fn test_value_flag_is_never_persisted() {
    let flags = parse_flag_tokens(&args(&["notefield", "--value", "--perf"])).unwrap();
    assert!(!flags.perf, "the argument of --value is not a flag");
}

#[test]
fn test_flags_build_field_options() {
    let flags = parse_flag_tokens(&args(&[
        "notefield",
        "--single-line",
        "--no-counts",
        "--max-length",
        "20",
    ]))
    .unwrap();
    let options = flags.to_field_options(Some("hello")).unwrap();
    assert!(!options.multiline);
    assert!(!options.show_counts);
    assert_eq!(options.max_length, Some(20));

    let field = TextField::new(options);
    assert_eq!(field.value(), "hello");
    assert_eq!(field.height(), 3);
}

#[test]
fn test_default_flags_use_default_options() {
    let options = ConfigFlags::default().to_field_options(None).unwrap();
    assert_eq!(options.max_length, Some(DEFAULT_MAX_LENGTH));
    assert_eq!(options.max_height, DEFAULT_MAX_HEIGHT);
    assert!(options.multiline);
    assert!(options.editable);
}

#[test]
fn test_bad_height_bounds_are_rejected() {
    let inverted = parse_flag_tokens(&args(&["notefield", "--min-height=8", "--max-height=4"]))
        .unwrap()
        .to_field_options(None);
    assert_eq!(inverted.unwrap_err(), ConfigError::InvertedHeights { min: 8, max: 4 });

    let tiny = parse_flag_tokens(&args(&["notefield", "--min-height=1"]))
        .unwrap()
        .to_field_options(None);
    assert_eq!(tiny.unwrap_err(), ConfigError::MinHeightTooSmall(3));
}

#[test]
fn test_zero_max_length_is_rejected() {
    let flags = parse_flag_tokens(&args(&["notefield", "--max-length", "0"])).unwrap();
    assert_eq!(flags.to_field_options(None).unwrap_err(), ConfigError::ZeroMaxLength);
}

#[test]
fn test_parse_flag_tokens_rejects_unknown_theme() {
    let err = parse_flag_tokens(&args(&["notefield", "--theme=sepia"])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidTheme("sepia".to_string()));
}

#[test]
fn test_empty_placeholder_survives_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config");
    let flags = ConfigFlags {
        placeholder: Some(String::new()),
        max_length: Some(9),
        ..ConfigFlags::default()
    };

    save_config_flags(&path, &flags).unwrap();
    assert_eq!(load_config_flags(&path).unwrap(), flags);
}

#[test]
fn test_placeholder_that_looks_like_a_flag_survives_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config");
    let flags = ConfigFlags {
        placeholder: Some("--perf = fast mode".to_string()),
        read_only: true,
        ..ConfigFlags::default()
    };

    save_config_flags(&path, &flags).unwrap();
    let loaded = load_config_flags(&path).unwrap();
    assert_eq!(loaded, flags);
    assert!(!loaded.perf);
}
