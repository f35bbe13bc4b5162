use std::path::PathBuf;

use super::*;

#[test]
fn error_display_config() {
    let err = LineTallyError::Config("unknown field `foo`".to_string());
    assert_eq!(err.to_string(), "Configuration error: unknown field `foo`");
}

#[test]
fn error_display_file_read() {
    let err = LineTallyError::FileRead {
        path: PathBuf::from("notes.txt"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.to_string().contains("notes.txt"));
}

#[test]
fn command_errors_use_user_facing_messages() {
    assert_eq!(LineTallyError::NoFileOpen.to_string(), "no file open");
    assert_eq!(LineTallyError::NoWorkspace.to_string(), "no workspace open");
}

#[test]
fn io_error_converts() {
    let err: LineTallyError = std::io::Error::other("disk on fire").into();
    assert!(matches!(err, LineTallyError::Io(_)));
    assert_eq!(err.to_string(), "IO error: disk on fire");
}

#[test]
fn toml_error_converts() {
    let parse_err = toml::from_str::<toml::Table>("key = ").unwrap_err();
    let err: LineTallyError = parse_err.into();
    assert!(err.to_string().starts_with("TOML parse error:"));
}

#[test]
fn file_read_exposes_source() {
    use std::error::Error as _;

    let err = LineTallyError::FileRead {
        path: PathBuf::from("a.txt"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(err.source().is_some());
}
