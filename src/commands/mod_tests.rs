use tempfile::TempDir;

use super::*;

#[test]
fn resolve_root_of_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let err = resolve_root(&temp_dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, LineTallyError::FileRead { .. }));
}

#[test]
fn resolve_root_is_absolute() {
    let temp_dir = TempDir::new().unwrap();
    let root = resolve_root(temp_dir.path()).unwrap();
    assert!(root.is_absolute());
}

#[test]
fn load_config_prefers_explicit_path() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(".line-tally.toml"), "[scan]\nthreads = 1\n").unwrap();
    let explicit = temp_dir.path().join("other.toml");
    std::fs::write(&explicit, "[scan]\nthreads = 4\n").unwrap();

    let config = load_config(Some(&explicit), temp_dir.path()).unwrap();
    assert_eq!(config.scan.threads, 4);

    let config = load_config(None, temp_dir.path()).unwrap();
    assert_eq!(config.scan.threads, 1);
}

#[test]
fn load_config_missing_explicit_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = load_config(Some(&temp_dir.path().join("nope.toml")), temp_dir.path());
    assert!(result.is_err());
}
