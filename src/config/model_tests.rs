use super::*;

#[test]
fn config_default_values() {
    let config = Config::default();
    assert_eq!(config.scan.large_file_threshold, 10 * 1024 * 1024);
    assert!(!config.scan.follow_links);
    assert_eq!(config.scan.threads, 0);
    assert_eq!(config.watch.debounce_ms, 50);
}

#[test]
fn empty_document_is_default() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config: Config = toml::from_str("[scan]\nfollow_links = true\n").unwrap();
    assert!(config.scan.follow_links);
    assert_eq!(config.scan.large_file_threshold, LARGE_FILE_THRESHOLD);
    assert_eq!(config.watch, WatchConfig::default());
}

#[test]
fn full_document_parses() {
    let content = r"
[scan]
large_file_threshold = 4096
follow_links = true
threads = 2

[watch]
debounce_ms = 200
";
    let config: Config = toml::from_str(content).unwrap();
    assert_eq!(config.scan.large_file_threshold, 4096);
    assert_eq!(config.scan.threads, 2);
    assert_eq!(config.watch.debounce_ms, 200);
}

#[test]
fn unknown_keys_are_rejected() {
    let result: Result<Config, _> = toml::from_str("[scan]\nmax_lines = 3\n");
    assert!(result.is_err());

    let result: Result<Config, _> = toml::from_str("[extra]\n");
    assert!(result.is_err());
}
