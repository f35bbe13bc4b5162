use std::collections::HashMap;
use std::path::PathBuf;

use super::*;

#[derive(Default)]
struct MockFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MockFileSystem {
    fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found")
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

#[test]
fn load_without_file_returns_default() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::default());
    let config = loader.load(Path::new("/project")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn load_reads_local_config() {
    let fs = MockFileSystem::default()
        .with_file("/project/.line-tally.toml", "[scan]\nthreads = 3\n");
    let loader = FileConfigLoader::with_fs(fs);

    let config = loader.load(Path::new("/project")).unwrap();
    assert_eq!(config.scan.threads, 3);
}

#[test]
fn load_invalid_toml_is_config_error() {
    let fs = MockFileSystem::default().with_file("/project/.line-tally.toml", "[scan\n");
    let loader = FileConfigLoader::with_fs(fs);

    let err = loader.load(Path::new("/project")).unwrap_err();
    assert!(matches!(err, LineTallyError::Config(_)));
    assert!(err.to_string().contains(".line-tally.toml"));
}

#[test]
fn load_from_missing_path_is_file_read_error() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::default());
    let err = loader.load_from_path(Path::new("/elsewhere.toml")).unwrap_err();
    assert!(matches!(err, LineTallyError::FileRead { .. }));
}

#[test]
fn real_filesystem_loader_reads_temp_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(LOCAL_CONFIG_NAME),
        "[watch]\ndebounce_ms = 10\n",
    )
    .unwrap();

    let config = FileConfigLoader::new().load(temp_dir.path()).unwrap();
    assert_eq!(config.watch.debounce_ms, 10);
}
