#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the line-tally binary.
#[macro_export]
macro_rules! line_tally {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("line-tally"))
    };
}

/// Temporary workspace for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content, making parent directories as needed.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn path_str(&self) -> &str {
        self.dir.path().to_str().expect("temp path is UTF-8")
    }

    pub fn create_config(&self, content: &str) {
        self.create_file(".line-tally.toml", content);
    }

    /// a.txt (3 lines), b.txt (blank only), c.log (5 lines) and a rules file excluding `*.log`.
    pub fn with_sample_tree() -> Self {
        let fixture = Self::new();
        fixture.create_file("a.txt", "1\n2\n3\n");
        fixture.create_file("b.txt", "\n\n");
        fixture.create_file("c.log", "1\n2\n3\n4\n5\n");
        fixture.create_file(".gitignore", "*.log\n");
        fixture
    }
}
