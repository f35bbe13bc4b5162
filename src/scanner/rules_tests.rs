use super::*;
use tempfile::TempDir;

fn rules(content: &str) -> RuleSet {
    RuleSet::parse(Path::new("/workspace"), content)
}

#[test]
fn empty_rules_exclude_nothing() {
    let rules = RuleSet::empty();
    assert!(rules.is_empty());
    assert!(!rules.excluded("a.txt"));
    assert!(!rules.excluded("deep/nested/file.rs"));
}

#[test]
fn glob_pattern_matches_any_depth() {
    let rules = rules("*.log\n");
    assert!(rules.excluded("c.log"));
    assert!(rules.excluded("logs/today/c.log"));
    assert!(!rules.excluded("c.txt"));
}

#[test]
fn comments_and_blank_lines_are_not_patterns() {
    let rules = rules("# build output\n\n*.o\n   \n");
    assert_eq!(rules.len(), 1);
    assert!(rules.excluded("main.o"));
    assert!(!rules.excluded("# build output"));
}

#[test]
fn later_negation_overrides_earlier_pattern() {
    let rules = rules("*.log\n!keep.log\n");
    assert!(rules.excluded("drop.log"));
    assert!(!rules.excluded("keep.log"));
}

#[test]
fn earlier_negation_is_overridden_by_later_pattern() {
    let rules = rules("!keep.log\n*.log\n");
    assert!(rules.excluded("keep.log"));
}

#[test]
fn directory_pattern_excludes_contents() {
    let rules = rules("build/\n");
    assert!(rules.excluded("build/out.txt"));
    assert!(rules.excluded("src/build/out.txt"));
    // A file named like the directory is not matched by a dir-only pattern.
    assert!(!rules.excluded("build"));
}

#[test]
fn negation_cannot_reinclude_file_in_excluded_directory() {
    let rules = rules("build/\n!build/keep.txt\n");
    assert!(rules.excluded("build/keep.txt"));
}

#[test]
fn anchored_pattern_only_matches_at_root() {
    let rules = rules("/target\n");
    assert!(rules.excluded("target/debug/app"));
    assert!(!rules.excluded("crates/target/debug/app"));
}

#[test]
fn malformed_pattern_is_skipped() {
    let rules = rules("src/[z-a].txt\n*.log\n");
    assert!(rules.excluded("a.log"));
    assert!(!rules.excluded("src/b.txt"));
}

#[test]
fn crlf_rules_file_is_understood() {
    let rules = rules("*.log\r\n*.tmp\r\n");
    assert!(rules.excluded("x.log"));
    assert!(rules.excluded("y.tmp"));
}

#[test]
fn git_directory_is_always_excluded() {
    let rules = RuleSet::empty();
    assert!(rules.excluded(".git/config"));
    assert!(!rules.excluded("src/.git"));
}

#[test]
fn root_rules_file_is_excluded() {
    let rules = RuleSet::empty();
    assert!(rules.excluded(".gitignore"));
    assert!(!rules.excluded("sub/.gitignore"));
}

#[test]
fn leading_slash_and_dot_segments_are_tolerated() {
    let rules = rules("*.log\n");
    assert!(rules.excluded("/a.log"));
    assert!(rules.excluded("./logs/a.log"));
}

#[test]
fn escaping_paths_are_not_excluded() {
    let rules = rules("*.log\n");
    assert!(!rules.excluded("../outside.log"));
    assert!(!rules.excluded(""));
}

#[test]
fn load_without_rules_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let rules = RuleSet::load(temp_dir.path());
    assert!(rules.is_empty());
}

#[test]
fn load_reads_rules_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(".gitignore"), "*.log\nbuild/\n").unwrap();

    let rules = RuleSet::load(temp_dir.path());
    assert_eq!(rules.len(), 2);
    assert!(rules.excluded("c.log"));
    assert!(rules.excluded("build/x.txt"));
}

#[test]
fn relative_path_uses_forward_slashes() {
    let root = Path::new("/workspace");
    let path = root.join("src").join("lib.rs");
    assert_eq!(relative_path(root, &path).as_deref(), Some("src/lib.rs"));
}

#[test]
fn relative_path_outside_root_is_none() {
    let root = Path::new("/workspace");
    assert_eq!(relative_path(root, Path::new("/elsewhere/a.txt")), None);
    assert_eq!(relative_path(root, Path::new("/workspace-other/a.txt")), None);
}

#[test]
fn relative_path_rejects_root_and_parent_components() {
    let root = Path::new("/workspace");
    assert_eq!(relative_path(root, root), None);
    assert_eq!(relative_path(root, &root.join("../outside.txt")), None);
    assert_eq!(relative_path(root, &root.join("sub/../c.log")), None);
}
