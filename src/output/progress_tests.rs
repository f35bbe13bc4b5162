use super::*;

#[test]
fn quiet_progress_is_hidden() {
    let progress = ScanProgress::new(true);
    assert!(format!("{progress:?}").contains("hidden: true"));
    progress.finish();
}

#[test]
fn inc_advances_position() {
    let progress = ScanProgress::hidden();
    progress.set_total(3);
    for _ in 0..3 {
        progress.inc();
    }
    assert_eq!(progress.position(), 3);
    progress.finish();
}

#[test]
fn clones_share_one_bar() {
    let progress = ScanProgress::hidden();
    let worker = progress.clone();

    progress.inc();
    worker.inc();

    assert_eq!(progress.position(), 2);
}

#[test]
fn template_is_valid() {
    assert!(ProgressStyle::with_template(TEMPLATE).is_ok());
}
