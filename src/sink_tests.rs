use super::*;

#[test]
fn status_display() {
    assert_eq!(Status::Idle.to_string(), "idle");
    assert_eq!(Status::Counting.to_string(), "counting");
}

#[test]
fn status_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Status::Counting).unwrap(), "\"counting\"");
}

#[test]
fn recording_sink_keeps_order() {
    let mut sink = RecordingSink::new();
    sink.report_status(Status::Counting);
    sink.report_total(3);
    sink.report_status(Status::Idle);

    assert_eq!(
        sink.reports(),
        vec![
            Report::Status(Status::Counting),
            Report::Total(3),
            Report::Status(Status::Idle),
        ]
    );
    assert_eq!(sink.last_total(), Some(3));
    assert_eq!(sink.last_status(), Some(Status::Idle));
}

#[test]
fn recording_sink_clones_share_log() {
    let sink = RecordingSink::new();
    let mut writer = sink.clone();
    writer.report_total(7);

    assert_eq!(sink.last_total(), Some(7));
    sink.clear();
    assert!(writer.reports().is_empty());
}

#[test]
fn boxed_sink_forwards() {
    let recorder = RecordingSink::new();
    let mut boxed: Box<dyn StatusSink> = Box::new(recorder.clone());
    boxed.report_total(1);
    boxed.report_status(Status::Idle);

    assert_eq!(recorder.reports().len(), 2);
}

#[test]
fn log_sink_accepts_reports() {
    let mut sink = LogSink;
    sink.report_status(Status::Counting);
    sink.report_total(42);
}
