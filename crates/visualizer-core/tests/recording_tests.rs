use visualizer_core::*;

#[test]
fn requested_container_is_kept_when_supported() {
    let fmt = negotiate_format(ExportFormat::Mp4, |_| true).unwrap();
    assert_eq!(fmt, ExportFormat::Mp4);
    assert_eq!(fmt.file_name(), "visualizer-video.mp4");
}

#[test]
fn unsupported_mp4_falls_back_to_webm() {
    let fmt = negotiate_format(ExportFormat::Mp4, |m| m == "video/webm").unwrap();
    assert_eq!(fmt, ExportFormat::WebM);
    assert_eq!(fmt.mime_type(), "video/webm");
    assert_eq!(fmt.file_name(), "visualizer-video.webm");
}

#[test]
fn unsupported_webm_falls_back_to_mp4() {
    let fmt = negotiate_format(ExportFormat::WebM, |m| m == "video/mp4").unwrap();
    assert_eq!(fmt, ExportFormat::Mp4);
    assert_eq!(fmt.file_name(), "visualizer-video.mp4");
}

#[test]
fn no_container_at_all_is_an_error() {
    assert_eq!(
        negotiate_format(ExportFormat::Mp4, |_| false),
        Err(RecordingError::NoSupportedContainer)
    );
    assert_eq!(
        negotiate_format(ExportFormat::WebM, |_| false),
        Err(RecordingError::NoSupportedContainer)
    );
}

#[test]
fn format_serializes_as_mime_type() {
    assert_eq!(serde_json::to_string(&ExportFormat::WebM).unwrap(), "\"video/webm\"");
    let parsed: ExportFormat = serde_json::from_str("\"video/mp4\"").unwrap();
    assert_eq!(parsed, ExportFormat::Mp4);
}

#[test]
fn progress_is_monotonic_and_clamped() {
    let mut session = ExportSession::default();
    assert_eq!(session.begin(ExportFormat::WebM), Ok(ExportEvent::Progress(0.0)));
    assert_eq!(session.state(), ExportState::Recording);

    // unknown duration is ignored
    assert_eq!(session.on_time_update(1.0, f64::NAN), None);
    assert_eq!(session.on_time_update(1.0, 0.0), None);

    let mut last = 0.0;
    for (pos, dur) in [(1.0, 10.0), (5.0, 10.0), (4.0, 10.0), (12.0, 10.0)] {
        let Some(ExportEvent::Progress(p)) = session.on_time_update(pos, dur) else {
            panic!("expected progress");
        };
        assert!(p >= last);
        assert!((0.0..=100.0).contains(&p));
        last = p;
    }
    assert_eq!(last, 100.0);
    assert_eq!(session.progress(), 100.0);
}

#[test]
fn completion_waits_for_the_encoder_flush() {
    let mut session = ExportSession::default();
    assert!(session.on_ended().is_empty());
    assert_eq!(session.on_flushed(), None);
    session.begin(ExportFormat::Mp4).unwrap();
    session.on_time_update(3.0, 6.0);
    assert_eq!(
        session.on_ended(),
        vec![ExportEvent::Progress(100.0), ExportEvent::Flush]
    );
    assert_eq!(session.state(), ExportState::Flushing);
    assert!(session.is_busy());
    assert!(!session.is_recording());
    assert!(session.on_ended().is_empty());
    assert_eq!(session.on_time_update(1.0, 6.0), None);

    // still writing the previous file
    assert_eq!(
        session.begin(ExportFormat::WebM),
        Err(RecordingError::AlreadyRunning)
    );

    assert_eq!(session.on_flushed(), Some(ExportEvent::Completed));
    assert_eq!(session.state(), ExportState::Finished);
    assert!(!session.is_busy());
    assert_eq!(session.on_flushed(), None);
    assert_eq!(session.begin(ExportFormat::WebM), Ok(ExportEvent::Progress(0.0)));
}

#[test]
fn one_export_at_a_time() {
    let mut session = ExportSession::default();
    session.begin(ExportFormat::Mp4).unwrap();
    assert_eq!(
        session.begin(ExportFormat::WebM),
        Err(RecordingError::AlreadyRunning)
    );
    assert_eq!(session.format(), Some(ExportFormat::Mp4));
    session.cancel().unwrap();
    assert_eq!(session.cancel(), Err(RecordingError::NotRunning));
    // a finished or cancelled session can start again from zero
    assert_eq!(session.begin(ExportFormat::WebM), Ok(ExportEvent::Progress(0.0)));
}
