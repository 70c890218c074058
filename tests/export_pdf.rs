//! PDF export smoke tests against a temp directory.

use glimpse::export::{PdfExporter, MAX_EXPORTED_RESPONSES};
use glimpse::history::ResponseHistory;

#[test]
fn export_writes_a_timestamped_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = PdfExporter::new(dir.path());

    let responses = vec![
        "** SUMMARY **\nfirst analysis".to_string(),
        "** SUMMARY **\nsecond analysis with 📊 glyphs".to_string(),
    ];
    let path = exporter
        .export(&responses, Some("remember to follow up on Q3"))
        .unwrap();

    assert!(path.exists());
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("glimpse_report_"));
    assert!(name.ends_with(".pdf"));
    // The stem between prefix and extension is the unix timestamp.
    let stamp = name
        .trim_start_matches("glimpse_report_")
        .trim_end_matches(".pdf");
    assert!(stamp.parse::<u64>().is_ok(), "filename stamp not numeric: {name}");

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"), "not a PDF file");
}

#[test]
fn export_creates_the_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("reports").join("glimpse");
    let exporter = PdfExporter::new(&nested);

    let path = exporter.export(&["only entry".to_string()], None).unwrap();
    assert!(path.starts_with(&nested));
    assert!(path.exists());
}

#[test]
fn history_recent_caps_what_reaches_the_report() {
    let mut history = ResponseHistory::new();
    for i in 0..8 {
        history.push(format!("analysis {i}"));
    }
    let recent = history.recent(MAX_EXPORTED_RESPONSES);
    assert_eq!(recent.len(), MAX_EXPORTED_RESPONSES);
    assert_eq!(recent.first().map(String::as_str), Some("analysis 3"));
    assert_eq!(recent.last().map(String::as_str), Some("analysis 7"));
}

#[test]
fn export_with_notes_only_still_produces_a_report() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = PdfExporter::new(dir.path());

    let path = exporter.export(&[], Some("standalone notes")).unwrap();
    assert!(path.exists());
}
