//! End-to-end integration tests for causelist-pdf.
//!
//! Every test renders into a scratch directory and re-opens the produced PDF
//! with lopdf, so what is checked is what a viewer would load.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use causelist_pdf::{
    extract, generate_report, generate_report_from_html, render, CauseListError, DocumentRenderer,
    ExtractionError, Orientation, PageSize, RawCell, RawRow, Record, RecordSet, RenderError,
    ReportConfig, ReportTheme,
};
use lopdf::content::Content;
use lopdf::Document;
use std::path::Path;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Route library logs through the test harness; `RUST_LOG=debug` shows them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn row(cells: &[&str]) -> RawRow {
    RawRow::from_texts(cells.iter().copied())
}

fn many_rows(n: usize) -> Vec<RawRow> {
    (1..=n)
        .map(|i| {
            row(&[
                &i.to_string(),
                &format!("CRL.MA {i}/2026\nView"),
                "State of Maharashtra vs Ramesh Kumar Sharma and others",
                "Adv. P. Deshmukh",
            ])
        })
        .collect()
}

fn load(path: &Path) -> Document {
    let bytes = std::fs::read(path).expect("output PDF exists");
    assert!(!bytes.is_empty(), "output PDF is empty");
    Document::load_mem(&bytes).expect("output is a loadable PDF")
}

/// Every string drawn with `Tj` on each page, in order.
fn page_strings(doc: &Document) -> Vec<Vec<String>> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let raw = doc.get_page_content(page_id).expect("page content");
            let content = Content::decode(&raw).expect("decodable content");
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| op.operands.first()?.as_str().ok())
                .map(|s| String::from_utf8_lossy(s).into_owned())
                .collect()
        })
        .collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn test_end_to_end_example() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("Cause_List.pdf");
    let rows = vec![
        row(&["1", "Suit No 12\nView", "A vs B", "Adv. X"]),
        row(&["", "", "", ""]),
    ];

    let records = extract(&rows).unwrap();
    assert_eq!(records.header(), &Record::default_header());
    assert_eq!(records.rows(), &[Record::new("1", "Suit No 12", "A vs B", "Adv. X")]);

    let summary = render(&records, &dest).unwrap();
    assert_eq!(summary.pages, 1);
    assert_eq!(summary.header_rows, 1);
    assert_eq!(summary.data_rows, 1);
    assert_eq!(summary.split_rows, 0);

    let doc = load(&dest);
    assert_eq!(doc.get_pages().len(), 1);
    let strings = page_strings(&doc).remove(0);
    for expected in ["District Court Cause List", "Sr No", "Advocate", "Suit No 12", "A vs B"] {
        assert!(
            strings.iter().any(|s| s == expected),
            "{expected:?} not drawn; got {strings:?}"
        );
    }
    assert!(!strings.iter().any(|s| s.contains("View")));
}

#[test]
fn test_header_only_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.pdf");
    let empty = RecordSet::new(Record::default_header(), vec![]);

    let err = render(&empty, &dest).unwrap_err();
    assert!(matches!(err, RenderError::EmptyRecordSet));
    assert!(!dest.exists());
}

#[test]
fn test_unwritable_destination() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_dir = dir.path().join("listing.txt");
    std::fs::write(&not_a_dir, "occupied").unwrap();

    let records = extract(&many_rows(1)).unwrap();
    let err = render(&records, not_a_dir.join("out.pdf")).unwrap_err();
    match err {
        RenderError::WriteFailed { path, .. } => assert!(path.ends_with("out.pdf")),
        other => panic!("expected WriteFailed, got {other:?}"),
    }
}

#[test]
fn test_many_rows_paginate_with_repeated_header() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("long.pdf");

    let records = extract(&many_rows(150)).unwrap();
    let summary = render(&records, &dest).unwrap();
    assert!(summary.pages > 1, "150 rows should not fit one page");
    assert_eq!(summary.header_rows, summary.pages);
    assert_eq!(summary.data_rows, 150);

    let doc = load(&dest);
    let pages = page_strings(&doc);
    assert_eq!(pages.len(), summary.pages);
    assert_eq!(pages[0][0], "District Court Cause List");
    for (i, strings) in pages.iter().enumerate().skip(1) {
        assert_eq!(strings.first().map(String::as_str), Some("Sr No"), "page {}", i + 1);
    }

    // Every serial appears exactly once across the document, in order.
    let serials: Vec<usize> = pages
        .iter()
        .flat_map(|p| p.iter())
        .filter_map(|s| s.parse().ok())
        .collect();
    assert_eq!(serials, (1..=150).collect::<Vec<_>>());
}

#[test]
fn test_header_not_repeated_when_disabled() {
    let theme = ReportTheme::builder().repeat_header(false).build().unwrap();
    let records = extract(&many_rows(150)).unwrap();
    let (bytes, summary) = DocumentRenderer::new(theme).render_to_vec(&records).unwrap();
    assert!(summary.pages > 1);
    assert_eq!(summary.header_rows, 1);

    let doc = Document::load_mem(&bytes).unwrap();
    let pages = page_strings(&doc);
    assert!(!pages[1].iter().any(|s| s == "Sr No"));
}

#[test]
fn test_oversize_row_split_not_truncated() {
    init_tracing();
    let words: Vec<String> = (0..2500).map(|i| format!("w{i}")).collect();
    let party = words.join(" ");
    let records = extract(&[row(&["1", "Suit 9", &party, "Adv. Z"])]).unwrap();

    let (bytes, summary) = DocumentRenderer::default().render_to_vec(&records).unwrap();
    assert!(summary.pages > 1);
    assert_eq!(summary.split_rows, 1);
    assert_eq!(summary.data_rows, 1);

    let doc = Document::load_mem(&bytes).unwrap();
    let drawn: String = page_strings(&doc)
        .into_iter()
        .flatten()
        .filter(|s| s.starts_with('w'))
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(drawn, party);
}

#[test]
fn test_portrait_letter_theme() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("portrait.pdf");
    let theme = ReportTheme::builder()
        .page_size(PageSize::Letter)
        .orientation(Orientation::Portrait)
        .column_ratios(ReportTheme::DEFAULT_COLUMN_RATIOS)
        .title("Sessions Court, Pune")
        .build()
        .unwrap();

    let records = extract(&many_rows(10)).unwrap();
    DocumentRenderer::new(theme).render(&records, &dest).unwrap();

    let doc = load(&dest);
    let pages = page_strings(&doc);
    assert_eq!(pages[0][0], "Sessions Court, Pune");
}

#[test]
fn test_generate_report_from_html() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("from_html.pdf");
    let html = r#"
        <table id="dispTable">
          <tr><th>Sr No</th><th>Cases</th><th>Party Name</th><th>Advocate</th></tr>
          <tr><td colspan="4">Bail Applications</td></tr>
          <tr><td>1</td><td>BA 44/2026<br><a>View</a></td><td>X<br>vs<br>State</td><td>Adv. Q</td></tr>
          <tr><td>2</td><td>BA 45/2026<br><a>View</a></td><td>Y vs State</td><td>Adv. R</td></tr>
        </table>
    "#;

    let summary = generate_report_from_html(html, &ReportConfig::default(), &dest).unwrap();
    assert_eq!(summary.data_rows, 2);
    let strings = page_strings(&load(&dest)).remove(0);
    assert!(strings.iter().any(|s| s == "X vs State"));
    assert!(!strings.iter().any(|s| s.contains("Bail Applications")));
}

#[test]
fn test_generate_report_no_data_classification() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("never.pdf");
    let rows = vec![
        RawRow::new(vec![RawCell::spanned("No cases listed today")]),
        row(&["", "", "", ""]),
    ];

    let err = generate_report(&rows, &ReportConfig::default(), &dest).unwrap_err();
    assert!(err.is_no_data());
    assert!(matches!(
        err,
        CauseListError::Extraction(ExtractionError::NoValidRows {
            total: 2,
            skipped: 2
        })
    ));
    assert!(!dest.exists());
}

#[test]
fn test_json_rows_round_into_report() {
    let json = r#"[
        ["1", "Suit No 12\nView", "A vs B", "Adv. X"],
        [{"text": "Civil Cases", "is_spanned": true}],
        ["2", "RCA 3", "C vs D", "Adv. Y"]
    ]"#;
    let rows: Vec<RawRow> = serde_json::from_str(json).unwrap();
    assert!(rows[1].has_spanned_cell());

    let dir = tempfile::tempdir().unwrap();
    let summary =
        generate_report(&rows, &ReportConfig::default(), dir.path().join("j.pdf")).unwrap();
    assert_eq!(summary.data_rows, 2);
}
