use std::fs;

use quad_ngin::{
    diagnostics::{IoError, JsonError, Reporter},
    json::{TextPosition, expect_array, expect_object, parse_document, read_array},
};

#[test]
fn position_counts_newlines_before_the_offset() {
    let text = "\"abc\ndef\",";
    assert_eq!(TextPosition::at_offset(text, 10), TextPosition { line: 2, column: 6 });
    assert_eq!(TextPosition::at_offset(text, 0), TextPosition { line: 1, column: 1 });
    assert_eq!(TextPosition::at_offset(text, 4), TextPosition { line: 1, column: 5 });
    assert_eq!(TextPosition::at_offset(text, 5), TextPosition { line: 2, column: 1 });
}

#[test]
fn syntax_error_reports_line_and_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[\n  {\"id\": 0},\n  oops\n]").unwrap();
    let mut reporter = Reporter::new(false);

    assert!(parse_document(&path, &mut reporter).is_none());

    assert_eq!(reporter.count(JsonError::CantParse), 1);
    let diagnostic = &reporter.diagnostics()[0];
    assert_eq!(diagnostic.position, Some(TextPosition { line: 3, column: 3 }));
    assert!(!diagnostic.detail.contains(" at line "), "{}", diagnostic.detail);
    assert!(diagnostic.to_string().contains(": L 3; C 3: "));
}

#[test]
fn missing_file_reports_the_os_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut reporter = Reporter::new(false);

    assert!(read_array(&dir.path().join("nope.json"), &mut reporter).is_none());

    assert_eq!(reporter.count(IoError::CantOpenFile), 1);
    assert!(!reporter.diagnostics()[0].detail.is_empty());
    assert!(reporter.diagnostics()[0].position.is_none());
}

#[test]
fn root_shape_is_checked() {
    let mut reporter = Reporter::new(false);
    let array = serde_json::json!([1, 2]);
    let object = serde_json::json!({"IO": []});

    assert_eq!(expect_array(&array, "a.json", &mut reporter).map(<[_]>::len), Some(2));
    assert!(expect_object(&array, "a.json", &mut reporter).is_none());
    assert!(expect_array(&object, "b.json", &mut reporter).is_none());

    assert_eq!(reporter.count(JsonError::WrongRoot), 2);
    assert_eq!(
        reporter.diagnostics()[0].message,
        "The root of the file must be an Object"
    );
}
