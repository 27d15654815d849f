//! Doctor checks on good and broken hosts text.

mod common;

use hed::doctor::run_checks;

fn failures(text: &str) -> Vec<String> {
    run_checks(text)
        .into_iter()
        .filter(|r| !r.ok)
        .map(|r| r.message)
        .collect()
}

#[test]
fn formatted_fixture_passes() {
    let results = run_checks(common::FIXTURE_FORMATTED);
    assert!(results.iter().all(|r| r.ok), "{results:?}");
    assert_eq!(results[0].message, "5 mapping(s), 8 host(s), 2 group(s)");
}

#[test]
fn unformatted_fixture_flags_layout_only() {
    let failed = failures(common::FIXTURE);
    assert_eq!(failed.len(), 1);
    assert!(failed[0].contains("hed format"));
}

#[test]
fn unpaired_marker() {
    let failed = failures("#[foo]\n1.1.1.1 a\n");
    assert!(
        failed.iter().any(|m| m.contains("#[foo] on line 1 has no closing marker")),
        "{failed:?}"
    );
}

#[test]
fn repeated_marker() {
    let failed = failures("#[foo]\n#[foo]\n#[foo]\n");
    assert!(
        failed.iter().any(|m| m == "#[foo] on line 3 is ignored (already closed)"),
        "{failed:?}"
    );
}

#[test]
fn marker_inside_other_group_is_ignored() {
    let failed = failures("#[a]\n#[b]\n1.1.1.1 x\n#[b]\n#[a]\n");
    assert!(failed.contains(&"#[b] on line 2 is ignored (inside #[a])".to_string()), "{failed:?}");
    assert!(failed.contains(&"#[b] on line 4 is ignored (inside #[a])".to_string()), "{failed:?}");
    assert!(!failed.iter().any(|m| m.contains("no closing marker")));
}

#[test]
fn stray_lines_reported_by_number() {
    let failed = failures("1.1.1.1\nhello world\n# comment\n");
    assert!(failed.iter().any(|m| m.starts_with("Line(s) 1, 2 ")), "{failed:?}");
}

#[test]
fn crlf_text_counts_as_normalized() {
    let text = common::FIXTURE_FORMATTED.replace('\n', "\r\n");
    assert!(failures(&text).is_empty());
}
