//! Doctor command: health checks for a hosts file.

use crate::parser::{self, GroupScope, Line, Marker};

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub ok: bool,
    pub message: String,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Run all doctor checks against hosts file text.
pub fn run_checks(text: &str) -> Vec<CheckResult> {
    let mut results = Vec::new();
    let parsed = parser::text_to_lines(text);
    let groups = parser::text_to_groups(text);

    // 1. What was understood
    let items = groups.first().map(|g| g.list.len()).unwrap_or(0);
    let hosts: usize = groups
        .first()
        .map(|g| g.list.iter().map(|i| i.hosts.len()).sum())
        .unwrap_or(0);
    results.push(CheckResult::ok(format!(
        "{items} mapping(s), {hosts} host(s), {} group(s)",
        groups.len().saturating_sub(1)
    )));

    // 2. Marker pairing, walked the way the parser pairs markers
    let mut scope = GroupScope::default();
    let mut opened_at = 0;
    let mut pairing_ok = true;
    for (idx, line) in parsed.lines.iter().enumerate() {
        let Line::Group(name) = line else {
            continue;
        };
        match scope.visit(name) {
            Marker::Open => opened_at = idx + 1,
            Marker::Close => {}
            Marker::Ignored => {
                pairing_ok = false;
                let reason = match scope.current() {
                    Some(open) => format!("inside #[{open}]"),
                    None => "already closed".to_string(),
                };
                results.push(CheckResult::fail(format!(
                    "#[{name}] on line {} is ignored ({reason})",
                    idx + 1
                )));
            }
        }
    }
    if let Some(name) = scope.current() {
        pairing_ok = false;
        results.push(CheckResult::fail(format!(
            "#[{name}] on line {opened_at} has no closing marker; its mappings count as System"
        )));
    }
    if pairing_ok {
        results.push(CheckResult::ok("All group markers are paired"));
    }

    // 3. Active lines that are not mappings
    let stray: Vec<usize> = parsed
        .lines
        .iter()
        .enumerate()
        .filter(|(_, line)| matches!(line, Line::Other(raw) if !raw.trim_start().starts_with('#')))
        .map(|(idx, _)| idx + 1)
        .collect();
    if stray.is_empty() {
        results.push(CheckResult::ok("Every uncommented line is a mapping"));
    } else {
        let lines: Vec<String> = stray.iter().map(usize::to_string).collect();
        results.push(CheckResult::fail(format!(
            "Line(s) {} are neither mappings nor comments",
            lines.join(", ")
        )));
    }

    // 4. Normalized layout
    if parser::format(text) == text.replace("\r\n", "\n") {
        results.push(CheckResult::ok("File is normalized"));
    } else {
        results.push(CheckResult::fail(
            "Spacing or blank lines differ from normalized form; run 'hed format'",
        ));
    }

    results
}
