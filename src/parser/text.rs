//! Serializer: lines back to hosts text.

use super::lines::Line;
use super::model::SYSTEM_GROUP;

/// Render lines as text.
///
/// Runs of blank lines collapse to one and leading blanks are dropped.
/// `#[]` and `#[System]` leftovers are removed. The result ends with a
/// single newline unless it is empty.
pub fn lines_to_text(lines: &[Line]) -> String {
    let mut out: Vec<String> = Vec::with_capacity(lines.len() + 1);
    let mut pre_empty = matches!(lines.first(), Some(Line::Empty));

    for line in lines {
        match line {
            Line::Valid(valid) => {
                let mut parts: Vec<&str> = Vec::with_capacity(valid.hosts.len() + 2);
                if !valid.enabled {
                    parts.push("#");
                }
                parts.push(&valid.ip);
                parts.extend(valid.hosts.iter().map(String::as_str));
                out.push(parts.join(" "));
            }
            Line::Group(name) => out.push(format!("#[{name}]")),
            Line::Other(raw) => {
                let s = raw.trim();
                if is_noise(s) {
                    pre_empty = true;
                    continue;
                }
                out.push(s.to_string());
            }
            Line::Empty => {
                if !pre_empty {
                    out.push(String::new());
                }
            }
        }
        pre_empty = matches!(line, Line::Empty);
    }

    if out.last().is_some_and(|l| !l.is_empty()) {
        out.push(String::new());
    }

    out.join("\n")
}

fn is_noise(s: &str) -> bool {
    s == "#[]" || s.strip_prefix("#[").and_then(|r| r.strip_suffix(']')) == Some(SYSTEM_GROUP)
}
