//! Named groups: extraction from full text, and splicing a group's text back in.

use indexmap::IndexMap;

use super::lines::{split_lines, text_to_lines, Line};
use super::list::lines_to_list;
use super::model::{Group, Range, SYSTEM_GROUP};
use super::scope::{GroupScope, Marker};

/// Split `text` into `[System, ...named groups]`.
///
/// `System` carries the whole text and every item. Each named group's text is
/// the raw lines strictly between its paired markers; its items are the
/// `System` items tagged with its name.
pub fn text_to_groups(text: &str) -> Vec<Group> {
    let parsed = text_to_lines(text);
    let ranges = group_ranges(&parsed.lines);

    let mut groups: IndexMap<String, Group> = ranges
        .into_iter()
        .map(|(name, range)| {
            let group = Group {
                name: name.clone(),
                text: parsed.raw_lines[range.start + 1..range.end].join("\n"),
                list: Vec::new(),
            };
            (name, group)
        })
        .collect();

    let system = Group {
        name: SYSTEM_GROUP.to_string(),
        text: text.to_string(),
        list: lines_to_list(&parsed.lines, None),
    };

    for item in &system.list {
        if let Some(group) = groups.get_mut(&item.group) {
            group.list.push(item.clone());
        }
    }

    std::iter::once(system).chain(groups.into_values()).collect()
}

/// Marker line indices of every matched group, in discovery order.
fn group_ranges(lines: &[Line]) -> IndexMap<String, Range> {
    let mut ranges = IndexMap::new();
    let mut scope = GroupScope::default();
    let mut start = 0;

    for (idx, line) in lines.iter().enumerate() {
        let Line::Group(name) = line else {
            continue;
        };
        match scope.visit(name) {
            Marker::Open => start = idx,
            Marker::Close => {
                ranges.insert(name.clone(), Range { start, end: idx });
            }
            Marker::Ignored => {}
        }
    }

    ranges
}

/// Replace the lines between the first two `#[group]` markers of `full_text`
/// with the lines of `group_text`. Without a marker pair the text is returned
/// unchanged (line endings normalized).
pub fn replace_group_text(group: &str, group_text: &str, full_text: &str) -> String {
    let parsed = text_to_lines(full_text);
    let mut raw_lines = parsed.raw_lines;

    let mut markers = parsed
        .lines
        .iter()
        .enumerate()
        .filter(|(_, line)| matches!(line, Line::Group(name) if name == group))
        .map(|(idx, _)| idx);

    if let (Some(start), Some(end)) = (markers.next(), markers.next()) {
        raw_lines.splice(start + 1..end, split_lines(group_text));
    }

    raw_lines.join("\n")
}
