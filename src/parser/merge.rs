//! List-to-lines merger: lay an edited item list back over the old lines.
//!
//! Old lines are replayed in order. Top-level mappings are rewritten in place
//! from the new host set of their IP (first occurrence wins, later ones are
//! blanked), group blocks are regenerated at their closing marker, and every
//! other line passes through. What the old lines had no place for is appended.

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

use super::lines::{Line, ValidLine};
use super::model::{Host, Item};
use super::scope::{GroupScope, Marker};

pub const DEFAULT_CHUNK_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct ListToLinesOptions {
    /// Old group name to new group name, for renames.
    pub group_name_map: HashMap<String, String>,
    /// Hosts per generated line.
    pub chunk_size: usize,
    /// Old group names whose marker pair is kept in place even when no item
    /// belongs to them.
    pub keep_empty_groups: HashSet<String>,
}

impl Default for ListToLinesOptions {
    fn default() -> Self {
        Self {
            group_name_map: HashMap::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            keep_empty_groups: HashSet::new(),
        }
    }
}

impl ListToLinesOptions {
    fn final_name(&self, group: &str) -> String {
        self.group_name_map
            .get(group)
            .cloned()
            .unwrap_or_else(|| group.to_string())
    }
}

pub fn list_to_lines(list: &[Item], old_lines: &[Line], options: &ListToLinesOptions) -> Vec<Line> {
    let chunk_size = options.chunk_size.max(1);

    let mut sys_hosts: IndexMap<String, Vec<Host>> = IndexMap::new();
    let mut group_items: IndexMap<String, Vec<Item>> = IndexMap::new();
    for item in list {
        if item.is_system() {
            sys_hosts
                .entry(item.ip.clone())
                .or_default()
                .extend(item.hosts.iter().cloned());
        } else {
            group_items
                .entry(options.final_name(&item.group))
                .or_default()
                .push(item.clone());
        }
    }

    let mut lines = Vec::new();
    let mut scope = GroupScope::default();
    // Old lines directly after a regenerated mapping that stand for the rest
    // of its chunks: (ip, lines left).
    let mut continuation: Option<(&str, usize)> = None;

    for line in old_lines {
        match line {
            Line::Valid(_) if scope.current().is_some() => continue,
            Line::Valid(valid) => {
                if let Some((ip, left)) = continuation.as_mut() {
                    if *ip == valid.ip && *left > 0 {
                        *left -= 1;
                        continue;
                    }
                }
                continuation = None;
                match sys_hosts.get_mut(&valid.ip) {
                    Some(hosts) if !hosts.is_empty() => {
                        let hosts = std::mem::take(hosts);
                        let before = lines.len();
                        push_hosts(&mut lines, &valid.ip, &hosts, chunk_size);
                        continuation = Some((valid.ip.as_str(), lines.len() - before - 1));
                    }
                    _ => lines.push(Line::Empty),
                }
                continue;
            }
            Line::Group(name) => {
                let marker = scope.visit(name);
                let final_name = options.final_name(name);
                let has_items = group_items.get(&final_name).is_some_and(|items| !items.is_empty());
                match marker {
                    Marker::Close if has_items => {
                        if let Some(items) = group_items.get_mut(&final_name) {
                            let items = std::mem::take(items);
                            push_group(&mut lines, &final_name, &items, chunk_size);
                        }
                    }
                    Marker::Open | Marker::Close
                        if !has_items && options.keep_empty_groups.contains(name) =>
                    {
                        lines.push(Line::Group(final_name));
                    }
                    _ => {}
                }
            }
            Line::Empty | Line::Other(_) => lines.push(line.clone()),
        }
        continuation = None;
    }

    for (ip, hosts) in &sys_hosts {
        if hosts.is_empty() {
            continue;
        }
        lines.push(Line::Empty);
        push_hosts(&mut lines, ip, hosts, chunk_size);
    }

    for (name, items) in &group_items {
        if items.is_empty() {
            continue;
        }
        lines.push(Line::Empty);
        push_group(&mut lines, name, items, chunk_size);
    }

    lines
}

fn push_group(lines: &mut Vec<Line>, name: &str, items: &[Item], chunk_size: usize) {
    if items.is_empty() {
        return;
    }
    lines.push(Line::Group(name.to_string()));
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::Empty);
        }
        push_hosts(lines, &item.ip, &item.hosts, chunk_size);
    }
    lines.push(Line::Group(name.to_string()));
}

/// Enabled hosts first, then disabled, at most `chunk_size` per line.
fn push_hosts(lines: &mut Vec<Line>, ip: &str, hosts: &[Host], chunk_size: usize) {
    let (enabled, disabled): (Vec<&Host>, Vec<&Host>) = hosts.iter().partition(|h| h.enabled);

    for (run, enabled) in [(enabled, true), (disabled, false)] {
        for chunk in run.chunks(chunk_size) {
            lines.push(Line::Valid(ValidLine {
                ip: ip.to_string(),
                hosts: chunk.iter().map(|h| h.content.clone()).collect(),
                enabled,
            }));
        }
    }
}
