//! List builder: classified lines into deduplicated items.

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::hash::Hash;

use super::lines::Line;
use super::model::{Host, Item, SYSTEM_GROUP};
use super::scope::{GroupScope, Marker};

/// Fold lines into items, one per `(group, ip)`.
///
/// With `specified_group`, every mapping belongs to that group and markers are
/// not interpreted (the lines are a group's own text). Without it, markers
/// scope the mappings between them; a group left open at the end of input is
/// salvaged into `System`.
pub fn lines_to_list(lines: &[Line], specified_group: Option<&str>) -> Vec<Item> {
    let mut items = match specified_group {
        Some(group) => scoped(lines, group),
        None => unscoped(lines),
    };
    for item in &mut items {
        item.dedup_hosts();
    }
    items
}

fn scoped(lines: &[Line], group: &str) -> Vec<Item> {
    let mut items: IndexMap<String, Item> = IndexMap::new();
    for line in lines {
        if let Line::Valid(valid) = line {
            let item = Item {
                ip: valid.ip.clone(),
                hosts: to_hosts(&valid.hosts, valid.enabled),
                group: group.to_string(),
            };
            merge(&mut items, valid.ip.clone(), item);
        }
    }
    items.into_values().collect()
}

fn unscoped(lines: &[Line]) -> Vec<Item> {
    let mut items: IndexMap<(String, String), Item> = IndexMap::new();
    // Mappings of the open group, keyed by ip, until its closing marker.
    let mut pending: IndexMap<String, Item> = IndexMap::new();
    let mut scope = GroupScope::default();

    for line in lines {
        match line {
            Line::Valid(valid) => {
                let group = scope.current().unwrap_or(SYSTEM_GROUP).to_string();
                let item = Item {
                    ip: valid.ip.clone(),
                    hosts: to_hosts(&valid.hosts, valid.enabled),
                    group,
                };
                if scope.current().is_some() {
                    merge(&mut pending, valid.ip.clone(), item);
                } else {
                    merge(&mut items, (SYSTEM_GROUP.to_string(), valid.ip.clone()), item);
                }
            }
            Line::Group(name) => {
                if scope.visit(name) == Marker::Close {
                    for (ip, item) in pending.drain(..) {
                        merge(&mut items, (name.clone(), ip), item);
                    }
                }
            }
            Line::Empty | Line::Other(_) => {}
        }
    }

    for (ip, mut item) in pending {
        item.group = SYSTEM_GROUP.to_string();
        merge(&mut items, (SYSTEM_GROUP.to_string(), ip), item);
    }

    items.into_values().collect()
}

fn to_hosts(hosts: &[String], enabled: bool) -> Vec<Host> {
    hosts.iter().map(|h| Host::new(h.clone(), enabled)).collect()
}

fn merge<K: Hash + Eq>(map: &mut IndexMap<K, Item>, key: K, item: Item) {
    match map.entry(key) {
        Entry::Occupied(mut e) => e.get_mut().hosts.extend(item.hosts),
        Entry::Vacant(e) => {
            e.insert(item);
        }
    }
}
