//! Structured hosts data: hosts, items, groups.

use serde::{Deserialize, Serialize};

/// Reserved name of the implicit top-level group.
pub const SYSTEM_GROUP: &str = "System";

/// One hostname mapped by an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub content: String,
    pub enabled: bool,
}

impl Host {
    pub fn new(content: impl Into<String>, enabled: bool) -> Self {
        Self {
            content: content.into(),
            enabled,
        }
    }
}

/// All hostnames mapped to one IP within one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub ip: String,
    pub hosts: Vec<Host>,
    pub group: String,
}

impl Item {
    pub fn is_system(&self) -> bool {
        self.group == SYSTEM_GROUP
    }

    /// Drop later hosts whose content was already seen.
    pub(crate) fn dedup_hosts(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.hosts.retain(|h| seen.insert(h.content.clone()));
    }
}

/// A named block of the hosts file with its own text and items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub text: String,
    pub list: Vec<Item>,
}

impl Group {
    pub fn is_system(&self) -> bool {
        self.name == SYSTEM_GROUP
    }
}

/// Half-open line index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}
