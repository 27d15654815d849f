//! Whole-file editing operations.
//!
//! Each operation parses the full text, edits the item list (every item
//! carries its group) and merges it back over the old text, so comments and
//! layout around untouched entries are kept.

use std::collections::{HashMap, HashSet};

use crate::error::HedError;
use crate::parser::{
    self, is_group, is_ip, list_to_text, text_to_groups, text_to_list, Host, Item,
    ListToLinesOptions, ListToTextOptions, DEFAULT_CHUNK_SIZE, SYSTEM_GROUP,
};

type EditResult = Result<String, HedError>;

#[derive(Debug, Clone, Copy)]
pub struct EditOptions {
    /// Hosts per generated line.
    pub chunk_size: usize,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Restricts host operations to one group and/or one IP.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFilter<'a> {
    pub group: Option<&'a str>,
    pub ip: Option<&'a str>,
}

impl HostFilter<'_> {
    fn matches(&self, item: &Item) -> bool {
        self.group.map_or(true, |g| item.group == g) && self.ip.map_or(true, |ip| item.ip == ip)
    }
}

pub fn validate_host(host: &str) -> Result<(), HedError> {
    if host.is_empty() || host.contains('#') || host.chars().any(char::is_whitespace) {
        return Err(HedError::InvalidHost(host.to_string()));
    }
    Ok(())
}

pub fn validate_group_name(name: &str) -> Result<(), HedError> {
    if name.trim() == SYSTEM_GROUP {
        return Err(HedError::ReservedGroup);
    }
    let clean = !name.chars().any(|c| c.is_whitespace() || matches!(c, '#' | '[' | ']'));
    if !clean || !is_group(&format!("#[{name}]")) {
        return Err(HedError::InvalidGroupName(name.to_string()));
    }
    Ok(())
}

/// Names of the matched groups in `text`, in file order.
pub fn group_names(text: &str) -> Vec<String> {
    text_to_groups(text)
        .into_iter()
        .filter(|g| !g.is_system())
        .map(|g| g.name)
        .collect()
}

fn ensure_group(text: &str, name: &str) -> Result<(), HedError> {
    if group_names(text).iter().any(|g| g == name) {
        Ok(())
    } else {
        Err(HedError::GroupNotFound(name.to_string()))
    }
}

/// Groups of `text` without mappings.
fn empty_groups(text: &str) -> HashSet<String> {
    text_to_groups(text)
        .into_iter()
        .filter(|g| !g.is_system() && g.list.is_empty())
        .map(|g| g.name)
        .collect()
}

/// Merge `items` back over `text`. Groups that were already empty keep their
/// markers unless listed in `dropped`.
fn merge(
    items: &[Item],
    text: &str,
    options: EditOptions,
    renames: HashMap<String, String>,
    dropped: Option<&str>,
) -> String {
    let mut keep = empty_groups(text);
    if let Some(name) = dropped {
        keep.remove(name);
    }
    let options = ListToTextOptions {
        specified_group: None,
        merge: ListToLinesOptions {
            group_name_map: renames,
            chunk_size: options.chunk_size,
            keep_empty_groups: keep,
        },
    };
    list_to_text(items, text, &options)
}

/// Map `hosts` to `ip` in `group` (`System` for top level). Hosts already
/// mapped there take the new enabled state.
pub fn add_hosts(
    text: &str,
    group: &str,
    ip: &str,
    hosts: &[String],
    enabled: bool,
    options: EditOptions,
) -> EditResult {
    if !is_ip(ip) {
        return Err(HedError::InvalidIp(ip.to_string()));
    }
    for host in hosts {
        validate_host(host)?;
    }
    if group != SYSTEM_GROUP {
        validate_group_name(group)?;
    }

    let mut items = text_to_list(text, None);
    let idx = match items.iter().position(|i| i.group == group && i.ip == ip) {
        Some(idx) => idx,
        None => {
            items.push(Item {
                ip: ip.to_string(),
                hosts: Vec::new(),
                group: group.to_string(),
            });
            items.len() - 1
        }
    };

    let item = &mut items[idx];
    for host in hosts {
        match item.hosts.iter_mut().find(|h| h.content == *host) {
            Some(existing) => existing.enabled = enabled,
            None => item.hosts.push(Host::new(host.clone(), enabled)),
        }
    }

    Ok(merge(&items, text, options, HashMap::new(), None))
}

/// Remove `host` from every matching item; items left empty disappear.
pub fn remove_host(text: &str, host: &str, filter: HostFilter<'_>, options: EditOptions) -> EditResult {
    let mut items = text_to_list(text, None);
    let mut removed = 0;
    for item in items.iter_mut().filter(|i| filter.matches(i)) {
        let before = item.hosts.len();
        item.hosts.retain(|h| h.content != host);
        removed += before - item.hosts.len();
    }
    if removed == 0 {
        return Err(HedError::HostNotFound(host.to_string()));
    }
    items.retain(|i| !i.hosts.is_empty());
    Ok(merge(&items, text, options, HashMap::new(), None))
}

pub fn set_host_enabled(
    text: &str,
    host: &str,
    enabled: bool,
    filter: HostFilter<'_>,
    options: EditOptions,
) -> EditResult {
    let mut items = text_to_list(text, None);
    let mut found = false;
    for item in items.iter_mut().filter(|i| filter.matches(i)) {
        for h in item.hosts.iter_mut().filter(|h| h.content == host) {
            h.enabled = enabled;
            found = true;
        }
    }
    if !found {
        return Err(HedError::HostNotFound(host.to_string()));
    }
    Ok(merge(&items, text, options, HashMap::new(), None))
}

/// Append an empty `#[name]` pair. Later edits keep it in place.
pub fn create_group(text: &str, name: &str) -> EditResult {
    validate_group_name(name)?;
    if group_names(text).iter().any(|g| g == name) {
        return Err(HedError::GroupExists(name.to_string()));
    }

    let mut out = text.trim_end_matches(['\n', '\r']).to_string();
    if !out.is_empty() {
        out.push_str("\n\n");
    }
    out.push_str(&format!("#[{name}]\n#[{name}]\n"));
    Ok(out)
}

/// Relabel a group's markers in place.
pub fn rename_group(text: &str, old: &str, new: &str, options: EditOptions) -> EditResult {
    ensure_group(text, old)?;
    if old == new {
        return Ok(text.to_string());
    }
    validate_group_name(new)?;
    if group_names(text).iter().any(|g| g == new) {
        return Err(HedError::GroupExists(new.to_string()));
    }

    let items = text_to_list(text, None);
    let renames = HashMap::from([(old.to_string(), new.to_string())]);
    Ok(merge(&items, text, options, renames, None))
}

pub fn remove_group(text: &str, name: &str, options: EditOptions) -> EditResult {
    ensure_group(text, name)?;
    let mut items = text_to_list(text, None);
    items.retain(|i| i.group != name);
    Ok(merge(&items, text, options, HashMap::new(), Some(name)))
}

/// Enable or disable every host in a group.
pub fn set_group_enabled(text: &str, name: &str, enabled: bool, options: EditOptions) -> EditResult {
    ensure_group(text, name)?;
    let mut items = text_to_list(text, None);
    for item in items.iter_mut().filter(|i| i.group == name) {
        for host in &mut item.hosts {
            host.enabled = enabled;
        }
    }
    Ok(merge(&items, text, options, HashMap::new(), None))
}

/// Replace a group's inner text.
pub fn set_group_text(text: &str, name: &str, group_text: &str) -> EditResult {
    ensure_group(text, name)?;
    Ok(parser::replace_group_text(name, group_text, text))
}
