//! Hosts file read/edit/write on top of a [`HostsStore`].

use anyhow::Result;

use crate::config::LineEnding;
use crate::error::HedError;
use crate::history::History;
use crate::parser::{self, Group, Item, SYSTEM_GROUP};
use crate::platform::HostsStore;

/// One hosts file plus where its snapshots go.
pub struct HostsSession<'a> {
    store: &'a dyn HostsStore,
    history: Option<&'a History>,
    line_ending: LineEnding,
}

impl<'a> HostsSession<'a> {
    pub fn new(store: &'a dyn HostsStore) -> Self {
        Self {
            store,
            history: None,
            line_ending: LineEnding::Lf,
        }
    }

    pub fn with_history(mut self, history: &'a History) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn store(&self) -> &dyn HostsStore {
        self.store
    }

    pub fn read(&self) -> Result<String> {
        self.store.read()
    }

    /// `[System, ...groups]` of the current file.
    pub fn groups(&self) -> Result<Vec<Group>> {
        Ok(parser::text_to_groups(&self.read()?))
    }

    /// Items of `group`, or every item when `group` is `None` or `System`.
    pub fn list(&self, group: Option<&str>) -> Result<Vec<Item>> {
        let mut items = parser::text_to_list(&self.read()?, None);
        if let Some(g) = group.filter(|g| *g != SYSTEM_GROUP) {
            items.retain(|i| i.group == g);
        }
        Ok(items)
    }

    /// Inner text of `group`; the whole file for `System`.
    pub fn group_text(&self, group: &str) -> Result<String> {
        self.groups()?
            .into_iter()
            .find(|g| g.name == group)
            .map(|g| g.text)
            .ok_or_else(|| HedError::GroupNotFound(group.to_string()).into())
    }

    /// Run `edit` on the current text and write the result if it differs.
    /// The previous content is recorded in history first.
    pub fn apply<F>(&self, edit: F) -> Result<bool>
    where
        F: FnOnce(&str) -> Result<String, HedError>,
    {
        let old = self.read()?;
        let new = edit(&old)?;
        self.replace(&old, &new)
    }

    /// Normalize spacing and blank lines without changing content.
    pub fn format(&self) -> Result<bool> {
        self.apply(|text| Ok(parser::format(text)))
    }

    /// Write snapshot `index` back.
    pub fn restore(&self, index: usize) -> Result<bool> {
        let history = self
            .history
            .ok_or_else(|| anyhow::anyhow!("history is not available"))?;
        let entry = history.get(index)?;
        let old = self.read()?;
        self.replace(&old, &entry.content)
    }

    fn replace(&self, old: &str, new: &str) -> Result<bool> {
        let new = self.line_ending.apply(new);
        if new == old {
            tracing::debug!("{} unchanged", self.store.location());
            return Ok(false);
        }

        if let Some(history) = self.history {
            if let Err(e) = history.record(old) {
                tracing::warn!("could not record hosts history: {e:#}");
            }
        }

        self.store.write(&new)?;
        tracing::debug!("wrote {} bytes to {}", new.len(), self.store.location());
        Ok(true)
    }
}
