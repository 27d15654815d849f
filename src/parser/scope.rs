//! Group marker pairing shared by the list builder, group extractor and merger.
//!
//! A marker opens a scope when no scope is open and its name has not been
//! closed before. The next marker with the same name closes it. While a scope
//! is open, markers with other names are inert, and a name that was already
//! closed once never reopens.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
    Open,
    Close,
    Ignored,
}

#[derive(Debug, Default)]
pub(crate) struct GroupScope {
    current: Option<String>,
    closed: HashSet<String>,
}

impl GroupScope {
    pub(crate) fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub(crate) fn visit(&mut self, name: &str) -> Marker {
        let closes = match self.current.as_deref() {
            Some(current) if current == name => true,
            Some(_) => return Marker::Ignored,
            None => false,
        };

        if closes {
            self.current = None;
            self.closed.insert(name.to_string());
            Marker::Close
        } else if self.closed.contains(name) {
            Marker::Ignored
        } else {
            self.current = Some(name.to_string());
            Marker::Open
        }
    }
}
