//! Hosts-file text model.
//!
//! Text is tokenized into [`Line`]s, folded into [`Item`]s and [`Group`]s,
//! and an edited item list is merged back over the old lines so comments and
//! layout around untouched entries survive. Nothing here fails: malformed
//! input degrades to `other` lines, `System` items or a no-op splice.

mod groups;
mod ip;
mod lines;
mod list;
mod merge;
mod model;
mod scope;
mod text;

pub use groups::{replace_group_text, text_to_groups};
pub use ip::is_ip;
pub use lines::{is_group, split_lines, text_to_lines, Line, TextLines, ValidLine};
pub use list::lines_to_list;
pub use merge::{list_to_lines, ListToLinesOptions, DEFAULT_CHUNK_SIZE};
pub use model::{Group, Host, Item, Range, SYSTEM_GROUP};
pub(crate) use scope::{GroupScope, Marker};
pub use text::lines_to_text;

#[derive(Debug, Clone, Default)]
pub struct ListToTextOptions {
    /// Treat `old_text` as the inner text of this group.
    pub specified_group: Option<String>,
    pub merge: ListToLinesOptions,
}

/// Merge `list` over `old_text` and render the result.
///
/// With a specified group, the old text is framed by that group's markers for
/// the merge and the markers are stripped from the output again.
pub fn list_to_text(list: &[Item], old_text: &str, options: &ListToTextOptions) -> String {
    let mut lines = text_to_lines(old_text).lines;
    if let Some(group) = &options.specified_group {
        lines.insert(0, Line::Group(group.clone()));
        lines.push(Line::Group(group.clone()));
    }

    let mut new_lines = list_to_lines(list, &lines, &options.merge);
    if options.specified_group.is_some() {
        new_lines.retain(|line| !matches!(line, Line::Group(_)));
    }
    lines_to_text(&new_lines)
}

pub fn text_to_list(text: &str, group: Option<&str>) -> Vec<Item> {
    lines_to_list(&text_to_lines(text).lines, group)
}

/// Tokenize and re-serialize without edits.
pub fn format(text: &str) -> String {
    lines_to_text(&text_to_lines(text).lines)
}
