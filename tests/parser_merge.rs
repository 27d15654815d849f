//! List-to-lines merge: in-place rewrite, chunking, renames, stability.

mod common;

use std::collections::HashMap;

use hed::parser::{
    lines_to_text, list_to_lines, text_to_lines, text_to_list, Host, Item, Line, ListToLinesOptions,
    SYSTEM_GROUP,
};

fn merge_text(list: &[Item], old_text: &str, options: &ListToLinesOptions) -> String {
    let old = text_to_lines(old_text).lines;
    lines_to_text(&list_to_lines(list, &old, options))
}

fn item_of<'a>(list: &'a mut [Item], group: &str, ip: &str) -> &'a mut Item {
    list.iter_mut()
        .find(|i| i.group == group && i.ip == ip)
        .expect("item present")
}

#[test]
fn unchanged_list_reproduces_formatted_text() {
    let list = text_to_list(common::FIXTURE, None);
    let text = merge_text(&list, common::FIXTURE, &ListToLinesOptions::default());
    assert_eq!(text, common::FIXTURE_FORMATTED);
}

#[test]
fn edited_ip_is_rewritten_in_place() {
    let mut list = text_to_list(common::FIXTURE, None);
    item_of(&mut list, SYSTEM_GROUP, "1.1.1.1")
        .hosts
        .push(Host::new("d.com", true));

    let text = merge_text(&list, common::FIXTURE, &ListToLinesOptions::default());
    assert!(text.starts_with(
        "# System hosts\n127.0.0.1 localhost\n::1 localhost\n\n1.1.1.1 a.com b.com d.com\n# 1.1.1.1 c.com\n\n#[foo]\n"
    ));
}

#[test]
fn removed_ip_leaves_a_single_blank() {
    let mut list = text_to_list(common::FIXTURE, None);
    list.retain(|i| i.ip != "::1");

    let text = merge_text(&list, common::FIXTURE, &ListToLinesOptions::default());
    assert!(text.starts_with("# System hosts\n127.0.0.1 localhost\n\n1.1.1.1 a.com b.com\n"));
    assert!(!text.contains("::1"));
}

#[test]
fn new_ip_and_new_group_are_appended() {
    let mut list = text_to_list(common::FIXTURE, None);
    list.push(Item {
        ip: "5.5.5.5".to_string(),
        hosts: vec![Host::new("e.com", true)],
        group: SYSTEM_GROUP.to_string(),
    });
    list.push(Item {
        ip: "2.2.2.2".to_string(),
        hosts: vec![Host::new("foo.com", true), Host::new("bar.com", false)],
        group: "Another".to_string(),
    });

    let text = merge_text(&list, common::FIXTURE, &ListToLinesOptions::default());
    let expected_tail = "#[bar]\n4.4.4.4 x.com\n#[bar]\n\n5.5.5.5 e.com\n\n#[Another]\n2.2.2.2 foo.com\n# 2.2.2.2 bar.com\n#[Another]\n";
    assert!(text.ends_with(expected_tail), "got:\n{text}");
}

#[test]
fn group_block_separates_items_with_blanks() {
    let list = vec![
        Item {
            ip: "1.1.1.1".to_string(),
            hosts: vec![Host::new("a", true)],
            group: "g".to_string(),
        },
        Item {
            ip: "2.2.2.2".to_string(),
            hosts: vec![Host::new("b", true)],
            group: "g".to_string(),
        },
    ];
    let text = merge_text(&list, "", &ListToLinesOptions::default());
    assert_eq!(text, "#[g]\n1.1.1.1 a\n\n2.2.2.2 b\n#[g]\n");
}

#[test]
fn chunks_enabled_before_disabled() {
    let mut hosts: Vec<Host> = (0..25).map(|i| Host::new(format!("e{i}.com"), true)).collect();
    hosts.extend((0..3).map(|i| Host::new(format!("d{i}.com"), false)));
    let list = vec![Item {
        ip: "1.1.1.1".to_string(),
        hosts,
        group: SYSTEM_GROUP.to_string(),
    }];

    let lines = list_to_lines(&list, &[], &ListToLinesOptions::default());
    let valid: Vec<(usize, bool)> = lines
        .iter()
        .filter_map(|l| match l {
            Line::Valid(v) => Some((v.hosts.len(), v.enabled)),
            _ => None,
        })
        .collect();
    assert_eq!(valid, vec![(10, true), (10, true), (5, true), (3, false)]);

    let text = lines_to_text(&lines);
    let rendered: Vec<&str> = text.lines().collect();
    assert_eq!(rendered.len(), 4);
    assert!(rendered[..3].iter().all(|l| l.starts_with("1.1.1.1 e")));
    assert_eq!(rendered[3], "# 1.1.1.1 d0.com d1.com d2.com");
}

#[test]
fn chunk_size_is_configurable() {
    let list = vec![Item {
        ip: "1.1.1.1".to_string(),
        hosts: (0..5).map(|i| Host::new(format!("h{i}"), true)).collect(),
        group: SYSTEM_GROUP.to_string(),
    }];
    let options = ListToLinesOptions {
        chunk_size: 2,
        ..Default::default()
    };
    let text = merge_text(&list, "1.1.1.1 h0\n", &options);
    assert_eq!(text, "1.1.1.1 h0 h1\n1.1.1.1 h2 h3\n1.1.1.1 h4\n");
}

#[test]
fn group_rename_relabels_in_place() {
    let old = "#[foo]\n3.3.3.3 a.com\n#[foo]\n\n1.1.1.1 z\n";
    let list = text_to_list(old, None);
    let options = ListToLinesOptions {
        group_name_map: HashMap::from([("foo".to_string(), "bar".to_string())]),
        ..Default::default()
    };

    let text = merge_text(&list, old, &options);
    assert_eq!(text, "#[bar]\n3.3.3.3 a.com\n#[bar]\n\n1.1.1.1 z\n");
    assert!(!text.contains("#[foo]"));
}

#[test]
fn emptied_group_is_dropped_but_comments_and_blanks_survive() {
    let old = "#[foo]\n# keep me\n\n3.3.3.3 a.com\n\n# and me\n#[foo]\n1.1.1.1 z\n";
    let list: Vec<Item> = text_to_list(old, None)
        .into_iter()
        .filter(|i| i.group != "foo")
        .collect();

    let text = merge_text(&list, old, &ListToLinesOptions::default());
    assert_eq!(text, "# keep me\n\n# and me\n1.1.1.1 z\n");
}

#[test]
fn blank_lines_inside_group_are_kept() {
    let old = "#[g]\n# web\n\n1.1.1.1 a\n#[g]\n";
    let list = text_to_list(old, None);
    let text = merge_text(&list, old, &ListToLinesOptions::default());
    assert_eq!(text, "# web\n\n#[g]\n1.1.1.1 a\n#[g]\n");
    assert_eq!(merge_text(&list, &text, &ListToLinesOptions::default()), text);
}

#[test]
fn repeated_ip_positions_emit_once() {
    let old = "1.1.1.1 a\n# note\n1.1.1.1 b\n";
    let list = text_to_list(old, None);
    let text = merge_text(&list, old, &ListToLinesOptions::default());
    assert_eq!(text, "1.1.1.1 a b\n# note\n");
}

#[test]
fn consumed_ip_line_becomes_blank() {
    let old = "1.1.1.1 a\n1.1.1.1 b\n# c\n";
    let list = text_to_list(old, None);
    let text = merge_text(&list, old, &ListToLinesOptions::default());
    assert_eq!(text, "1.1.1.1 a b\n\n# c\n");
    assert_eq!(merge_text(&list, &text, &ListToLinesOptions::default()), text);
}

#[test]
fn regenerated_chunks_are_stable_before_comment() {
    let old = "1.1.1.1 a\n# note\n";
    let mut list = text_to_list(old, None);
    list[0].hosts.push(Host::new("c", false));

    let options = ListToLinesOptions::default();
    let first = merge_text(&list, old, &options);
    assert_eq!(first, "1.1.1.1 a\n# 1.1.1.1 c\n# note\n");
    assert_eq!(merge_text(&list, &first, &options), first);
}

#[test]
fn unclosed_marker_content_is_appended_as_system() {
    let old = "1.1.1.1 a\n#[foo]\n3.3.3.3 b\n";
    let list = text_to_list(old, None);
    assert!(list.iter().all(|i| i.group == SYSTEM_GROUP));

    let options = ListToLinesOptions::default();
    let first = merge_text(&list, old, &options);
    assert_eq!(first, "1.1.1.1 a\n\n3.3.3.3 b\n");
    assert!(!first.contains("#[foo]"));

    assert_eq!(merge_text(&list, &first, &options), first);
    assert_eq!(text_to_list(&first, None), list);
}

#[test]
fn kept_empty_group_stays_in_place() {
    let old = "#[a]\n# todo\n#[a]\n\n#[b]\n#[b]\n";
    let options = ListToLinesOptions {
        group_name_map: HashMap::from([("a".to_string(), "c".to_string())]),
        keep_empty_groups: ["a".to_string()].into_iter().collect(),
        ..Default::default()
    };
    let text = merge_text(&[], old, &options);
    assert_eq!(text, "#[c]\n# todo\n#[c]\n");
}

#[test]
fn merge_is_idempotent() {
    let mut list = text_to_list(common::FIXTURE, None);
    item_of(&mut list, SYSTEM_GROUP, "1.1.1.1")
        .hosts
        .extend((0..10).map(|i| Host::new(format!("n{i}.com"), true)));
    item_of(&mut list, "foo", "3.3.3.3")
        .hosts
        .push(Host::new("d.com", true));
    list.retain(|i| i.ip != "127.0.0.1");
    list.push(Item {
        ip: "9.9.9.9".to_string(),
        hosts: vec![Host::new("new.com", false)],
        group: "fresh".to_string(),
    });

    let options = ListToLinesOptions::default();
    let first_lines = list_to_lines(&list, &text_to_lines(common::FIXTURE).lines, &options);
    let first = lines_to_text(&first_lines);

    let again = lines_to_text(&list_to_lines(&list, &first_lines, &options));
    assert_eq!(again, first);

    // Same through a text round trip.
    assert_eq!(merge_text(&list, &first, &options), first);
    assert_eq!(flatten(&text_to_list(&first, None)), flatten(&list));
}

/// Sorted `(group, ip, host, enabled)` tuples; chunking reorders hosts by state.
fn flatten(list: &[Item]) -> Vec<(String, String, String, bool)> {
    let mut out: Vec<_> = list
        .iter()
        .flat_map(|i| {
            i.hosts
                .iter()
                .map(|h| (i.group.clone(), i.ip.clone(), h.content.clone(), h.enabled))
        })
        .collect();
    out.sort();
    out
}
