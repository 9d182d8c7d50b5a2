//! Property tests for the outline parser and link coloring.

use std::collections::HashSet;

use proptest::prelude::*;

use super::ast::{Item, PlaceKind};
use super::parse::indent_of;
use super::{parse, resolve_links};
use crate::theme::Theme;

const SUFFIXES: [&str; 6] = ["", ".input", ".button", ".page", ".component", ".dialog"];

#[derive(Debug, Clone)]
struct ItemLine {
    level_pick: usize,
    label: String,
    suffix: usize,
    link: Option<String>,
}

fn item_line() -> impl Strategy<Value = ItemLine> {
    (0usize..8, "[A-Z][a-z]{1,8}", 0usize..SUFFIXES.len(), prop::option::of("[A-Z][a-z]{1,8}"))
        .prop_map(|(level_pick, label, suffix, link)| ItemLine { level_pick, label, suffix, link })
}

fn outline() -> impl Strategy<Value = String> {
    prop::collection::vec(("[A-Z][a-z]{1,8}", prop::collection::vec(item_line(), 0..8)), 0..6).prop_map(
        |places| {
            let mut out = String::new();
            for (header, items) in places {
                out.push_str(&header);
                out.push('\n');
                let mut level = 0usize;
                for (i, line) in items.iter().enumerate() {
                    // First item is at level 0; later ones may go at most one deeper.
                    level = if i == 0 { 0 } else { line.level_pick % (level + 2) };
                    out.push_str(&"  ".repeat(level));
                    out.push_str("- ");
                    out.push_str(&line.label);
                    out.push_str(SUFFIXES[line.suffix]);
                    if let Some(target) = &line.link {
                        out.push_str(" => ");
                        out.push_str(target);
                    }
                    out.push('\n');
                }
                out.push('\n');
            }
            out
        },
    )
}

fn line_of(id: &str) -> usize {
    let rest = id.strip_prefix("item-").or_else(|| id.strip_prefix("separator-")).unwrap();
    rest.split('-').next().unwrap().parse().unwrap()
}

fn check_depths(items: &[Item], lines: &[&str], parent_depth: Option<usize>) {
    for item in items {
        assert_eq!(item.depth, indent_of(lines[line_of(&item.id)]));
        if let Some(parent) = parent_depth {
            assert!(item.depth > parent);
        }
        check_depths(&item.children, lines, Some(item.depth));
    }
}

proptest! {
    #[test]
    fn parse_is_deterministic(text in outline()) {
        prop_assert_eq!(parse(&text), parse(&text));
    }

    #[test]
    fn depth_matches_source_indentation(text in outline()) {
        let doc = parse(&text);
        let lines: Vec<&str> = text.lines().collect();
        for place in &doc.places {
            check_depths(&place.items, &lines, None);
        }
    }

    #[test]
    fn ids_are_unique(text in outline()) {
        let doc = parse(&text);
        let mut seen = HashSet::new();
        for place in &doc.places {
            prop_assert!(seen.insert(place.id.clone()));
            for item in place.items_preorder() {
                prop_assert!(seen.insert(item.id.clone()));
            }
        }
    }

    #[test]
    fn every_link_comes_from_a_linked_item(text in outline()) {
        let doc = parse(&text);
        let linked: Vec<(String, String)> = doc
            .places
            .iter()
            .flat_map(|p| p.items_preorder())
            .filter_map(|i| i.link.clone().map(|to| (i.id.clone(), to)))
            .collect();
        let links: Vec<(String, String)> = doc.links.iter().map(|l| (l.from.clone(), l.to.clone())).collect();
        prop_assert_eq!(links, linked);
        prop_assert!(doc.links.iter().all(|l| !l.from.is_empty()));
    }

    #[test]
    fn flat_outline_round_trips(places in prop::collection::vec(("[A-Z][a-z]{1,8}", 0usize..4), 1..8)) {
        const KINDS: [(&str, PlaceKind); 4] = [
            ("", PlaceKind::Place),
            (".page", PlaceKind::Page),
            (".component", PlaceKind::Component),
            (".dialog", PlaceKind::Dialog),
        ];
        let text: String = places.iter().map(|(name, k)| format!("{name}{}\n", KINDS[*k].0)).collect();
        let doc = parse(&text);
        let suffix_of = |kind: PlaceKind| {
            KINDS.iter().find(|(_, k)| *k == kind).map_or("", |(suffix, _)| *suffix)
        };
        let rebuilt: String = doc
            .places
            .iter()
            .map(|p| format!("{}{}\n", p.text, suffix_of(p.kind)))
            .collect();
        let reparsed = parse(&rebuilt);
        let got: Vec<(String, PlaceKind)> = reparsed.places.iter().map(|p| (p.text.clone(), p.kind)).collect();
        let want: Vec<(String, PlaceKind)> = places.iter().map(|(name, k)| (name.clone(), KINDS[*k].1)).collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn link_colors_depend_only_on_index(count in 0usize..25, a in "[A-Z][a-z]{1,8}", b in "[A-Z][a-z]{1,8}") {
        let build = |label: &str| {
            let mut text = String::from("Hub\n");
            for i in 0..count {
                text.push_str(&format!("- {label}{i} => {label}\n"));
            }
            text
        };
        let palette = Theme::default().edge_palette;
        let first = resolve_links(&parse(&build(&a)), &palette).unwrap();
        let second = resolve_links(&parse(&build(&b)), &palette).unwrap();
        let first_colors: Vec<&str> = first.iter().map(|l| l.color.as_str()).collect();
        let second_colors: Vec<&str> = second.iter().map(|l| l.color.as_str()).collect();
        prop_assert_eq!(first_colors, second_colors);
    }
}
