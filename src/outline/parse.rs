//! Recursive descent parser for breadboard outlines.
//!
//! The grammar is line based. An unindented line that is not a list item opens
//! a place; the list items that follow form its item tree, nested by
//! indentation. Parsing never fails: lines that fit nowhere are skipped and,
//! when asked for, reported as [`Diagnostic`]s.

use super::ast::{Diagnostic, DiagnosticKind, Item, ItemKind, Link, OutlineDocument, Place, PlaceKind};

/// Token that separates a label from its link target.
pub const LINK_ARROW: &str = "=>";

/// Parse outline text into a document.
#[must_use]
pub fn parse(input: &str) -> OutlineDocument {
    parse_with_diagnostics(input).0
}

/// Parse outline text, also returning the lines that were skipped or
/// reinterpreted.
#[must_use]
pub fn parse_with_diagnostics(input: &str) -> (OutlineDocument, Vec<Diagnostic>) {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let lines: Vec<&str> = input.lines().collect();
    let mut places = Vec::new();
    let mut links = Vec::new();
    let mut diagnostics = Vec::new();
    let mut pos = 0;

    while pos < lines.len() {
        let line = lines[pos];

        if is_blank(line) {
            pos += 1;
            continue;
        }

        if indent_of(line) == 0 && !is_list_item(line) {
            let place = parse_place(&lines, &mut pos, places.len(), &mut diagnostics);
            collect_links(&place.items, &mut links);
            places.push(place);
            continue;
        }

        // Not part of any place's item run.
        let kind = if is_list_item(line) {
            DiagnosticKind::OrphanItem
        } else {
            DiagnosticKind::StrayLine
        };
        diagnostics.push(Diagnostic { line: pos, kind, text: line.trim().to_owned() });
        pos += 1;
    }

    tracing::debug!(
        places = places.len(),
        links = links.len(),
        diagnostics = diagnostics.len(),
        "parsed outline"
    );

    (OutlineDocument { places, links }, diagnostics)
}

/// Parse a place header at `pos` and the item run beneath it.
fn parse_place(lines: &[&str], pos: &mut usize, index: usize, diagnostics: &mut Vec<Diagnostic>) -> Place {
    let header_line = *pos;
    let header = decompose(lines[header_line]);
    if header.link.is_some() {
        diagnostics.push(Diagnostic {
            line: header_line,
            kind: DiagnosticKind::PlaceLinkIgnored,
            text: lines[header_line].trim().to_owned(),
        });
    }
    *pos += 1;

    let items = match next_non_blank(lines, *pos) {
        Some(first) if is_list_item(lines[first]) => {
            *pos = first;
            parse_items(lines, pos, indent_of(lines[first]), diagnostics)
        }
        _ => Vec::new(),
    };

    Place { id: format!("place-{index}"), text: header.label, kind: PlaceKind::from_item_kind(header.kind), items }
}

/// Parse a run of sibling items whose indentation is `base`.
///
/// Stops, without consuming the line, at the first non-blank line that is
/// shallower than `base` or is not a list item.
fn parse_items(lines: &[&str], pos: &mut usize, base: usize, diagnostics: &mut Vec<Diagnostic>) -> Vec<Item> {
    let mut items = Vec::new();
    let mut sibling = 0;

    while *pos < lines.len() {
        let line = lines[*pos];

        if is_blank(line) {
            *pos += 1;
            continue;
        }

        let depth = indent_of(line);
        if depth < base || !is_list_item(line) {
            break;
        }

        if depth > base {
            diagnostics.push(Diagnostic {
                line: *pos,
                kind: DiagnosticKind::SkippedItem,
                text: line.trim().to_owned(),
            });
            *pos += 1;
            continue;
        }

        if is_separator(line) {
            items.push(Item {
                id: format!("separator-{line_no}", line_no = *pos),
                text: String::new(),
                kind: ItemKind::Item,
                children: Vec::new(),
                link: None,
                is_separator: true,
                depth,
            });
            *pos += 1;
            continue;
        }

        let line_no = *pos;
        let parts = decompose(list_content(line).unwrap_or_default());
        *pos += 1;

        let children = match next_non_blank(lines, *pos) {
            Some(next) if is_list_item(lines[next]) && indent_of(lines[next]) > depth => {
                *pos = next;
                parse_items(lines, pos, indent_of(lines[next]), diagnostics)
            }
            _ => Vec::new(),
        };

        items.push(Item {
            id: format!("item-{line_no}-{sibling}"),
            text: parts.label,
            kind: parts.kind,
            children,
            link: parts.link,
            is_separator: false,
            depth,
        });
        sibling += 1;
    }

    items
}

/// Append a link for every linked item, pre-order.
fn collect_links(items: &[Item], links: &mut Vec<Link>) {
    for item in items {
        if let Some(to) = &item.link {
            links.push(Link { from: item.id.clone(), to: to.clone() });
        }
        collect_links(&item.children, links);
    }
}

/// A line's content split into label, kind and optional link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineParts {
    pub label: String,
    pub kind: ItemKind,
    pub link: Option<String>,
}

/// Decompose line content into label, kind and link.
///
/// The link arrow is split off first; then a `[]` or `()` prefix, or else a
/// `.kind` suffix, decides the kind. At most one of those applies.
#[must_use]
pub fn decompose(content: &str) -> LineParts {
    let (label, link) = split_link(content.trim());

    let (label, kind) = if let Some(rest) = label.strip_prefix("[]") {
        (rest.trim(), ItemKind::Checkbox)
    } else if let Some(rest) = label.strip_prefix("()") {
        (rest.trim(), ItemKind::Radio)
    } else if let Some((stem, kind)) = split_kind_suffix(label) {
        (stem, kind)
    } else {
        (label, ItemKind::Item)
    };

    LineParts { label: label.to_owned(), kind, link: link.map(ToOwned::to_owned) }
}

/// Split `label => target` at the first arrow with text on both sides.
fn split_link(text: &str) -> (&str, Option<&str>) {
    for (idx, _) in text.match_indices(LINK_ARROW) {
        if idx == 0 {
            continue;
        }
        let target = text[idx + LINK_ARROW.len()..].trim();
        if target.is_empty() {
            continue;
        }
        return (text[..idx].trim(), Some(target));
    }
    (text, None)
}

/// Split `Label.kind` when `kind` is one of the declarable kinds.
fn split_kind_suffix(label: &str) -> Option<(&str, ItemKind)> {
    let (stem, suffix) = label.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    ItemKind::SUFFIXES
        .iter()
        .find(|(name, _)| *name == suffix)
        .map(|&(_, kind)| (stem.trim(), kind))
}

/// Count of leading whitespace characters. Tabs count as one.
#[must_use]
pub fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Whether the line is `- <content>` after optional indentation.
#[must_use]
pub fn is_list_item(line: &str) -> bool {
    list_content(line).is_some()
}

/// Whether the line is a list item whose content is three or more hyphens.
#[must_use]
pub fn is_separator(line: &str) -> bool {
    list_content(line).is_some_and(|content| {
        let content = content.trim();
        content.len() >= 3 && content.chars().all(|c| c == '-')
    })
}

/// Content after the `- ` marker, or `None` if the line is not a list item.
fn list_content(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('-')?;
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => Some(chars.as_str()),
        _ => None,
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn next_non_blank(lines: &[&str], from: usize) -> Option<usize> {
    (from..lines.len()).find(|&i| !is_blank(lines[i]))
}
