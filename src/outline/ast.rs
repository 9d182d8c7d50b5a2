//! Document types produced by the outline parser.

use serde::{Deserialize, Serialize};

/// A parsed outline: places in appearance order plus every declared link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineDocument {
    #[serde(rename = "nodes")]
    pub places: Vec<Place>,
    pub links: Vec<Link>,
}

/// A top-level screen, page, component or dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: PlaceKind,
    pub items: Vec<Item>,
}

/// One element inside a place. Items nest by indentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub children: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_separator: bool,
    /// Indentation the item was parsed at.
    pub depth: usize,
}

/// A navigation link from an item to a place or item named by `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub from: String,
    pub to: String,
}

/// Kind of a top-level place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    #[default]
    Place,
    Page,
    Component,
    Dialog,
}

/// Kind of an item line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Item,
    Input,
    Button,
    Checkbox,
    Radio,
    Page,
    Component,
    Dialog,
}

impl PlaceKind {
    /// Place kind for a header whose label decomposed to `kind`.
    ///
    /// Only the place-level kinds survive; anything else falls back to
    /// [`PlaceKind::Place`].
    #[must_use]
    pub fn from_item_kind(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Page => Self::Page,
            ItemKind::Component => Self::Component,
            ItemKind::Dialog => Self::Dialog,
            _ => Self::Place,
        }
    }
}

impl ItemKind {
    /// Kinds that may be declared with a `.suffix` on the label.
    pub const SUFFIXES: [(&'static str, ItemKind); 5] = [
        ("input", ItemKind::Input),
        ("button", ItemKind::Button),
        ("page", ItemKind::Page),
        ("component", ItemKind::Component),
        ("dialog", ItemKind::Dialog),
    ];
}

impl Item {
    /// Visit this item and its descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Item)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

impl Place {
    /// All items of this place, depth-first in document order.
    #[must_use]
    pub fn items_preorder(&self) -> Vec<&Item> {
        let mut out = Vec::new();
        for item in &self.items {
            item.walk(&mut |i| out.push(i));
        }
        out
    }
}

/// Something the parser skipped or reinterpreted.
///
/// Diagnostics are advisory; the document is identical with or without them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Zero-based source line.
    pub line: usize,
    pub kind: DiagnosticKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A list item before any place header.
    OrphanItem,
    /// An indented line that is not a list item and sits outside any item run.
    StrayLine,
    /// A list item deeper than its run's base that does not follow an item.
    SkippedItem,
    /// A place header carrying `=>`; places cannot link.
    PlaceLinkIgnored,
}
