//! Layout engine: converts a parsed outline into positioned render nodes,
//! colored handles and edges.
//!
//! Link handling runs as two pure passes. [`resolve_links`] builds an
//! immutable table assigning each link its palette color and resolved target;
//! [`layout`] then maps that table onto node handles and edge records.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::ast::{Item, OutlineDocument, PlaceKind};
use crate::theme::Theme;

// Layout constants (in logical pixels).
const PLACE_X: f64 = 50.0;
const FIRST_PLACE_Y: f64 = 50.0;
const PLACE_BASE_HEIGHT: f64 = 80.0;
const ITEM_ROW_HEIGHT: f64 = 50.0;
const VERTICAL_SPACING: f64 = 40.0;

/// Node type the renderer registers for place nodes.
pub const PLACE_NODE_TYPE: &str = "breadboardPlace";

/// Error returned by [`layout`].
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Link colors are drawn from the palette, so it must not be empty.
    #[error("theme edge palette is empty")]
    EmptyPalette,
}

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Nodes and edges ready for a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

/// One place, positioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    pub data: PlaceData,
}

/// Everything the renderer needs to draw a place node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceData {
    pub label: String,
    pub node_type: PlaceKind,
    pub items: Vec<Item>,
    pub place_id: String,
    /// Ids of items in this place that some link resolved to.
    pub link_targets: Vec<String>,
    pub has_incoming_links: bool,
    /// Handles attached to this place or its items, ordered by id.
    pub handles: Vec<Handle>,
    pub dark_mode: bool,
}

/// A colored connection point on a place or one of its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handle {
    pub id: String,
    pub kind: HandleKind,
    /// Item or place the handle is drawn on.
    pub owner: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    /// Outbound handle on an item that declares a link.
    Source,
    /// Inbound handle on an item named by a link.
    ItemTarget,
    /// Inbound handle on a place named by a link.
    PlaceTarget,
}

/// A drawn link between two places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderEdge {
    pub id: String,
    pub source: String,
    pub source_handle: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    pub color: String,
}

/// What a link's `to` text resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Place { place_id: String },
    Item { place_id: String, item_id: String },
}

impl LinkTarget {
    #[must_use]
    pub fn place_id(&self) -> &str {
        match self {
            Self::Place { place_id } | Self::Item { place_id, .. } => place_id,
        }
    }
}

/// One row of the link resolution table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Position of the link in the document's link list.
    pub index: usize,
    pub from: String,
    pub to: String,
    pub color: String,
    /// Place owning the `from` item.
    pub source_place: Option<String>,
    pub target: Option<LinkTarget>,
}

/// Lay out a parsed outline.
///
/// Places are stacked top to bottom in document order. Links that name
/// nothing keep their source handle but produce no edge.
///
/// # Errors
///
/// Returns [`LayoutError::EmptyPalette`] if `theme` has no edge colors.
pub fn layout(doc: &OutlineDocument, theme: &Theme) -> Result<Graph, LayoutError> {
    let resolved = resolve_links(doc, &theme.edge_palette)?;
    let mut handles = collect_handles(&resolved);

    let mut nodes = Vec::with_capacity(doc.places.len());
    let mut y = FIRST_PLACE_Y;
    for place in &doc.places {
        let place_handles: Vec<Handle> = handles
            .remove(place.id.as_str())
            .map(|by_id| by_id.into_values().collect())
            .unwrap_or_default();

        let link_targets: BTreeSet<String> = place_handles
            .iter()
            .filter(|h| h.kind == HandleKind::ItemTarget)
            .map(|h| h.owner.clone())
            .collect();
        let has_incoming_links = place_handles.iter().any(|h| h.kind == HandleKind::PlaceTarget);

        nodes.push(RenderNode {
            id: place.id.clone(),
            node_type: PLACE_NODE_TYPE.to_owned(),
            position: Position { x: PLACE_X, y },
            data: PlaceData {
                label: place.text.clone(),
                node_type: place.kind,
                items: place.items.clone(),
                place_id: place.id.clone(),
                link_targets: link_targets.into_iter().collect(),
                has_incoming_links,
                handles: place_handles,
                dark_mode: theme.is_dark(),
            },
        });

        y += estimated_height(place.items.len()) + VERTICAL_SPACING;
    }

    let edges = resolved.iter().filter_map(edge_for).collect();

    Ok(Graph { nodes, edges })
}

/// Assign colors and resolve targets for every link, in document order.
///
/// Colors cycle through `palette` by link index, so two equivalent documents
/// always color their n-th link the same way.
///
/// # Errors
///
/// Returns [`LayoutError::EmptyPalette`] if `palette` is empty.
pub fn resolve_links(doc: &OutlineDocument, palette: &[String]) -> Result<Vec<ResolvedLink>, LayoutError> {
    if palette.is_empty() {
        return Err(LayoutError::EmptyPalette);
    }

    let owners = item_owners(doc);

    // Colors are fixed by index before any target lookup.
    let colored = doc
        .links
        .iter()
        .enumerate()
        .map(|(index, link)| (index, link, &palette[index % palette.len()]));

    let resolved = colored
        .map(|(index, link, color)| {
            let target = find_target(doc, &link.to);
            if target.is_none() {
                tracing::debug!(from = %link.from, to = %link.to, "link target not found");
            }
            ResolvedLink {
                index,
                from: link.from.clone(),
                to: link.to.clone(),
                color: color.clone(),
                source_place: owners.get(link.from.as_str()).map(|p| (*p).to_owned()),
                target,
            }
        })
        .collect();

    Ok(resolved)
}

/// Find what `name` refers to: a place first, then any item depth-first.
///
/// Matching is case-insensitive on the full text; the first match wins.
#[must_use]
pub fn find_target(doc: &OutlineDocument, name: &str) -> Option<LinkTarget> {
    let wanted = name.to_lowercase();

    if let Some(place) = doc.places.iter().find(|p| p.text.to_lowercase() == wanted) {
        return Some(LinkTarget::Place { place_id: place.id.clone() });
    }

    doc.places.iter().find_map(|place| {
        place
            .items_preorder()
            .into_iter()
            .find(|item| !item.is_separator && item.text.to_lowercase() == wanted)
            .map(|item| LinkTarget::Item { place_id: place.id.clone(), item_id: item.id.clone() })
    })
}

/// Estimated rendered height of a place with `item_count` direct items.
///
/// Nested children are not counted.
#[must_use]
pub fn estimated_height(item_count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let rows = item_count as f64;
    PLACE_BASE_HEIGHT + rows * ITEM_ROW_HEIGHT
}

#[must_use]
pub fn source_handle_id(item_id: &str) -> String {
    format!("{item_id}-source")
}

#[must_use]
pub fn item_target_handle_id(item_id: &str) -> String {
    format!("{item_id}-target")
}

#[must_use]
pub fn place_target_handle_id(place_id: &str) -> String {
    format!("{place_id}-place-target")
}

/// Map item id to owning place id for every item in the document.
fn item_owners(doc: &OutlineDocument) -> HashMap<&str, &str> {
    let mut owners = HashMap::new();
    for place in &doc.places {
        for item in place.items_preorder() {
            owners.insert(item.id.as_str(), place.id.as_str());
        }
    }
    owners
}

/// Group handles by owning place. A later link overwrites the color of a
/// target handle an earlier link already created.
fn collect_handles(resolved: &[ResolvedLink]) -> HashMap<&str, BTreeMap<String, Handle>> {
    let mut by_place: HashMap<&str, BTreeMap<String, Handle>> = HashMap::new();

    for link in resolved {
        if let Some(source_place) = link.source_place.as_deref() {
            let id = source_handle_id(&link.from);
            let handle = Handle {
                id: id.clone(),
                kind: HandleKind::Source,
                owner: link.from.clone(),
                color: link.color.clone(),
            };
            by_place.entry(source_place).or_default().insert(id, handle);
        }

        let Some(target) = &link.target else {
            continue;
        };
        let handle = match target {
            LinkTarget::Place { place_id } => Handle {
                id: place_target_handle_id(place_id),
                kind: HandleKind::PlaceTarget,
                owner: place_id.clone(),
                color: link.color.clone(),
            },
            LinkTarget::Item { item_id, .. } => Handle {
                id: item_target_handle_id(item_id),
                kind: HandleKind::ItemTarget,
                owner: item_id.clone(),
                color: link.color.clone(),
            },
        };
        by_place.entry(target.place_id()).or_default().insert(handle.id.clone(), handle);
    }

    by_place
}

/// Edge for a link whose source and target both resolved.
fn edge_for(link: &ResolvedLink) -> Option<RenderEdge> {
    let source = link.source_place.as_ref()?;
    let target = link.target.as_ref()?;

    let (target_key, target_handle) = match target {
        LinkTarget::Place { place_id } => (place_id.as_str(), None),
        LinkTarget::Item { item_id, .. } => (item_id.as_str(), Some(item_target_handle_id(item_id))),
    };

    Some(RenderEdge {
        id: format!("{from}-{target_key}", from = link.from),
        source: source.clone(),
        source_handle: source_handle_id(&link.from),
        target: target.place_id().to_owned(),
        target_handle,
        color: link.color.clone(),
    })
}
