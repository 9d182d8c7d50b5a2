//! Position reconciliation between fresh layouts and user-dragged positions.
//!
//! Every edit recomputes the layout from scratch, so node positions would snap
//! back on each keystroke. The functions here overlay saved positions, keyed
//! by node id, on top of a fresh layout. Ids that have no saved position keep
//! their computed one.

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;

use std::collections::BTreeMap;

use crate::outline::{Position, RenderNode};
use crate::share::ShareState;

/// Saved node positions keyed by node id.
pub type PositionMap = BTreeMap<String, Position>;

/// Overlay `positions` onto `fresh`, preserving the fresh node order.
#[must_use]
pub fn reconcile(positions: &PositionMap, fresh: Vec<RenderNode>) -> Vec<RenderNode> {
    fresh
        .into_iter()
        .map(|mut node| {
            if let Some(saved) = positions.get(&node.id) {
                node.position = *saved;
            }
            node
        })
        .collect()
}

/// Record the current position of every node, overwriting older entries.
pub fn record_positions(positions: &mut PositionMap, nodes: &[RenderNode]) {
    for node in nodes {
        positions.insert(node.id.clone(), node.position);
    }
}

/// Apply a share state's saved layout to a fresh layout.
///
/// Saved positions only take effect once the user has moved something by
/// hand; until then the automatic layout is used as-is.
#[must_use]
pub fn apply_share_state(state: &ShareState, fresh: Vec<RenderNode>) -> Vec<RenderNode> {
    match (&state.positions, state.manual_layout()) {
        (Some(positions), true) => reconcile(positions, fresh),
        _ => fresh,
    }
}
