//! Text to graph in one call, for editing surfaces.

use super::layout::{Graph, layout};
use super::parse::parse;
use crate::theme::Theme;

/// Parse `text` and lay it out with `theme`.
///
/// Any layout failure is logged and yields an empty graph, so a bad edit or a
/// broken theme never takes the editing surface down.
#[must_use]
pub fn render(text: &str, theme: &Theme) -> Graph {
    let doc = parse(text);
    match layout(&doc, theme) {
        Ok(graph) => graph,
        Err(e) => {
            tracing::warn!(error = %e, "layout failed; rendering nothing");
            Graph::default()
        }
    }
}
