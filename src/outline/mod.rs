//! Breadboard outline parser and layout engine.
//!
//! Parses the indented outline syntax (places, nested `- item` lines, `=>`
//! links) into an AST and lays the result out as place nodes, colored handles
//! and edges ready for a node-link renderer.

pub mod ast;
pub mod layout;
pub mod parse;
pub mod render;

pub use ast::{Diagnostic, DiagnosticKind, Item, ItemKind, Link, OutlineDocument, Place, PlaceKind};
pub use layout::{Graph, LayoutError, Position, RenderEdge, RenderNode, layout, resolve_links};
pub use parse::{parse, parse_with_diagnostics};
pub use render::render;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

#[cfg(test)]
#[path = "props_test.rs"]
mod props_tests;
