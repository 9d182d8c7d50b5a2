//! Breadboard: compile indented UI outlines into node-link diagrams.
//!
//! An outline lists places (screens, pages, components, dialogs) as unindented
//! lines, their elements as nested `- item` lines, and navigation as
//! `label => target`. This crate parses that text, lays the result out as
//! positioned nodes with colored handles and edges, and provides the small
//! pure pieces an editor wraps around that core: position reconciliation,
//! share-link encoding, markdown export and theming.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`outline`] | Parser, AST, layout engine and the one-call [`outline::render`] |
//! | [`reconcile`] | Overlaying user-dragged positions on fresh layouts |
//! | [`share`] | URL-fragment encoding of editor state |
//! | [`export`] | Markdown download of the raw outline |
//! | [`theme`] | Light/dark mode and edge palette |
//! | [`config`] | Environment-driven editor configuration |

pub mod config;
pub mod export;
pub mod outline;
pub mod reconcile;
pub mod share;
pub mod theme;
