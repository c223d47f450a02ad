// src/extract/mod.rs
// =============================================================================
// This module reads things out of downloaded HTML.
//
// Submodules:
// - links: collects the absolute http(s) links a page points to
// - text: strips the markup and returns the visible text
// =============================================================================

mod links;
mod text;

pub use links::extract_links;
pub use text::extract_text;
