//! HTML rendering.
//!
//! - `html`: escaping and small markup helpers
//! - `rich_text`: block-by-block rendering of article bodies
//! - `pages`: full page templates

pub mod html;
pub mod pages;
pub mod rich_text;

pub use pages::PageContext;
pub use rich_text::{TocEntry, render_document, render_toc, toc};
