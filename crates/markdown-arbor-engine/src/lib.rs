//! The arbor tree engine: canonical storage, parsing, and rendering for
//! CommonMark document trees.
//!
//! Nodes live in a thread-local arena and are addressed through opaque
//! [`NodeHandle`]s. The engine owns linking, unlinking, and freeing; callers
//! (notably the `markdown-arbor` wrapper crate) are responsible for deciding
//! *when* a detached node gets freed. Handles are generation-checked, so
//! operations on freed nodes fail cleanly instead of touching reused slots.
//!
//! The CommonMark grammar is delegated to `pulldown-cmark`; this crate turns
//! its event stream into a mutable linked tree and serializes such trees to
//! CommonMark, HTML, XML, LaTeX, and manpage output.

pub mod flags;
mod parse;
mod render;
mod store;

pub use parse::parse_document;
pub use render::{RenderFormat, render};
pub use store::{
    Extent, LinkStatus, ListKind, NodeHandle, NodeType, append_child, create, extent, fence_info,
    first_child, free, heading_level, insert_after, insert_before, last_child, list_kind,
    list_start, list_tight, literal, next_sibling, node_type, parent_of, prepend_child,
    previous_sibling, set_fence_info, set_heading_level, set_list_kind, set_list_start,
    set_list_tight, set_literal, set_title, set_url, title, unlink, url,
};
