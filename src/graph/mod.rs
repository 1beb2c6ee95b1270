// src/graph/mod.rs
//! Graph linking: adjacency is an index over the flow arena, never an owning
//! back-reference on elements.

mod index;
mod linker;

pub use index::FlowIndex;
pub use linker::{link, DanglingFlow, LinkedGraph};
