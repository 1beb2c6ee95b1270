// src/extract/mod.rs
//! BPMN XML -> [`ProcessGraph`].
//!
//! The document is read with a namespace-aware pull parser. Element kinds come
//! from a closed tag table; anything else is skipped. Only `MalformedDocument`
//! and `MissingProcessDefinition` are fatal, everything else is recorded in the
//! graph's provenance.

mod reader;

use tracing::info;

use crate::error::ParseError;
use crate::model::ProcessGraph;

/// Namespace URI of the BPMN 2.0 semantic model.
pub const BPMN_MODEL_NS: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";

/// Parses a BPMN 2.0 document.
///
/// The returned graph is not linked yet: element adjacency is filled in by
/// [`crate::graph::link`].
///
/// # Errors
/// `MalformedDocument` when the XML is not well formed,
/// `MissingProcessDefinition` when there is no `process` element.
pub fn parse(document: &str) -> Result<ProcessGraph, ParseError> {
    let graph = reader::Extractor::new(document).run()?;
    info!(
        process = %graph.metadata.id,
        elements = graph.elements.len(),
        flows = graph.flows.len(),
        irregularities = graph.provenance.issues.len(),
        "parsed process"
    );
    Ok(graph)
}

/// Parses a document supplied as raw bytes. The bytes must be UTF-8.
///
/// # Errors
/// Same as [`parse`]; invalid UTF-8 is a `MalformedDocument`.
pub fn parse_bytes(bytes: &[u8]) -> Result<ProcessGraph, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ParseError::malformed(e.valid_up_to() as u64, format!("invalid UTF-8: {e}"))
    })?;
    parse(text.strip_prefix('\u{feff}').unwrap_or(text))
}
