//! BPMN 2.0 extraction and analysis.
//!
//! `extract` turns XML into a [`ProcessGraph`], `graph` derives adjacency,
//! `analysis` validates structure and scans for risky task attributes, and
//! `visual` projects the result into a display graph or SVG. [`Engine`] runs
//! the whole pipeline for one document or a parallel batch.

pub mod analysis;
pub mod cache;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod extract;
pub mod graph;
pub mod model;
pub mod reporting;
pub mod types;
pub mod visual;

pub use analysis::{Document, Engine, SecurityAnalyzer, SecurityRule};
pub use cache::AnalysisCache;
pub use config::Config;
pub use error::{BpmnError, ParseError, RuleError};
pub use extract::{parse, parse_bytes};
pub use graph::{link, LinkedGraph};
pub use model::ProcessGraph;
pub use types::{BatchReport, ProcessAnalysis, SecurityReport, StructuralReport};
pub use visual::{project, render_svg, VisualizationGraph};
