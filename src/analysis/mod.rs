// src/analysis/mod.rs
//! Analysis stages over a linked graph and the engine that runs them.

pub mod engine;
pub mod security;
pub mod structural;

pub use engine::{Document, Engine};
pub use security::{SecurityAnalyzer, SecurityRule};
pub use structural::validate;
