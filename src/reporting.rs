//! Output for batch results: colored terminal text or JSON.

pub mod console;
pub mod json;
mod shared;

pub use console::{print_report, render_report};
pub use json::{analysis_to_json, to_json};
