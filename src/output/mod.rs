//! Output module for presenting probe results
//!
//! This module handles:
//! - The console summary of a product record
//! - Messages for cooldown outcomes
//! - JSON rendering for scripting

mod console;

pub use console::{render_json, render_outcome, render_summary};
