//! Visualization rendering for LLM chat transcripts
//!
//! Assistant messages interleave markdown narrative with
//! `<visualization type="...">` directives. This crate splits a message into
//! blocks, renders each directive as a Plotly-compatible chart object or an
//! in-place diagnostic, and writes the result as a Markdown, HTML or JSON
//! report.

pub mod core;
pub mod logger;

pub use core::config;
