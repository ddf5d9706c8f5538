//! Core module: splitting, rendering and reporting of assistant messages

pub mod chart;
pub mod config;
pub mod markup;
pub mod pricing;
pub mod prompt;
pub mod render;
pub mod report;
pub mod splitter;
pub mod table;

