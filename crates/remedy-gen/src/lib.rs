//! Remedy Gen: synthetic Pega-flavoured log producer.
//!
//! A template-driven text source for demos and load runs. It walks five
//! issue categories in a fixed rotation, fills each pattern's
//! placeholders with plausible values, and wraps the message in the log
//! framing the matching Pega log file would use. It shares no state
//! with the classification core beyond the line it hands over.

mod generator;
mod templates;

pub use generator::LogGenerator;
