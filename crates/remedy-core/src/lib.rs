//! Remedy Core: data model, KEDB catalogue, signal extraction, matching,
//! and rolling metrics.
//!
//! The diagnostic core behind the self-heal/ticket decision: one raw log
//! line plus a classifier verdict in, the best-matching KEDB entry (or
//! nothing) out, with the bookkeeping that keeps repeated runs consistent.

pub mod data_model;
pub mod error;
pub mod extractor;
pub mod kedb;
pub mod matcher;
pub mod metrics;

pub use data_model::{
    ClassifierVerdict, Decision, DecisionAction, KedbEntry, LogLevel, LogRecord, Severity, Ticket,
    TicketDraft, TicketStatus,
};
pub use error::RemedyError;
pub use extractor::extract_codes;
pub use kedb::KnowledgeBase;
pub use matcher::find_match;
pub use metrics::{MetricsSnapshot, RingBuffer, RollingMetrics};

/// Version of the Remedy engine
pub const REMEDY_VERSION: &str = "1.0.0";
