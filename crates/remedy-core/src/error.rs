//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemedyError {
    /// Classifier collaborator is not reachable or was never configured.
    /// Reported once at startup, not per call.
    #[error("CLASSIFIER/UNAVAILABLE")]
    ClassifierUnavailable,

    /// Classifier call failed (network, timeout, non-2xx). Terminal for
    /// the current log line only.
    #[error("CLASSIFIER/{0}")]
    Classifier(String),

    /// Classifier responded, but the payload cannot be parsed into a
    /// verdict. The current log line is skipped.
    #[error("VERDICT/{0}")]
    MalformedVerdict(String),

    /// KEDB storage missing or unreadable. Recovered locally by falling
    /// back to an empty catalogue.
    #[error("KEDB/{0}")]
    KedbLoad(String),

    /// Ticket write failed. Durability is lost for that record; the
    /// in-memory ticket remains valid.
    #[error("STORE/{0}")]
    TicketPersist(String),
}
