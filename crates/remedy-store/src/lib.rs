//! Remedy Store: durable ticket persistence.
//!
//! Tickets live in one JSON file holding the whole collection; every
//! write rewrites the file. That is atomic enough for the single-writer
//! model this system runs under (the decision engine is the only
//! writer). Reloading after a restart reconstructs the same visible set
//! without duplication.

mod store;

pub use store::TicketStore;
