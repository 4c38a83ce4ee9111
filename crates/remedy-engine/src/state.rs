//! Shared mutable state for the decision pipeline.
//!
//! One `CoreState` owns the rolling metrics and the ticket store; every
//! mutation goes through its methods, and each structure sits behind a
//! single mutual-exclusion boundary. Reads are snapshots: a viewer
//! polling metrics never waits on an in-flight classifier call.

use remedy_core::{Decision, LogRecord, MetricsSnapshot, RollingMetrics, Ticket};
use remedy_store::TicketStore;
use std::sync::{Mutex, PoisonError};

pub struct CoreState {
    metrics: Mutex<RollingMetrics>,
    store: TicketStore,
}

impl CoreState {
    /// Wrap a ticket store, seeding the recent-tickets window with what
    /// it reloaded so a restart shows the same visible history.
    pub fn new(store: TicketStore) -> Self {
        let mut metrics = RollingMetrics::new();
        for ticket in store.list() {
            metrics.record_ticket(&ticket);
        }
        Self {
            metrics: Mutex::new(metrics),
            store,
        }
    }

    pub fn record_log(&self, record: LogRecord) {
        self.metrics_mut().record_log(record);
    }

    pub fn record_decision(&self, decision: &Decision) {
        self.metrics_mut().record_decision(decision);
    }

    pub fn record_ticket(&self, ticket: &Ticket) {
        self.metrics_mut().record_ticket(ticket);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.metrics_mut().snapshot()
    }

    pub fn store(&self) -> &TicketStore {
        &self.store
    }

    fn metrics_mut(&self) -> std::sync::MutexGuard<'_, RollingMetrics> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remedy_core::{Severity, TicketDraft};

    fn draft() -> TicketDraft {
        TicketDraft {
            log_line: "line".to_string(),
            anomaly: "anomaly".to_string(),
            severity: Severity::Medium,
            category: "unknown".to_string(),
            description: "description".to_string(),
        }
    }

    #[test]
    fn test_seeds_recent_tickets_from_store() {
        let store = TicketStore::in_memory();
        store.create(draft());
        store.create(draft());

        let state = CoreState::new(store);
        let snap = state.snapshot();
        assert_eq!(snap.recent_tickets.len(), 2);
        // Counters start fresh; history is advisory, tickets are the record
        assert_eq!(snap.tickets_raised, 0);
    }

    #[test]
    fn test_record_log_updates_snapshot() {
        let state = CoreState::new(TicketStore::in_memory());
        state.record_log(LogRecord::ingest("a line"));
        assert_eq!(state.snapshot().total_logs, 1);
    }
}
