//! Rolling metrics: bounded recent-history windows plus monotonic
//! counters.
//!
//! Advisory, not the system of record: tickets and KEDB records are
//! durable, these aggregates are rebuilt from a fresh start. Reads go
//! through [`RollingMetrics::snapshot`], which clones the current state
//! so presentation-layer reads never hold the write path up.

use crate::data_model::{Decision, LogRecord, Ticket};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Capacity of the recent raw-log window.
pub const RECENT_LOGS_CAPACITY: usize = 100;
/// Capacity of the recent decision window.
pub const RECENT_DECISIONS_CAPACITY: usize = 50;
/// Capacity of the recent ticket window.
pub const RECENT_TICKETS_CAPACITY: usize = 50;

/// Fixed-capacity FIFO window. Pushing into a full buffer evicts the
/// oldest element.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest-first iteration.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T: Clone> RingBuffer<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

/// Process-wide running aggregate, mutated only by the decision path.
#[derive(Debug, Clone)]
pub struct RollingMetrics {
    started_at: DateTime<Utc>,
    total_logs: u64,
    decided: u64,
    self_healed: u64,
    tickets_raised: u64,
    hours_saved: f64,
    recent_logs: RingBuffer<LogRecord>,
    recent_decisions: RingBuffer<Decision>,
    recent_tickets: RingBuffer<Ticket>,
}

impl RollingMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            total_logs: 0,
            decided: 0,
            self_healed: 0,
            tickets_raised: 0,
            hours_saved: 0.0,
            recent_logs: RingBuffer::new(RECENT_LOGS_CAPACITY),
            recent_decisions: RingBuffer::new(RECENT_DECISIONS_CAPACITY),
            recent_tickets: RingBuffer::new(RECENT_TICKETS_CAPACITY),
        }
    }

    /// Count one ingested raw line. Happens for every line, including
    /// those the classifier later fails on.
    pub fn record_log(&mut self, record: LogRecord) {
        self.total_logs += 1;
        self.recent_logs.push(record);
    }

    /// Count one completed decision and fold its outcome into the
    /// counters.
    pub fn record_decision(&mut self, decision: &Decision) {
        self.decided += 1;
        if decision.is_self_heal() {
            self.self_healed += 1;
            self.hours_saved += decision.hours_saved();
        } else {
            self.tickets_raised += 1;
        }
        self.recent_decisions.push(decision.clone());
    }

    /// Remember a freshly raised (or reloaded) ticket in the recent
    /// window.
    pub fn record_ticket(&mut self, ticket: &Ticket) {
        self.recent_tickets.push(ticket.clone());
    }

    pub fn total_logs(&self) -> u64 {
        self.total_logs
    }

    pub fn decided(&self) -> u64 {
        self.decided
    }

    /// Point-in-time copy for the presentation layer.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            started_at: self.started_at,
            total_logs: self.total_logs,
            decided: self.decided,
            self_healed: self.self_healed,
            tickets_raised: self.tickets_raised,
            hours_saved: self.hours_saved,
            recent_logs: self.recent_logs.to_vec(),
            recent_decisions: self.recent_decisions.to_vec(),
            recent_tickets: self.recent_tickets.to_vec(),
        }
    }
}

impl Default for RollingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloned view of the metrics at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub started_at: DateTime<Utc>,
    pub total_logs: u64,
    pub decided: u64,
    pub self_healed: u64,
    pub tickets_raised: u64,
    #[serde(rename = "support_hours_saved")]
    pub hours_saved: f64,
    pub recent_logs: Vec<LogRecord>,
    pub recent_decisions: Vec<Decision>,
    pub recent_tickets: Vec<Ticket>,
}
