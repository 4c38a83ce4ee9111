//! Ticket store: identity assignment, in-memory cache, whole-file
//! persistence.

use chrono::Utc;
use remedy_core::{RemedyError, Ticket, TicketDraft, TicketStatus};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

struct StoreInner {
    tickets: Vec<Ticket>,
    /// Last sequence number handed out for `seq_day`.
    seq: u32,
    /// Day (YYYYMMDD) the sequence belongs to; rolls the counter at
    /// midnight.
    seq_day: String,
}

/// Persists tickets and assigns their identities.
///
/// Identity format is `TKT-<YYYYMMDD>-<NNN>` with a per-day monotonic
/// sequence, seeded from whatever the startup reload found. The suffix
/// wraps after 999 within one day.
pub struct TicketStore {
    path: Option<PathBuf>,
    inner: Mutex<StoreInner>,
}

impl TicketStore {
    /// Open the store backed by a JSON file. A missing file yields an
    /// empty store; an unreadable one is logged and also yields an empty
    /// store (durability resumes on the next successful write).
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let tickets = match Self::read_collection(&path) {
            Ok(tickets) => {
                tracing::info!(path = %path.display(), count = tickets.len(), "ticket store loaded");
                tickets
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ticket store unavailable, starting empty");
                Vec::new()
            }
        };
        Self::with_tickets(Some(path), tickets)
    }

    /// Volatile store with no backing file. Used by tests and demos.
    pub fn in_memory() -> Self {
        Self::with_tickets(None, Vec::new())
    }

    fn with_tickets(path: Option<PathBuf>, tickets: Vec<Ticket>) -> Self {
        let today = Utc::now().format("%Y%m%d").to_string();
        let seq = highest_suffix_for_day(&tickets, &today);
        Self {
            path,
            inner: Mutex::new(StoreInner {
                tickets,
                seq,
                seq_day: today,
            }),
        }
    }

    fn read_collection(path: &Path) -> Result<Vec<Ticket>, RemedyError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RemedyError::TicketPersist(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| RemedyError::TicketPersist(e.to_string()))
    }

    /// Create and persist a ticket from the draft.
    ///
    /// The ticket is always valid in memory; a failed write loses
    /// durability for it and is logged, never propagated.
    pub fn create(&self, draft: TicketDraft) -> Ticket {
        let mut inner = self.lock();
        let ticket = Ticket {
            ticket_id: next_ticket_id(&mut inner),
            created_at: Utc::now(),
            log_line: draft.log_line,
            anomaly: draft.anomaly,
            severity: draft.severity,
            category: draft.category,
            description: draft.description,
            status: TicketStatus::Open,
        };
        inner.tickets.push(ticket.clone());
        if let Err(e) = self.persist(&inner.tickets) {
            tracing::error!(ticket_id = %ticket.ticket_id, error = %e, "ticket not persisted");
        }
        ticket
    }

    /// All tickets in insertion order.
    pub fn list(&self) -> Vec<Ticket> {
        self.lock().tickets.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().tickets.is_empty()
    }

    fn persist(&self, tickets: &[Ticket]) -> Result<(), RemedyError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(tickets)
            .map_err(|e| RemedyError::TicketPersist(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| RemedyError::TicketPersist(e.to_string()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn next_ticket_id(inner: &mut StoreInner) -> String {
    let today = Utc::now().format("%Y%m%d").to_string();
    if inner.seq_day != today {
        inner.seq_day = today;
        inner.seq = highest_suffix_for_day(&inner.tickets, &inner.seq_day);
    }
    inner.seq = inner.seq % 999 + 1;
    format!("TKT-{}-{:03}", inner.seq_day, inner.seq)
}

/// Highest 3-digit suffix already used for the given day, so a restart
/// continues the sequence instead of reissuing identities.
fn highest_suffix_for_day(tickets: &[Ticket], day: &str) -> u32 {
    let prefix = format!("TKT-{}-", day);
    tickets
        .iter()
        .filter_map(|t| t.ticket_id.strip_prefix(&prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}
