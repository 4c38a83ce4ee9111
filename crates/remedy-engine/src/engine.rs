//! The decision engine: one log line in, at most one decision out.

use crate::policy::{RandomRouting, Route, RoutingPolicy};
use crate::state::CoreState;
use remedy_classifier::Classifier;
use remedy_core::{find_match, Decision, KnowledgeBase, LogRecord, RemedyError, TicketDraft};
use std::sync::Arc;

pub struct DecisionEngine {
    kedb: KnowledgeBase,
    classifier: Option<Arc<dyn Classifier>>,
    policy: Box<dyn RoutingPolicy>,
    state: Arc<CoreState>,
}

impl DecisionEngine {
    /// Build the engine. A missing classifier is reported here, once;
    /// processing then degrades to raw ingestion with no decisions.
    pub fn new(
        kedb: KnowledgeBase,
        classifier: Option<Arc<dyn Classifier>>,
        state: Arc<CoreState>,
    ) -> Self {
        if classifier.is_none() {
            tracing::warn!(
                error = %RemedyError::ClassifierUnavailable,
                "log lines will be ingested but not analyzed"
            );
        }
        if kedb.is_empty() {
            tracing::warn!("KEDB is empty, every analyzed line will raise a ticket");
        }
        Self {
            kedb,
            classifier,
            policy: Box::new(RandomRouting::default()),
            state,
        }
    }

    /// Replace the routing policy (tests use the deterministic ones).
    pub fn with_policy(mut self, policy: Box<dyn RoutingPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &Arc<CoreState> {
        &self.state
    }

    pub fn kedb(&self) -> &KnowledgeBase {
        &self.kedb
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    /// Process one raw log line.
    ///
    /// Returns `None` when the line could not be analyzed (classifier
    /// missing, failed, or malformed). That is graceful degradation,
    /// not an error. Never panics or propagates failure to the caller;
    /// all side effects happen at most once.
    pub async fn process(&self, log_line: &str) -> Option<Decision> {
        // Ingestion succeeded regardless of what analysis does next
        self.state.record_log(LogRecord::ingest(log_line));

        let classifier = self.classifier.as_ref()?;
        let verdict = match classifier.classify(log_line).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!(error = %e, "skipping log line, classification failed");
                return None;
            }
        };

        let matched = find_match(&verdict, log_line, &self.kedb);
        let route = match matched {
            Some(entry) => self.policy.route(entry),
            None => Route::Ticket,
        };

        let decision = match (matched, route) {
            (Some(entry), Route::SelfHeal) => {
                tracing::info!(match_key = %entry.match_key, fix = %entry.fix, "self-healed");
                Decision::self_healed(log_line, &verdict, entry)
            }
            _ => {
                let ticket = self
                    .state
                    .store()
                    .create(TicketDraft::from_verdict(log_line, &verdict));
                tracing::info!(ticket_id = %ticket.ticket_id, anomaly = %verdict.anomaly, "ticket raised");
                self.state.record_ticket(&ticket);
                Decision::ticket_raised(log_line, &verdict, &ticket)
            }
        };

        self.state.record_decision(&decision);
        Some(decision)
    }
}
