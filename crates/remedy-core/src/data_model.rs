//! Data Model: KedbEntry, ClassifierVerdict, Decision, Ticket
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Issue severity, shared by KEDB entries, verdicts, and tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Severity {
    Low = 0,
    #[default]
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl Severity {
    /// Parse a severity string coming from an untrusted source.
    ///
    /// Unknown or empty values collapse to `Medium`, the documented
    /// fallback for classifier output.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "low" => Severity::Low,
            _ => Severity::Medium,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "Critical"),
            Severity::High => write!(f, "High"),
            Severity::Medium => write!(f, "Medium"),
            Severity::Low => write!(f, "Low"),
        }
    }
}

/// One KEDB record: a known error signature and its remediation.
///
/// Identity is `match_key`; the loader enforces no uniqueness, so the
/// matcher must resolve duplicates by stable iteration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KedbEntry {
    /// Canonical error signature (e.g. "AUTH-403"), non-empty
    #[serde(rename = "error")]
    pub match_key: String,
    /// Free text used for fuzzy matching against the verdict anomaly
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub severity: Severity,
    /// Whether the remediation can run without human involvement
    #[serde(default)]
    pub self_healable: bool,
    /// Estimated support hours avoided by one self-heal
    #[serde(rename = "support_hours_saved", default)]
    pub hours_saved: f64,
    /// Remediation text
    #[serde(default)]
    pub fix: String,
}

/// Structured summary returned by the external classifier.
///
/// Untrusted input: every field has the documented fallback so a
/// partially-filled response still yields a usable verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierVerdict {
    #[serde(default = "default_anomaly")]
    pub anomaly: String,
    #[serde(default = "default_severity")]
    pub severity: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_description")]
    pub description: String,
}

fn default_anomaly() -> String {
    "Unknown Issue".to_string()
}

fn default_severity() -> String {
    "Medium".to_string()
}

fn default_category() -> String {
    "unknown".to_string()
}

fn default_description() -> String {
    "No description available".to_string()
}

impl Default for ClassifierVerdict {
    fn default() -> Self {
        Self {
            anomaly: default_anomaly(),
            severity: default_severity(),
            category: default_category(),
            description: default_description(),
        }
    }
}

/// Outcome of processing one log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub log_line: String,
    pub anomaly: String,
    pub severity: Severity,
    pub category: String,
    #[serde(flatten)]
    pub action: DecisionAction,
}

/// What the engine did with the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DecisionAction {
    SelfHealed {
        /// match_key of the KEDB entry that resolved the issue
        kedb_match: String,
        suggested_fix: String,
        #[serde(rename = "support_hours_saved")]
        hours_saved: f64,
    },
    TicketRaised {
        ticket_id: String,
        /// Classifier's free-text description, the best fix hint we have
        suggested_fix: String,
    },
}

impl Decision {
    /// Build a self-heal decision referencing a matched KEDB entry.
    pub fn self_healed(log_line: &str, verdict: &ClassifierVerdict, entry: &KedbEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            log_line: log_line.to_string(),
            anomaly: verdict.anomaly.clone(),
            severity: Severity::parse_lenient(&verdict.severity),
            category: verdict.category.clone(),
            action: DecisionAction::SelfHealed {
                kedb_match: entry.match_key.clone(),
                suggested_fix: entry.fix.clone(),
                hours_saved: entry.hours_saved,
            },
        }
    }

    /// Build a ticket decision for a persisted ticket.
    pub fn ticket_raised(log_line: &str, verdict: &ClassifierVerdict, ticket: &Ticket) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            log_line: log_line.to_string(),
            anomaly: verdict.anomaly.clone(),
            severity: Severity::parse_lenient(&verdict.severity),
            category: verdict.category.clone(),
            action: DecisionAction::TicketRaised {
                ticket_id: ticket.ticket_id.clone(),
                suggested_fix: verdict.description.clone(),
            },
        }
    }

    pub fn is_self_heal(&self) -> bool {
        matches!(self.action, DecisionAction::SelfHealed { .. })
    }

    /// Support hours saved by this decision. Tickets save nothing.
    pub fn hours_saved(&self) -> f64 {
        match &self.action {
            DecisionAction::SelfHealed { hours_saved, .. } => *hours_saved,
            DecisionAction::TicketRaised { .. } => 0.0,
        }
    }

    pub fn ticket_id(&self) -> Option<&str> {
        match &self.action {
            DecisionAction::TicketRaised { ticket_id, .. } => Some(ticket_id),
            DecisionAction::SelfHealed { .. } => None,
        }
    }
}

/// Lifecycle state of a ticket. The core only ever creates `Open`;
/// transitions belong to the surrounding support tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

/// A persisted support-escalation record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub ticket_id: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub log_line: String,
    pub anomaly: String,
    pub severity: Severity,
    pub category: String,
    pub description: String,
    pub status: TicketStatus,
}

/// Everything a ticket needs except its identity and creation time,
/// which the store assigns.
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub log_line: String,
    pub anomaly: String,
    pub severity: Severity,
    pub category: String,
    pub description: String,
}

impl TicketDraft {
    pub fn from_verdict(log_line: &str, verdict: &ClassifierVerdict) -> Self {
        Self {
            log_line: log_line.to_string(),
            anomaly: verdict.anomaly.clone(),
            severity: Severity::parse_lenient(&verdict.severity),
            category: verdict.category.clone(),
            description: verdict.description.clone(),
        }
    }
}

/// Log level inferred from line content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// One ingested raw log line, as kept in the recent-logs window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub level: LogLevel,
}

impl LogRecord {
    /// Record a freshly ingested line, inferring its level from content.
    pub fn ingest(line: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            message: line.to_string(),
            level: Self::infer_level(line),
        }
    }

    fn infer_level(line: &str) -> LogLevel {
        let lower = line.to_lowercase();
        if ["error", "failed", "timeout", "critical"]
            .iter()
            .any(|w| lower.contains(w))
        {
            LogLevel::Error
        } else if ["warning", "degradation", "exceeded", "leak"]
            .iter()
            .any(|w| lower.contains(w))
        {
            LogLevel::Warn
        } else {
            LogLevel::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_lenient_parse() {
        assert_eq!(Severity::parse_lenient("Critical"), Severity::Critical);
        assert_eq!(Severity::parse_lenient("HIGH"), Severity::High);
        assert_eq!(Severity::parse_lenient(" low "), Severity::Low);
        assert_eq!(Severity::parse_lenient("banana"), Severity::Medium);
        assert_eq!(Severity::parse_lenient(""), Severity::Medium);
    }

    #[test]
    fn test_kedb_entry_deserialization() {
        let json = r#"{
            "error": "AUTH-403",
            "description": "missing privilege authorization failure",
            "category": "security",
            "severity": "High",
            "self_healable": true,
            "support_hours_saved": 2.0,
            "fix": "Reset session"
        }"#;
        let entry: KedbEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.match_key, "AUTH-403");
        assert!(entry.self_healable);
        assert!((entry.hours_saved - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_kedb_entry_defaults() {
        // Sparse records still load; missing flags mean not healable
        let entry: KedbEntry = serde_json::from_str(r#"{"error": "X-1"}"#).unwrap();
        assert!(!entry.self_healable);
        assert_eq!(entry.hours_saved, 0.0);
        assert_eq!(entry.severity, Severity::Medium);
    }

    #[test]
    fn test_verdict_field_fallbacks() {
        let verdict: ClassifierVerdict = serde_json::from_str(r#"{"anomaly": "db down"}"#).unwrap();
        assert_eq!(verdict.anomaly, "db down");
        assert_eq!(verdict.severity, "Medium");
        assert_eq!(verdict.category, "unknown");
        assert_eq!(verdict.description, "No description available");
    }

    #[test]
    fn test_decision_hours_saved() {
        let verdict = ClassifierVerdict::default();
        let entry = KedbEntry {
            match_key: "AUTH-403".to_string(),
            description: String::new(),
            category: "security".to_string(),
            severity: Severity::High,
            self_healable: true,
            hours_saved: 2.0,
            fix: "Reset session".to_string(),
        };
        let decision = Decision::self_healed("line", &verdict, &entry);
        assert!(decision.is_self_heal());
        assert_eq!(decision.hours_saved(), 2.0);
        assert!(decision.ticket_id().is_none());
    }

    #[test]
    fn test_decision_action_serialization() {
        let verdict = ClassifierVerdict::default();
        let ticket = Ticket {
            ticket_id: "TKT-20260807-001".to_string(),
            created_at: Utc::now(),
            log_line: "line".to_string(),
            anomaly: verdict.anomaly.clone(),
            severity: Severity::Medium,
            category: "unknown".to_string(),
            description: verdict.description.clone(),
            status: TicketStatus::Open,
        };
        let decision = Decision::ticket_raised("line", &verdict, &ticket);
        let json = serde_json::to_string(&decision).unwrap();
        assert!(json.contains(r#""action":"ticket_raised""#));
        assert!(json.contains("TKT-20260807-001"));
        assert_eq!(decision.hours_saved(), 0.0);
    }

    #[test]
    fn test_log_level_inference() {
        assert_eq!(
            LogRecord::ingest("Database connection failed").level,
            LogLevel::Error
        );
        assert_eq!(
            LogRecord::ingest("Clipboard size exceeded threshold").level,
            LogLevel::Warn
        );
        assert_eq!(
            LogRecord::ingest("Case C-123 processed successfully").level,
            LogLevel::Info
        );
    }
}
