//! Template rotation and placeholder filling.

use crate::templates::CATEGORIES;
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const THREADS: &[&str] = &[
    "PegaRULES-MasterAgent",
    "PegaRULES-Batch-14",
    "PegaRULES-Batch-3",
    "PegaRULES-Batch-13",
];

const ACTIVITIES: &[&str] = &["ProcessCase", "UpdateWorkItem", "ExecuteFlow", "ValidateData"];

const SERVICES: &[&str] = &[
    "payment-gateway",
    "document-service",
    "notification-api",
    "user-service",
];

const ENDPOINTS: &[&str] = &["/api/cases", "/api/documents", "/api/users", "/api/workflows"];

const USERS: &[&str] = &["USER_1234", "USER_5678", "USER_9012", "ADMIN_001"];

/// Walks the category tables in order, one pattern per call.
///
/// The rotation itself is deterministic (category then pattern index);
/// only the placeholder values are random.
pub struct LogGenerator {
    category_idx: usize,
    pattern_idx: usize,
}

impl LogGenerator {
    pub fn new() -> Self {
        Self {
            category_idx: 0,
            pattern_idx: 0,
        }
    }

    /// Produce the next synthetic log line and advance the rotation.
    pub fn next_line(&mut self) -> String {
        let (category, patterns) = CATEGORIES[self.category_idx];
        let pattern = patterns[self.pattern_idx];

        self.pattern_idx += 1;
        if self.pattern_idx >= patterns.len() {
            self.pattern_idx = 0;
            self.category_idx = (self.category_idx + 1) % CATEGORIES.len();
        }

        let mut rng = rand::thread_rng();
        let message = fill(pattern, &mut rng);
        frame(category, &message, &mut rng)
    }
}

impl Default for LogGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a message in the framing of the Pega log file it would come
/// from: alert-log framing for performance issues, rules-log framing
/// for everything else.
fn frame(category: &str, message: &str, rng: &mut impl Rng) -> String {
    let ts = Utc::now().format("%Y-%m-%d %H:%M:%S,%3f");
    let requestor = random_id(rng, 32);
    match category {
        "performance" => {
            let code = message.split(" - ").next().unwrap_or("PEGA0000");
            let request_id = rng.gen_range(10000..100000);
            format!(
                "{ts} GMT*8*{code}*{request_id}*10000*{requestor}*NA*NA*System*{message}*"
            )
        }
        "security" => format!(
            "{ts} GMT [PegaRULES-SecurityAgent] [  STANDARD] [                    ] (SecurityFilter) ERROR  {requestor} System - {message}"
        ),
        _ => {
            let thread = THREADS.choose(rng).copied().unwrap_or(THREADS[0]);
            format!(
                "{ts} GMT [{thread}] [  STANDARD] [                    ] (ExceptionHandler) ERROR  {requestor} System - {message}"
            )
        }
    }
}

/// Replace every `{placeholder}` in the pattern. Unknown names are left
/// in place so a template typo is visible in the output.
fn fill(pattern: &str, rng: &mut impl Rng) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match placeholder_value(name, rng) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn placeholder_value(name: &str, rng: &mut impl Rng) -> Option<String> {
    let value = match name {
        "time" => rng.gen_range(5000..15000).to_string(),
        "activity" => pick(ACTIVITIES, rng),
        "db_time" => rng.gen_range(2000..8000).to_string(),
        "db_count" => rng.gen_range(50..200).to_string(),
        "commit_count" => rng.gen_range(100..500).to_string(),
        "time_window" => rng.gen_range(60..300).to_string(),
        "size" => rng.gen_range(10000..15000).to_string(),
        "max_size" => "10000".to_string(),
        "runtime" => rng.gen_range(30000..120000).to_string(),
        "response_time" => rng.gen_range(2000..10000).to_string(),
        "duration" => rng.gen_range(60..3600).to_string(),
        "property" => pick(&["pyWorkPage", "pxCoveredInsKeys", "pyTempPlaceHolder"], rng),
        "username" => pick(USERS, rng),
        "service" => pick(SERVICES, rng),
        "timeout" => rng.gen_range(30000..60000).to_string(),
        "endpoint" => pick(ENDPOINTS, rng),
        "processor_name" => pick(THREADS, rng),
        "tx_id" => format!("TX_{}", rng.gen_range(100000..1000000)),
        "rule_name" => pick(ACTIVITIES, rng),
        "rule_type" => pick(&["Activity", "Flow", "Decision", "Data"], rng),
        "error_message" => pick(
            &["Connection timeout", "Authentication failed", "Server unreachable"],
            rng,
        ),
        "section_name" => pick(&["CaseDetails", "WorkItemForm", "AssignmentPanel"], rng),
        "file_name" => pick(&["import_data.csv", "user_data.csv", "case_data.csv"], rng),
        "lag" => rng.gen_range(1000..10000).to_string(),
        "index_name" => pick(&["CaseIndex", "DocumentIndex", "UserIndex"], rng),
        "payload" => pick(
            &["<script>alert(1)</script>", "javascript:void(0)", "<img src=x onerror=alert(1)>"],
            rng,
        ),
        "ip_address" | "ip" | "source" => format!(
            "{}.{}.{}.{}",
            rng.gen_range(10..224),
            rng.gen_range(0..256),
            rng.gen_range(0..256),
            rng.gen_range(1..255)
        ),
        "token" => format!("CSRF_TOKEN_{}", rng.gen_range(100..1000)),
        "token_type" => pick(&["access_token", "refresh_token", "id_token"], rng),
        "client_id" => pick(&["web-app", "mobile-app", "api-client"], rng),
        "query" => pick(
            &["SELECT * FROM users", "DROP TABLE cases", "UNION SELECT password"],
            rng,
        ),
        "session_id" => format!("SESS_{}", rng.gen_range(100000..1000000)),
        "action" => pick(&["admin-access", "system-config", "user-management"], rng),
        "attempts" => rng.gen_range(10..50).to_string(),
        "limit" => rng.gen_range(100..1000).to_string(),
        "transformation" => pick(&["JSON-to-XML", "CSV-to-JSON", "Data-mapping"], rng),
        "queue_name" => pick(&["CaseQueue", "DocumentQueue", "NotificationQueue"], rng),
        "webhook_url" => pick(
            &["https://api.example.com/webhook", "https://callback.service.com/notify"],
            rng,
        ),
        "status" => rng.gen_range(400..600).to_string(),
        "destination" => pick(
            &["sftp://server.example.com/data", "https://api.service.com/upload"],
            rng,
        ),
        "table_name" => pick(&["cases", "documents", "users", "workflows"], rng),
        "cache_name" => pick(&["CaseCache", "DocumentCache", "UserCache"], rng),
        "workflow_name" => pick(
            &["CaseApproval", "DocumentReview", "UserOnboarding", "PaymentProcessing"],
            rng,
        ),
        "step" => rng.gen_range(1..11).to_string(),
        "case_id" => format!("CASE_{}", rng.gen_range(100000..1000000)),
        "work_type" => pick(&["CaseWork", "DocumentWork", "UserWork"], rng),
        "sla_name" => pick(&["ResponseSLA", "ResolutionSLA", "AssignmentSLA"], rng),
        "flow_name" => pick(&["CaseFlow", "DocumentFlow", "PaymentFlow"], rng),
        "data_page" => pick(&["CaseDataPage", "DocumentDataPage", "UserDataPage"], rng),
        _ => return None,
    };
    Some(value)
}

fn pick(options: &[&str], rng: &mut impl Rng) -> String {
    options.choose(rng).copied().unwrap_or("").to_string()
}

fn random_id(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{PERFORMANCE, RUNTIME};

    fn code_of(pattern: &str) -> &str {
        pattern.split(" - ").next().unwrap()
    }

    #[test]
    fn test_rotation_walks_patterns_then_categories() {
        let mut gen = LogGenerator::new();
        for pattern in PERFORMANCE {
            assert!(gen.next_line().contains(code_of(pattern)));
        }
        // Performance table exhausted; rotation moves to runtime
        assert!(gen.next_line().contains(code_of(RUNTIME[0])));
    }

    #[test]
    fn test_no_unfilled_placeholders() {
        let mut gen = LogGenerator::new();
        for _ in 0..200 {
            let line = gen.next_line();
            assert!(!line.contains("{"), "unfilled placeholder in: {}", line);
        }
    }

    #[test]
    fn test_performance_lines_carry_extractable_codes() {
        // Integration/workflow codes are deliberately outside the
        // extractor vocabulary; alert-log lines must always extract
        let mut gen = LogGenerator::new();
        for _ in 0..PERFORMANCE.len() {
            let line = gen.next_line();
            let codes = remedy_core::extract_codes(&line);
            assert!(!codes.is_empty(), "no code in: {}", line);
            assert!(codes[0].starts_with("PEGA"));
        }
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        let mut rng = rand::thread_rng();
        assert_eq!(fill("oops {not_a_thing}", &mut rng), "oops {not_a_thing}");
    }
}
