//! Issue pattern tables, one per category, rotated in declaration order.

pub const PERFORMANCE: &[&str] = &[
    "PEGA0001 - Interaction time exceeded threshold: {time}ms for {activity}",
    "PEGA0005 - Database time exceeded threshold: {db_time}ms, {db_count} operations",
    "PEGA0011 - Commit count exceeded threshold: {commit_count} commits in {time_window}s",
    "PEGA0020 - Clipboard size exceeded threshold: {size} elements, max {max_size}",
    "PEGA0041 - Agent/Queue Processor task run time exceeded: {runtime}ms",
    "PEGA0053 - Service response time exceeded threshold: {response_time}ms",
    "PEGA0073 - BIX extract duration exceeded threshold: {duration}ms",
    "PEGA0035 - Clipboard property exceeded WARN level: {property} size {size}",
];

pub const RUNTIME: &[&str] = &[
    "AUTH-403 - Missing privilege (authorization failure) for user {username}",
    "CONN-1001 - HTTP connector timeout: {service} connection failed after {timeout}ms",
    "CONN-JSONMAP-400 - JSON mapping failure in REST connector: {endpoint}",
    "QP-RETRYMAX - Queue Processor max retries reached: {processor_name}",
    "DB-DEADLOCK - Database deadlock detected: Transaction {tx_id} rolled back",
    "RULE-404 - Rule not found: {rule_name} in {rule_type}",
    "BIX-ORA-01653 - BIX extract failed due to Oracle tablespace issue",
    "EMAIL-READ-IO - Email listener I/O error: {error_message}",
    "DX-SECTION-INVALID - Invalid section rule in DX API: {section_name}",
    "CONN-401 - Unauthorized (HTTP 401) in REST connector: {endpoint}",
    "SOAP-FAULT-CLIENT - SOAP fault (client validation error): {service}",
    "LISTENER-PARSE-CSV - File listener CSV parsing error: {file_name}",
    "KAFKA-LAG-HIGH - Kafka topic lag exceeds threshold: {lag}ms",
    "SEARCH-REINDEX-FAIL - Search index rebuild failure: {index_name}",
];

pub const SECURITY: &[&str] = &[
    "SECU0001 - XSS payload blocked: {payload} from IP {ip_address}",
    "SECU0006 - CSRF token validation failed: {token} for user {username}",
    "SECU0010 - OAuth2 token expired/invalid: {token_type} for {client_id}",
    "SECU0021 - Authorization denied for restricted rule: {rule_name}",
    "SECU0003 - SQL injection attempt blocked: {query} from {source}",
    "SECU0007 - Session hijacking attempt detected: {session_id}",
    "SECU0015 - Privilege escalation attempt: {username} tried {action}",
    "SECU0025 - Brute force attack detected: {attempts} attempts from {ip}",
];

pub const INTEGRATION: &[&str] = &[
    "INT-1001 - External service timeout: {service} after {timeout}ms",
    "INT-2001 - API rate limit exceeded: {endpoint} limit {limit}/min",
    "INT-3001 - Data transformation error: {transformation} failed",
    "INT-4001 - Message queue overflow: {queue_name} size {size}",
    "INT-5001 - Webhook delivery failed: {webhook_url} status {status}",
    "INT-6001 - File transfer error: {file_name} to {destination}",
    "INT-7001 - Database sync failure: {table_name} sync error",
    "INT-8001 - Cache synchronization error: {cache_name} update failed",
];

pub const WORKFLOW: &[&str] = &[
    "WF-1001 - Workflow execution failed: {workflow_name} step {step}",
    "WF-2001 - Case processing error: {case_id} status update failed",
    "WF-3001 - Assignment rule failure: {rule_name} for {work_type}",
    "WF-4001 - SLA violation: {sla_name} exceeded by {duration}s",
    "WF-5001 - Decision table error: {table_name} evaluation failed",
    "WF-6001 - Flow execution timeout: {flow_name} after {timeout}ms",
    "WF-7001 - Data page refresh error: {data_page} load failed",
    "WF-8001 - Declarative rule error: {rule_name} calculation failed",
];

/// Category rotation order.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("performance", PERFORMANCE),
    ("runtime", RUNTIME),
    ("security", SECURITY),
    ("integration", INTEGRATION),
    ("workflow", WORKFLOW),
];
