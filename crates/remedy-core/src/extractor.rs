//! Error-code signal extraction.
//!
//! Pulls structured error-code tokens out of a raw log line using a fixed
//! vocabulary of code shapes (PEGA0001, AUTH-403, DB-DEADLOCK, ...).
//! Pure and deterministic; an unrecognized line yields an empty set.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Recognized code shapes, applied to the uppercased line.
    static ref CODE_VOCABULARY: Regex = Regex::new(
        r"(PEGA\d{4}|AUTH-\d{3}|CONN-\d{4}|DB-\w+|QP-\w+|SECU\d{4}|RULE-\d{3}|BIX-\w+|EMAIL-\w+|DX-\w+|SOAP-\w+|LISTENER-\w+|KAFKA-\w+|SEARCH-\w+)"
    )
    .expect("code vocabulary regex is valid");
}

/// Extract candidate error codes from a raw log line.
///
/// Codes come back uppercased, in order of first appearance, without
/// duplicates.
pub fn extract_codes(line: &str) -> Vec<String> {
    let upper = line.to_uppercase();
    let mut codes: Vec<String> = Vec::new();
    for m in CODE_VOCABULARY.find_iter(&upper) {
        let code = m.as_str().to_string();
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_alert_codes() {
        let line = "PEGA0020 - Clipboard size exceeded threshold: 12000 elements, max 10000";
        assert_eq!(extract_codes(line), vec!["PEGA0020"]);
    }

    #[test]
    fn test_extracts_hyphenated_codes() {
        assert_eq!(
            extract_codes("AUTH-403 - Missing privilege for user USER_1234"),
            vec!["AUTH-403"]
        );
        assert_eq!(
            extract_codes("DB-DEADLOCK detected: Transaction TX_123456 rolled back"),
            vec!["DB-DEADLOCK"]
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(extract_codes("pega0001 interaction time"), vec!["PEGA0001"]);
    }

    #[test]
    fn test_multiple_codes_in_order() {
        let line = "SECU0006 triggered after CONN-1001 timeout";
        assert_eq!(extract_codes(line), vec!["SECU0006", "CONN-1001"]);
    }

    #[test]
    fn test_deduplicates() {
        let line = "AUTH-403 retry AUTH-403";
        assert_eq!(extract_codes(line), vec!["AUTH-403"]);
    }

    #[test]
    fn test_no_codes() {
        assert!(extract_codes("Case C-42 processed successfully").is_empty());
        assert!(extract_codes("").is_empty());
    }
}
