//! Tiered KEDB matching.
//!
//! Finds the best knowledge-base entry for a classifier verdict plus the
//! raw log line it came from. Tiers are tried in order and the first one
//! producing a match wins; within a tier, the first entry in catalogue
//! order wins. Only self-healable entries are eligible. Thresholds here
//! are load-bearing: they were validated against the decision scenarios
//! and must not be "cleaned up" into a generic fuzzy matcher.

use crate::data_model::{ClassifierVerdict, KedbEntry};
use crate::extractor::extract_codes;
use crate::kedb::KnowledgeBase;
use std::collections::HashSet;

/// Word pairs that co-occur in known platform issues. Tier-5 fallback
/// when code and keyword matching both come up empty.
const BIGRAMS: &[(&str, &str)] = &[
    ("clipboard", "exceeded"),
    ("interaction", "time"),
    ("database", "time"),
    ("commit", "count"),
    ("clipboard", "size"),
    ("agent", "time"),
    ("service", "response"),
    ("bix", "extract"),
    ("authentication", "failed"),
    ("authorization", "denied"),
    ("connector", "timeout"),
    ("deadlock", "detected"),
    ("queue", "processor"),
    ("xss", "blocked"),
    ("csrf", "token"),
];

/// Minimum token length for keyword overlap; "the", "for" and friends
/// carry no signal.
const MIN_TOKEN_LEN: usize = 3;

/// Tier-4 threshold: shared tokens required, and qualifying tokens the
/// entry description must have.
const MIN_SHARED_TOKENS: usize = 2;

/// Find the best self-healable KEDB entry for this verdict and log line.
///
/// Returns `None` when nothing matches; absence is an answer, not an
/// error.
pub fn find_match<'a>(
    verdict: &ClassifierVerdict,
    log_line: &str,
    kb: &'a KnowledgeBase,
) -> Option<&'a KedbEntry> {
    let healable: Vec<&KedbEntry> = kb.entries().iter().filter(|e| e.self_healable).collect();
    if healable.is_empty() {
        return None;
    }

    let anomaly = verdict.anomaly.to_lowercase();
    let log_upper = log_line.to_uppercase();

    // Tier 1: exact code extracted from the log line
    let codes = extract_codes(log_line);
    if !codes.is_empty() {
        for &entry in &healable {
            if codes.iter().any(|c| c == &entry.match_key.to_uppercase()) {
                return Some(entry);
            }
        }
    }

    // Tier 2: match key verbatim inside the log line
    for &entry in &healable {
        if log_upper.contains(&entry.match_key.to_uppercase()) {
            return Some(entry);
        }
    }

    // Tier 3: entry description contained in the anomaly text
    for &entry in &healable {
        let description = entry.description.to_lowercase();
        if description.len() > 5 && anomaly.contains(&description) {
            return Some(entry);
        }
    }

    // Tier 4: weighted keyword overlap between description and anomaly
    let anomaly_tokens = qualifying_tokens(&anomaly);
    for &entry in &healable {
        let description = entry.description.to_lowercase();
        let entry_tokens = qualifying_tokens(&description);
        if entry_tokens.len() < MIN_SHARED_TOKENS {
            continue;
        }
        let shared = entry_tokens.intersection(&anomaly_tokens).count();
        if shared >= MIN_SHARED_TOKENS {
            return Some(entry);
        }
    }

    // Tier 5: fixed domain bigrams present in both texts
    for &entry in &healable {
        let description = entry.description.to_lowercase();
        for (a, b) in BIGRAMS {
            if description.contains(a)
                && description.contains(b)
                && anomaly.contains(a)
                && anomaly.contains(b)
            {
                return Some(entry);
            }
        }
    }

    None
}

fn qualifying_tokens(text: &str) -> HashSet<&str> {
    text.split_whitespace()
        .filter(|w| w.len() > MIN_TOKEN_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_model::Severity;

    fn entry(match_key: &str, description: &str, self_healable: bool) -> KedbEntry {
        KedbEntry {
            match_key: match_key.to_string(),
            description: description.to_string(),
            category: "test".to_string(),
            severity: Severity::Medium,
            self_healable,
            hours_saved: 2.0,
            fix: format!("Fix for {}", match_key),
        }
    }

    fn verdict(anomaly: &str) -> ClassifierVerdict {
        ClassifierVerdict {
            anomaly: anomaly.to_string(),
            ..ClassifierVerdict::default()
        }
    }

    #[test]
    fn test_tier1_exact_code_match() {
        // Scenario A: code in the line equals an entry match key
        let kb = KnowledgeBase::new(vec![entry("AUTH-403", "authorization failure", true)]);
        let v = verdict("auth failure");
        let log = "2026-08-07 AUTH-403 - Missing privilege for user USER_1234";
        let m = find_match(&v, log, &kb).unwrap();
        assert_eq!(m.match_key, "AUTH-403");
    }

    #[test]
    fn test_tier1_ignores_anomaly_content() {
        // An exact code hit wins regardless of what the classifier said
        let kb = KnowledgeBase::new(vec![entry("PEGA0020", "clipboard size exceeded", true)]);
        let v = verdict("something entirely unrelated");
        let m = find_match(&v, "PEGA0020 - Clipboard size exceeded threshold", &kb);
        assert!(m.is_some());
    }

    #[test]
    fn test_not_healable_never_returned() {
        let kb = KnowledgeBase::new(vec![entry("AUTH-403", "authorization failure", false)]);
        let v = verdict("auth failure authorization failure");
        assert!(find_match(&v, "AUTH-403 - Missing privilege", &kb).is_none());
    }

    #[test]
    fn test_empty_kb_never_matches() {
        // Scenario B
        let kb = KnowledgeBase::empty();
        let v = verdict("anything at all");
        assert!(find_match(&v, "AUTH-403 - Missing privilege", &kb).is_none());
    }

    #[test]
    fn test_tier2_substring_containment() {
        let kb = KnowledgeBase::new(vec![entry("tablespace", "oracle tablespace full", true)]);
        let v = verdict("unrelated anomaly");
        // "tablespace" is not in the code vocabulary but appears verbatim
        let m = find_match(&v, "Extract failed due to Oracle TABLESPACE issue", &kb);
        assert!(m.is_some());
    }

    #[test]
    fn test_tier3_description_in_anomaly() {
        let kb = KnowledgeBase::new(vec![entry("KC-1", "kafka topic lag", true)]);
        let v = verdict("detected kafka topic lag beyond threshold");
        assert!(find_match(&v, "no codes in this line", &kb).is_some());
    }

    #[test]
    fn test_tier3_requires_substantial_description() {
        // Descriptions of five characters or fewer never containment-match
        let kb = KnowledgeBase::new(vec![entry("KC-1", "lag", true)]);
        let v = verdict("detected lag beyond threshold");
        assert!(find_match(&v, "no codes in this line", &kb).is_none());
    }

    #[test]
    fn test_tier4_keyword_overlap() {
        let kb = KnowledgeBase::new(vec![entry(
            "WF-1001",
            "workflow execution failure during processing",
            true,
        )]);
        let v = verdict("execution failure observed in nightly workflow");
        assert!(find_match(&v, "no recognizable codes", &kb).is_some());
    }

    #[test]
    fn test_tier4_single_shared_token_is_not_enough() {
        let kb = KnowledgeBase::new(vec![entry("WF-1001", "workflow execution failure", true)]);
        let v = verdict("workflow looked slow today");
        assert!(find_match(&v, "no recognizable codes", &kb).is_none());
    }

    #[test]
    fn test_tier5_bigram_heuristic() {
        // "bix" is too short to be a qualifying token, so tier 4 sees only
        // one shared token; the ("bix", "extract") bigram still matches
        let kb = KnowledgeBase::new(vec![entry("BIX-01", "bix extract window overran", true)]);
        let v = verdict("the bix extract stalled overnight");
        assert!(find_match(&v, "no recognizable codes", &kb).is_some());
    }

    #[test]
    fn test_first_entry_wins_on_duplicates() {
        let mut first = entry("AUTH-403", "authorization failure", true);
        first.fix = "first".to_string();
        let mut second = entry("AUTH-403", "authorization failure", true);
        second.fix = "second".to_string();
        let kb = KnowledgeBase::new(vec![first, second]);
        let v = verdict("auth failure");
        let m = find_match(&v, "AUTH-403 - Missing privilege", &kb).unwrap();
        assert_eq!(m.fix, "first");
    }

    #[test]
    fn test_deterministic() {
        let kb = KnowledgeBase::new(vec![
            entry("PEGA0001", "interaction time exceeded", true),
            entry("PEGA0005", "database time exceeded", true),
        ]);
        let v = verdict("interaction time exceeded threshold");
        let log = "no codes here";
        let a = find_match(&v, log, &kb).map(|e| e.match_key.clone());
        for _ in 0..10 {
            let b = find_match(&v, log, &kb).map(|e| e.match_key.clone());
            assert_eq!(a, b);
        }
    }
}
