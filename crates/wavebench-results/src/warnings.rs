//! Warning extraction from simulator logs.

use std::collections::HashSet;

/// Only the end of the log is inspected.
const TAIL_LINES: usize = 200;
const MAX_WARNINGS: usize = 20;
const KEYWORDS: [&str; 3] = ["warning", "converg", "error"];

/// Distinct warning-like lines from the tail of a simulator log.
///
/// A line qualifies when it mentions `warning`, `converg` or `error` in any
/// case. Lines are trimmed, kept in order and capped at twenty.
pub fn tail_warnings(log_text: &str) -> Vec<String> {
    let lines: Vec<&str> = log_text.lines().collect();
    let tail = &lines[lines.len().saturating_sub(TAIL_LINES)..];

    let mut seen = HashSet::new();
    tail.iter()
        .filter(|line| {
            let lower = line.to_lowercase();
            KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(|line| line.trim())
        .filter(|line| seen.insert(*line))
        .take(MAX_WARNINGS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_keywords_case_insensitively() {
        let log = "Circuit: tb\n  Warning: vin has no DC value  \nDoing analysis\n\
                   timestep too small; CONVERGENCE failure\nError on line 4\ndone\n";
        assert_eq!(
            tail_warnings(log),
            [
                "Warning: vin has no DC value",
                "timestep too small; CONVERGENCE failure",
                "Error on line 4",
            ]
        );
    }

    #[test]
    fn test_dedupes_after_trimming() {
        let log = "warning: a\n   warning: a\nwarning: b\nwarning: a\n";
        assert_eq!(tail_warnings(log), ["warning: a", "warning: b"]);
    }

    #[test]
    fn test_only_tail_is_scanned() {
        let mut log = String::from("error: early\n");
        for _ in 0..TAIL_LINES {
            log.push_str("ok\n");
        }
        log.push_str("error: late\n");
        assert_eq!(tail_warnings(&log), ["error: late"]);
    }

    #[test]
    fn test_capped() {
        let log: String = (0..50).map(|i| format!("warning {i}\n")).collect();
        let warnings = tail_warnings(&log);
        assert_eq!(warnings.len(), MAX_WARNINGS);
        assert_eq!(warnings[0], "warning 0");
        assert!(tail_warnings("").is_empty());
    }
}
