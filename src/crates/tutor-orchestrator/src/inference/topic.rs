//! Topic candidates from a free-text message

use regex::Regex;
use std::sync::OnceLock;

/// Phrasings that introduce a topic, highest precedence first
const TOPIC_PATTERNS: &[&str] = &[
    r"(?:explain|explain\s+about)\s+([A-Za-z0-9 _\-/]{2,})",
    r"what(?:'s| is| are)\s+([A-Za-z0-9 _\-/]{2,})\??",
    r"tell me about\s+([A-Za-z0-9 _\-/]{2,})",
    r"struggling with\s+([A-Za-z0-9 _\-/]{2,})",
    r"practice problems (?:on|for)\s+([A-Za-z0-9 _\-/]{2,})",
    r"need (?:help|practice) (?:with|on)\s+([A-Za-z0-9 _\-/]{2,})",
];

/// Word limit for the no-match fallback
const FALLBACK_WORDS: usize = 6;

fn patterns() -> &'static [Regex] {
    static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        TOPIC_PATTERNS
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    })
}

/// Likely topics mentioned in `message`, most likely first
///
/// Never empty. Matches are lower-cased; the fallback keeps the message's
/// own casing.
///
/// ```rust
/// use tutor_orchestrator::inference::topic_candidates;
///
/// assert_eq!(
///     topic_candidates("I need practice problems on derivatives"),
///     vec!["derivatives".to_string()]
/// );
/// ```
pub fn topic_candidates(message: &str) -> Vec<String> {
    let message = message.trim();
    let lower = message.to_lowercase();

    let mut candidates: Vec<String> = Vec::new();
    for pattern in patterns() {
        let Some(captures) = pattern.captures(&lower) else {
            continue;
        };
        let Some(group) = captures.get(1) else {
            continue;
        };
        let candidate = group
            .as_str()
            .trim()
            .trim_end_matches(&['.', '?', ',', '!'][..])
            .trim();
        if !candidate.is_empty() && !candidates.iter().any(|c| c == candidate) {
            candidates.push(candidate.to_string());
        }
    }

    if candidates.is_empty() {
        let words: Vec<&str> = message.split_whitespace().collect();
        if words.len() <= FALLBACK_WORDS {
            candidates.push(message.to_string());
        } else {
            candidates.push(words[..FALLBACK_WORDS].join(" "));
        }
    }

    candidates
}
