//! JSON extraction from model output
//!
//! Models wrap their answer in prose, code fences or trailing commentary.
//! The extractor scans for `{`, finds the matching `}` and keeps the first
//! span that parses as a JSON object.

use crate::{OrchestratorError, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// Balanced spans that may fail to parse before the search gives up
pub const MAX_REJECTED_SPANS: usize = 64;

/// First balanced JSON object in `text`
///
/// ```rust
/// use tutor_orchestrator::extract::extract_json;
///
/// let text = r#"Sure! {"tool": "note_maker", "parameters": {}} Hope that helps."#;
/// let object = extract_json(text).unwrap();
/// assert_eq!(object["tool"], "note_maker");
/// ```
pub fn extract_json(text: &str) -> Result<Map<String, Value>> {
    let mut search_from = 0;
    let mut rejected = 0;

    while rejected < MAX_REJECTED_SPANS {
        let Some(offset) = text[search_from..].find('{') else {
            break;
        };
        let start = search_from + offset;

        // an unclosed span ends the search
        let Some(len) = balanced_span(&text[start..]) else {
            debug!(start, "Span never closes");
            break;
        };

        let candidate = &text[start..start + len];
        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(object)) => return Ok(object),
            Ok(_) => {}
            Err(e) => debug!(start, "Skipping unparseable span: {}", e),
        }
        rejected += 1;

        // '{' is one byte, so the next char boundary follows it
        search_from = start + 1;
    }

    Err(OrchestratorError::NoJsonFound {
        raw: text.to_string(),
    })
}

/// Byte length of the span opened by the `{` at the start of `text`
///
/// Braces inside string literals do not count. `None` when the span never
/// closes.
fn balanced_span(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}
