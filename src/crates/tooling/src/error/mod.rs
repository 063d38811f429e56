//! Error chain helpers
//!
//! `reqwest` and friends nest the interesting part of a failure (connection
//! refused, timed out, bad status) several `source()` levels deep. These
//! helpers flatten a chain for log lines and API error details.
//!
//! ```rust,ignore
//! use tooling::error::inline_error_chain;
//!
//! if let Err(e) = client.post(url).send().await {
//!     tracing::warn!("call failed: {}", inline_error_chain(&e));
//! }
//! ```

use std::error::Error as StdError;

/// Format an error chain as a multi-line string
///
/// Each `source()` is printed on its own line, indented one step deeper
/// than its parent.
pub fn format_error_chain(error: &dyn StdError) -> String {
    let mut result = format!("Error: {}", error);
    let mut current = error.source();
    let mut level = 1;

    while let Some(source) = current {
        result.push_str(&format!(
            "\n{:indent$}Caused by: {}",
            "",
            source,
            indent = level * 2
        ));
        current = source.source();
        level += 1;
    }

    result
}

/// Format an error chain on a single line, outermost first
///
/// Messages already contained in their parent's message are skipped, since
/// `thiserror` wrappers often repeat the source text verbatim.
pub fn inline_error_chain(error: &dyn StdError) -> String {
    let mut result = error.to_string();
    let mut current = error.source();

    while let Some(source) = current {
        let text = source.to_string();
        if !result.contains(&text) {
            result.push_str(": ");
            result.push_str(&text);
        }
        current = source.source();
    }

    result
}
