//! Truncation recovery for structured LLM output.
//!
//! The model is asked for a single JSON object but may be cut off by its
//! output-token ceiling. These utilities get as much structured data back as
//! possible before the caller gives up and asks the user to request fewer
//! items. The chain is: direct parse, then quote/bracket healing, then
//! record-level salvage of the question list.

pub mod heal;
pub mod salvage;
pub mod scan;

use serde_json::Value;
use tracing::{debug, warn};

pub use heal::heal_json;
pub use salvage::{salvage_partial, SalvageOptions};

/// Removes trailing commas before a closing `}` or `]`, outside strings.
///
/// Kept as an explicit pre-pass rather than folded into [`heal_json`]: the
/// healer's contract is quote/bracket balance only, and input that already
/// parses should pass through the chain without being rewritten.
pub fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = scan::ScanCursor::new();
    for (i, c) in text.char_indices() {
        let structural = cursor.step(c);
        if structural && c == ',' {
            let rest = text[i + 1..].trim_start();
            if rest.starts_with('}') || rest.starts_with(']') {
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Full recovery chain for text that is supposed to contain one JSON object.
///
/// Returns `None` only when every stage fails; callers surface that as a
/// user-facing error suggesting a smaller request.
pub fn recover_json(raw: &str, opts: &SalvageOptions<'_>) -> Option<Value> {
    let cleaned = strip_trailing_commas(raw);

    if let Ok(value) = serde_json::from_str(&cleaned) {
        return Some(value);
    }
    debug!("direct parse failed, attempting to heal");

    let healed = heal_json(&cleaned);
    match serde_json::from_str(&healed) {
        Ok(value) => {
            debug!("healed response parsed");
            return Some(value);
        }
        Err(e) => warn!("healed response still unparseable: {e}"),
    }

    let salvaged = salvage_partial(&cleaned, opts)?;
    match serde_json::from_str(&salvaged) {
        Ok(value) => {
            warn!("salvaged partial response, incomplete tail discarded");
            Some(value)
        }
        Err(e) => {
            warn!("salvage produced unparseable output: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_trailing_commas_outside_strings() {
        assert_eq!(
            strip_trailing_commas(r#"{"a": [1, 2,], }"#),
            r#"{"a": [1, 2] }"#
        );
    }

    #[test]
    fn test_preserves_commas_inside_strings() {
        let input = r#"{"a": "1,],", "b": 2}"#;
        assert_eq!(strip_trailing_commas(input), input);
    }

    #[test]
    fn test_recover_passes_valid_json_through() {
        let input = r#"{"questions": [], "totalQuestions": 0}"#;
        let value = recover_json(input, &SalvageOptions::default()).unwrap();
        assert_eq!(value["totalQuestions"], 0);
    }

    #[test]
    fn test_recovers_truncated_response_via_healing() {
        // Model text cut off before the closing ] and } of the container.
        let raw = "Here you go:\n{\"questions\": [{\"id\":\"q1\",\"type\":\"single-choice\",\"question\":\"Q?\",\"options\":[\"A\",\"B\"],\"correctAnswers\":[\"A\"],\"explanation\":\"ok\"}],\"totalQuestions\":1,\"estimatedTime\":2\n";
        let value = recover_json(raw, &SalvageOptions::default()).unwrap();
        assert_eq!(value["totalQuestions"], 1);
        assert_eq!(value["questions"][0]["id"], "q1");
        assert_eq!(value["questions"][0]["explanation"], "ok");
    }

    #[test]
    fn test_falls_back_to_salvage_when_healing_is_not_enough() {
        // Truncated mid-key: healing closes brackets in the wrong order, so
        // only record extraction can save the first question.
        let raw = r#"{"questions":[{"id":"q1","type":"true-false","question":"Q?","correctAnswers":["True"],"explanation":"E"},{"id":"q2","type":"single-choice","quest"#;
        let value = recover_json(raw, &SalvageOptions::default()).unwrap();
        let questions = value["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0]["id"], "q1");
    }

    #[test]
    fn test_returns_none_when_nothing_recoverable() {
        assert!(recover_json("the model said nothing useful", &SalvageOptions::default()).is_none());
        assert!(recover_json(r#"{"questions":[{"id":"q1","#, &SalvageOptions::default()).is_none());
    }
}
