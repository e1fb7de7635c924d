//! Record-level salvage of truncated list responses.
//!
//! When healing is not enough -- the model was cut off in the middle of one
//! array element -- every structurally complete record is extracted from the
//! list and repackaged into a minimal valid container, discarding the tail.

use serde_json::Value;
use tracing::debug;

use crate::recovery::scan::ScanCursor;

/// Required keys for a quiz question record to be worth keeping.
pub const QUIZ_REQUIRED_KEYS: &[&str] =
    &["id", "type", "question", "correctAnswers", "explanation"];

/// Controls which array the salvager looks for and which keys a record must
/// carry to count as complete.
#[derive(Debug, Clone)]
pub struct SalvageOptions<'a> {
    /// JSON key introducing the array of records, e.g. `questions`.
    pub array_key: &'a str,
    pub required_keys: &'a [&'a str],
}

impl Default for SalvageOptions<'_> {
    fn default() -> Self {
        Self {
            array_key: "questions",
            required_keys: QUIZ_REQUIRED_KEYS,
        }
    }
}

/// Extracts every complete record from a truncated `"<array_key>": [...]`
/// list and reassembles a valid container around them.
///
/// Returns `None` when the marker key is absent or zero complete records
/// survive validation. Callers must treat `None` as a hard failure -- an
/// empty-array placeholder would silently look successful.
pub fn salvage_partial(raw: &str, opts: &SalvageOptions<'_>) -> Option<String> {
    let cleaned = raw.trim();
    let text = match cleaned.find('{') {
        Some(i) => &cleaned[i..],
        None => cleaned,
    };

    let marker = format!("\"{}\":", opts.array_key);
    let section = &text[text.find(&marker)?..];

    let mut cursor = ScanCursor::new();
    let mut span_start: Option<usize> = None;
    let mut records: Vec<&str> = Vec::new();

    for (i, c) in section.char_indices() {
        let depth_before = cursor.open_braces;
        if !cursor.step(c) {
            continue;
        }
        if c == '{' && depth_before == 0 {
            span_start = Some(i);
        } else if c == '}' && cursor.open_braces == 0 {
            if let Some(start) = span_start.take() {
                let candidate = &section[start..=i];
                if is_complete_record(candidate, opts.required_keys) {
                    records.push(candidate);
                } else {
                    debug!("discarding invalid record span of {} bytes", candidate.len());
                }
            }
        }
    }

    if records.is_empty() {
        return None;
    }

    let estimated_minutes = (records.len() as f64 * 1.5).ceil() as u64;
    Some(format!(
        "{{\"{}\": [{}], \"totalQuestions\": {}, \"estimatedTime\": {}}}",
        opts.array_key,
        records.join(","),
        records.len(),
        estimated_minutes
    ))
}

/// A span counts only if it parses on its own and carries every required key
/// with a non-null value. Brace balance alone is not trusted: a fragment can
/// balance by accident and still be garbage.
fn is_complete_record(candidate: &str, required_keys: &[&str]) -> bool {
    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => required_keys
            .iter()
            .all(|key| value.get(key).is_some_and(|v| !v.is_null())),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE_Q1: &str = r#"{"id":"q1","type":"single-choice","question":"Q?","correctAnswers":["A"],"explanation":"E"}"#;

    fn parse(s: &str) -> Value {
        serde_json::from_str(s).unwrap_or_else(|e| panic!("unparseable {s:?}: {e}"))
    }

    #[test]
    fn test_extracts_only_complete_records() {
        let input = format!(
            r#"{{"questions":[{COMPLETE_Q1},{{"id":"q2","type":"x","question":"Q2?","correctAn"#
        );
        let salvaged = salvage_partial(&input, &SalvageOptions::default()).unwrap();
        let value = parse(&salvaged);
        let questions = value["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0]["id"], "q1");
        assert!(!salvaged.contains("q2"));
        assert_eq!(value["totalQuestions"], 1);
        assert_eq!(value["estimatedTime"], 2);
    }

    #[test]
    fn test_drops_records_missing_required_keys() {
        // Structurally complete but no explanation.
        let input = r#"{"questions":[{"id":"q1","type":"x","question":"Q?","correctAnswers":["A"]}]}"#;
        assert!(salvage_partial(input, &SalvageOptions::default()).is_none());
    }

    #[test]
    fn test_returns_none_when_marker_missing() {
        let input = r#"{"items":[{"id":"q1"}]}"#;
        assert!(salvage_partial(input, &SalvageOptions::default()).is_none());
    }

    #[test]
    fn test_returns_none_when_every_record_is_truncated() {
        let input = r#"{"questions":[{"id":"q1","type":"x","question":"Q?","correctAn"#;
        assert!(salvage_partial(input, &SalvageOptions::default()).is_none());
    }

    #[test]
    fn test_leading_prose_is_ignored() {
        let input = format!("Sure, here are the questions:\n{{\"questions\":[{COMPLETE_Q1}]");
        let salvaged = salvage_partial(&input, &SalvageOptions::default()).unwrap();
        assert_eq!(parse(&salvaged)["questions"][0]["id"], "q1");
    }

    #[test]
    fn test_brace_inside_string_does_not_split_records() {
        let input = r#"{"questions":[{"id":"q1","type":"t","question":"What does } mean?","correctAnswers":["x"],"explanation":"E"},{"id":"q2","#;
        let salvaged = salvage_partial(input, &SalvageOptions::default()).unwrap();
        let value = parse(&salvaged);
        let questions = value["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0]["question"], "What does } mean?");
    }

    #[test]
    fn test_custom_key_and_required_fields() {
        let opts = SalvageOptions {
            array_key: "records",
            required_keys: &["name"],
        };
        let input = r#"junk {"records":[{"name":"a"},{"name":"b"},{"nam"#;
        let salvaged = salvage_partial(input, &opts).unwrap();
        let value = parse(&salvaged);
        assert_eq!(value["records"].as_array().unwrap().len(), 2);
        assert_eq!(value["totalQuestions"], 2);
        assert_eq!(value["estimatedTime"], 3);
    }
}
