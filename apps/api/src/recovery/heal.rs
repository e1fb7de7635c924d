//! Best-effort repair of truncated JSON objects.

use serde_json::Value;

use crate::recovery::scan::ScanCursor;

/// Heals a string that is supposed to contain one JSON object but may have
/// been cut off mid-emission: unterminated strings, arrays, and objects are
/// closed so the result has a chance of parsing.
///
/// Total function: never fails, even on empty or brace-less input. Callers
/// validate the result by attempting to parse it; the healer itself makes no
/// promise beyond quote/bracket balance.
pub fn heal_json(raw: &str) -> String {
    let cleaned = raw.trim();

    let start = cleaned.find('{');
    let end = cleaned.rfind('}');

    // Fast path: a complete-looking object that actually parses is returned
    // untouched, even when the model wrapped it in prose.
    if let (Some(start), Some(end)) = (start, end) {
        if start < end {
            let candidate = &cleaned[start..=end];
            if serde_json::from_str::<Value>(candidate).is_ok() {
                return candidate.to_string();
            }
        }
    }

    // No object start anywhere: nothing to heal.
    let Some(start) = start else {
        return cleaned.to_string();
    };

    let mut healed = cleaned[start..].to_string();
    let cursor = ScanCursor::scan(&healed);

    if cursor.in_string() {
        healed.push('"');
    }
    // Brackets close before braces so an unterminated array nested inside an
    // object closes before its parent.
    for _ in 0..cursor.open_brackets.max(0) {
        healed.push(']');
    }
    for _ in 0..cursor.open_braces.max(0) {
        healed.push('}');
    }
    healed
}
