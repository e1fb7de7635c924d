//! Shared scanning primitives for best-effort JSON repair.
//!
//! Both the healer and the salvager walk text one character at a time with
//! the same rules: an unescaped double quote toggles string mode, a backslash
//! consumes exactly the next character, and bracket/brace counters only move
//! while outside a string.

/// Single-pass scan state: string/escape tracking plus net bracket balance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanCursor {
    in_string: bool,
    escape_next: bool,
    pub open_braces: i32,
    pub open_brackets: i32,
}

impl ScanCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances over one character. Returns `true` when the character was
    /// read structurally, i.e. outside any string and not escaped.
    pub fn step(&mut self, c: char) -> bool {
        if self.escape_next {
            self.escape_next = false;
            return false;
        }
        match c {
            '\\' => {
                self.escape_next = true;
                false
            }
            '"' => {
                self.in_string = !self.in_string;
                false
            }
            _ if self.in_string => false,
            '{' => {
                self.open_braces += 1;
                true
            }
            '}' => {
                self.open_braces -= 1;
                true
            }
            '[' => {
                self.open_brackets += 1;
                true
            }
            ']' => {
                self.open_brackets -= 1;
                true
            }
            _ => true,
        }
    }

    /// Runs a full scan over `text` and returns the final cursor state.
    pub fn scan(text: &str) -> Self {
        let mut cursor = Self::new();
        for c in text.chars() {
            cursor.step(c);
        }
        cursor
    }

    pub fn in_string(&self) -> bool {
        self.in_string
    }

    /// True when nothing is left dangling: no open string and no net-open
    /// braces or brackets.
    pub fn is_balanced(&self) -> bool {
        !self.in_string && self.open_braces == 0 && self.open_brackets == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_object() {
        let cursor = ScanCursor::scan(r#"{"a": [1, 2], "b": "x"}"#);
        assert!(cursor.is_balanced());
    }

    #[test]
    fn test_counts_unclosed_braces_and_brackets() {
        let cursor = ScanCursor::scan(r#"{"a": [{"b": 1"#);
        assert_eq!(cursor.open_braces, 2);
        assert_eq!(cursor.open_brackets, 1);
        assert!(!cursor.in_string());
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let cursor = ScanCursor::scan(r#"{"a": "}}}]]]"}"#);
        assert!(cursor.is_balanced());
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let cursor = ScanCursor::scan(r#"{"a": "he said \"hi\" and stopped"#);
        assert!(cursor.in_string());
        assert_eq!(cursor.open_braces, 1);
    }

    #[test]
    fn test_escape_is_one_shot() {
        let mut cursor = ScanCursor::new();
        cursor.step('"');
        cursor.step('\\');
        cursor.step('"');
        assert!(cursor.in_string());
        cursor.step('"');
        assert!(!cursor.in_string());
    }

    #[test]
    fn test_step_reports_structural_characters() {
        let mut cursor = ScanCursor::new();
        assert!(cursor.step('{'));
        assert!(!cursor.step('"'));
        assert!(!cursor.step('{'));
        assert_eq!(cursor.open_braces, 1);
    }
}
