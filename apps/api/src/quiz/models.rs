//! Quiz data model.
//!
//! Question shapes are a tagged union over the four UI-supported types,
//! validated at the JSON boundary — model output is never trusted as-is.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    /// Source material the questions are generated from.
    pub content: String,
    pub topic_title: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_question_count")]
    pub question_count: u32,
}

fn default_question_count() -> u32 {
    10
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// One validated quiz question. The wire format is camelCase with the
/// variant tag in a `type` field, matching what the frontend renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub question: String,
    pub correct_answers: Vec<String>,
    pub explanation: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// The four question shapes the frontend can render. Anything else coming
/// back from the model is rejected at deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionKind {
    #[serde(rename = "single-choice")]
    SingleChoice {
        #[serde(default)]
        options: Vec<String>,
    },
    #[serde(rename = "multiple-choice")]
    MultipleChoice {
        #[serde(default)]
        options: Vec<String>,
    },
    /// Always normalized to options `["True", "False"]`.
    #[serde(rename = "true-false")]
    TrueFalse {
        #[serde(default)]
        options: Vec<String>,
    },
    /// Fill in the missing word or phrase; carries no options.
    /// The alias covers a spelling the model falls into now and then.
    #[serde(rename = "fill-blank", alias = "fill-in-blank")]
    FillBlank,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
    pub total_questions: usize,
    /// Estimated completion time in minutes.
    pub estimated_time: u64,
    pub metadata: QuizMetadata,
}

/// Adjustments made along the way, surfaced so the frontend can tell the
/// user when they got fewer questions than they asked for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizMetadata {
    pub requested_questions: u32,
    pub actual_questions: usize,
    pub content_truncated: bool,
    pub question_count_adjusted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_choice_deserializes() {
        let json = r#"{
            "id": "q1",
            "type": "single-choice",
            "question": "Which one?",
            "options": ["A", "B", "C", "D"],
            "correctAnswers": ["A"],
            "explanation": "Because A.",
            "difficulty": "easy"
        }"#;
        let q: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, "q1");
        assert_eq!(q.difficulty, Difficulty::Easy);
        match q.kind {
            QuestionKind::SingleChoice { ref options } => assert_eq!(options.len(), 4),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_fill_blank_accepts_model_alias() {
        let json = r#"{
            "id": "q2",
            "type": "fill-in-blank",
            "question": "Rust's borrow ____ enforces aliasing rules.",
            "correctAnswers": ["checker"],
            "explanation": "The borrow checker."
        }"#;
        let q: QuizQuestion = serde_json::from_str(json).unwrap();
        assert!(matches!(q.kind, QuestionKind::FillBlank));
        assert_eq!(q.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_unsupported_type_is_rejected() {
        let json = r#"{
            "id": "q3",
            "type": "essay",
            "question": "Discuss.",
            "correctAnswers": ["n/a"],
            "explanation": "No."
        }"#;
        assert!(serde_json::from_str::<QuizQuestion>(json).is_err());
    }

    #[test]
    fn test_question_serializes_with_camel_case_and_tag() {
        let q = QuizQuestion {
            id: "q1".to_string(),
            kind: QuestionKind::TrueFalse {
                options: vec!["True".to_string(), "False".to_string()],
            },
            question: "Is water wet?".to_string(),
            correct_answers: vec!["True".to_string()],
            explanation: "It is.".to_string(),
            difficulty: Difficulty::Hard,
        };
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["type"], "true-false");
        assert_eq!(value["correctAnswers"][0], "True");
        assert_eq!(value["difficulty"], "hard");
    }

    #[test]
    fn test_request_defaults() {
        let json = r#"{"content": "some text", "topicTitle": "Ownership"}"#;
        let request: GenerateQuizRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.difficulty, Difficulty::Medium);
        assert_eq!(request.question_count, 10);
    }
}
