//! Quiz generation pipeline: prompt construction, token budgeting, the LLM
//! call, and recovery/normalization of the structured response.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, LlmClient, LlmError};
use crate::quiz::models::{
    Difficulty, GenerateQuizRequest, QuizMetadata, QuizQuestion, QuizResponse,
};
use crate::quiz::prompts::{QUIZ_PROMPT_TEMPLATE, QUIZ_SYSTEM};
use crate::recovery::{recover_json, SalvageOptions};

/// Character cap applied to source content before prompting.
const MAX_CONTENT_LENGTH: usize = 8000;
/// Hard cap on questions per request; beyond this the model's output-token
/// ceiling makes truncation near-certain.
const MAX_QUESTIONS: u32 = 17;
const MODEL_MAX_TOKENS: u32 = 4096;
const BASE_TOKENS: u32 = 500;
const TOKENS_PER_QUESTION: u32 = 200;
/// Fewer surviving questions than this means the generation failed.
const MIN_QUESTIONS: usize = 3;

const UNRECOVERABLE_MESSAGE: &str =
    "Failed to generate a valid quiz. Please try again with fewer questions.";

pub async fn generate_quiz(
    llm: &LlmClient,
    request: GenerateQuizRequest,
) -> Result<QuizResponse, AppError> {
    let content_truncated = request.content.chars().count() > MAX_CONTENT_LENGTH;
    let content = if content_truncated {
        let truncated: String = request.content.chars().take(MAX_CONTENT_LENGTH).collect();
        format!("{truncated}...[content truncated]")
    } else {
        request.content.clone()
    };

    let (count, max_tokens) = budget_questions(request.question_count);
    debug!(
        "quiz generation: requested {}, budgeted {count} questions ({max_tokens} tokens)",
        request.question_count
    );

    let prompt = build_prompt(&content, &request.topic_title, request.difficulty, count);

    let response = llm
        .call(&prompt, QUIZ_SYSTEM, max_tokens)
        .await
        .map_err(|e| AppError::Llm(format!("quiz generation failed: {e}")))?;
    let raw = response
        .text()
        .ok_or(LlmError::EmptyContent)
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let cleaned = strip_json_fences(raw);
    let recovered = recover_json(cleaned, &SalvageOptions::default())
        .ok_or_else(|| AppError::Unrecoverable(UNRECOVERABLE_MESSAGE.to_string()))?;

    build_response(recovered, &request, content_truncated)
}

/// Clamps the question count and allocates output tokens for it, shrinking
/// the count further if the budget would blow the model ceiling.
fn budget_questions(requested: u32) -> (u32, u32) {
    let mut count = requested.min(MAX_QUESTIONS);
    let mut max_tokens = BASE_TOKENS + count * TOKENS_PER_QUESTION;
    if max_tokens > MODEL_MAX_TOKENS {
        let cap = (MODEL_MAX_TOKENS - BASE_TOKENS) / TOKENS_PER_QUESTION;
        let previous = count;
        count = count.min(cap);
        max_tokens = BASE_TOKENS + count * TOKENS_PER_QUESTION;
        info!("token budget exceeded: reduced {previous} -> {count} questions");
    }
    (count, max_tokens.min(MODEL_MAX_TOKENS))
}

fn build_prompt(content: &str, topic_title: &str, difficulty: Difficulty, count: u32) -> String {
    QUIZ_PROMPT_TEMPLATE
        .replace("{question_count}", &count.to_string())
        .replace("{topic_title}", topic_title)
        .replace("{content}", content)
        .replace("{difficulty}", difficulty.as_str())
        .replace("{estimated_time}", &estimated_minutes(count as usize).to_string())
}

/// Estimated completion time: 1.5 minutes per question, rounded up.
fn estimated_minutes(question_count: usize) -> u64 {
    (question_count as f64 * 1.5).ceil() as u64
}

/// Validates and normalizes the recovered container into a `QuizResponse`.
fn build_response(
    mut value: Value,
    request: &GenerateQuizRequest,
    content_truncated: bool,
) -> Result<QuizResponse, AppError> {
    let raw_questions = match value.get_mut("questions").map(Value::take) {
        Some(Value::Array(list)) => list,
        _ => {
            return Err(AppError::Unrecoverable(
                "The model response did not contain a question list.".to_string(),
            ))
        }
    };

    let original_count = raw_questions.len();
    debug!("recovered response contained {original_count} raw questions");

    let mut questions: Vec<QuizQuestion> = Vec::with_capacity(original_count);
    for (index, raw) in raw_questions.into_iter().enumerate() {
        if let Some(question) = normalize_question(raw, index, request.difficulty) {
            questions.push(question);
        }
    }

    if questions.len() < original_count {
        info!(
            "filtered out {} incomplete or unsupported questions, {} remain",
            original_count - questions.len(),
            questions.len()
        );
    }

    if questions.len() < MIN_QUESTIONS {
        return Err(AppError::Unrecoverable(format!(
            "Only {} valid questions were generated. Please try again with simpler content or fewer questions.",
            questions.len()
        )));
    }

    let total = questions.len();
    Ok(QuizResponse {
        total_questions: total,
        estimated_time: estimated_minutes(total),
        metadata: QuizMetadata {
            requested_questions: request.question_count,
            actual_questions: total,
            content_truncated,
            question_count_adjusted: total != request.question_count as usize,
        },
        questions,
    })
}

/// Patches up one raw question and validates it into the tagged union.
/// Returns `None` for anything not worth keeping; the caller counts drops.
fn normalize_question(mut raw: Value, index: usize, fallback: Difficulty) -> Option<QuizQuestion> {
    let obj = raw.as_object_mut()?;

    let has = |obj: &serde_json::Map<String, Value>, key: &str| {
        obj.get(key).is_some_and(|v| !v.is_null())
    };
    if !(has(obj, "question") && has(obj, "correctAnswers") && has(obj, "explanation")) {
        warn!("dropping incomplete question at index {index}");
        return None;
    }

    // Models occasionally return a bare value instead of an array here.
    if let Some(answers) = obj.get_mut("correctAnswers") {
        if !answers.is_array() {
            let single = match answers.take() {
                Value::String(s) => s,
                other => other.to_string(),
            };
            *answers = Value::Array(vec![Value::String(single)]);
        }
    }

    if obj.get("id").and_then(Value::as_str).is_none() {
        obj.insert("id".to_string(), Value::String(format!("q{}", index + 1)));
    }
    if obj.get("type").and_then(Value::as_str).is_none() {
        obj.insert("type".to_string(), Value::String("single-choice".to_string()));
    }
    if obj.get("difficulty").and_then(Value::as_str).is_none() {
        obj.insert(
            "difficulty".to_string(),
            Value::String(fallback.as_str().to_string()),
        );
    }

    // True-false answers come back in every casing imaginable.
    if obj.get("type").and_then(Value::as_str) == Some("true-false") {
        let answer = obj
            .get("correctAnswers")
            .and_then(|v| v.get(0))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_lowercase();
        let normalized = if answer == "true" || answer == "1" {
            "True"
        } else {
            "False"
        };
        obj.insert("options".to_string(), serde_json::json!(["True", "False"]));
        obj.insert("correctAnswers".to_string(), serde_json::json!([normalized]));
    }

    match serde_json::from_value::<QuizQuestion>(raw) {
        Ok(question) => Some(question),
        Err(e) => {
            warn!("dropping question at index {index}: {e}");
            None
        }
    }
}
