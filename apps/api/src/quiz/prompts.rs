// All LLM prompt constants for the Quiz module.

/// System prompt for quiz generation — enforces JSON-only output.
pub const QUIZ_SYSTEM: &str = "You are an expert quiz author. \
    Generate quiz questions from the provided learning content. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Quiz generation prompt template. Replace `{question_count}`,
/// `{topic_title}`, `{content}`, `{difficulty}`, and `{estimated_time}`
/// before sending.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Generate {question_count} quiz questions in JSON format.

Topic: {topic_title}
Content: {content}

Return valid JSON only. No text before or after. Format:

{
  "questions": [
    {
      "id": "q1",
      "type": "single-choice",
      "question": "Question text?",
      "options": ["A", "B", "C", "D"],
      "correctAnswers": ["A"],
      "explanation": "Brief explanation.",
      "difficulty": "{difficulty}"
    },
    {
      "id": "q2",
      "type": "true-false",
      "question": "Statement to evaluate?",
      "options": ["True", "False"],
      "correctAnswers": ["True"],
      "explanation": "Brief explanation.",
      "difficulty": "{difficulty}"
    }
  ],
  "totalQuestions": {question_count},
  "estimatedTime": {estimated_time}
}

IMPORTANT: Generate exactly {question_count} questions using ONLY these 4 types:
1. "single-choice" - one correct answer from multiple options
2. "multiple-choice" - multiple correct answers from options
3. "true-false" - boolean statement with options ["True", "False"]
4. "fill-blank" - fill in missing word/phrase (no options array)

DO NOT generate any other question types. Use ONLY: single-choice, multiple-choice, true-false, fill-blank.
For true-false questions, always use options: ["True", "False"] and correctAnswers as ["True"] or ["False"].
For fill-blank questions, use type: "fill-blank" with no options array.
"#;
