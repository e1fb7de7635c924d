// Quiz generation: prompt construction, token budgeting, and recovery of
// structured output from a model that may truncate mid-response.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
