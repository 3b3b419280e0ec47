// Tailoring: prompt building, the LLM call, and resolving the model's reply
// into a validated StructuredResume.
// All LLM calls go through the ChatModel collaborator in AppState.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod resolver;
