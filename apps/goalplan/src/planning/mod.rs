// Savings planning: goal arithmetic, plan assembly around the narrative
// generator, and the HTTP handlers that expose both.
// All LLM calls go through llm_client; nothing here talks to the API directly.

pub mod assembler;
pub mod goal_math;
pub mod handlers;
pub mod models;
pub mod narrator;
pub mod pipeline;
pub mod prompts;

pub use assembler::PlanError;
