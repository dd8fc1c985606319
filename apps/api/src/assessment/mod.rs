// Compatibility assessment: prompt building, orchestration, persistence, HTTP handlers.
// All generative calls go through the llm_client::TextGenerator trait.

pub mod handlers;
pub mod prompts;
pub mod repository;
pub mod service;
