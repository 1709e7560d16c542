// Portfolio generation: request model, prompt compiler, response sanitizer
// and the pipeline that ties them to the provider adapter.
// All LLM calls go through llm_client; no direct provider calls here.

pub mod compiler;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod sanitize;
pub mod themes;
