//! Constrained LLM integration for pagetalk.
//!
//! Exposes the [`traits::LlmClient`] interface, the OpenAI-compatible
//! chat-completions implementation in [`chat`], and the prompt constructor
//! in [`prompt`] that keeps the downstream model grounded in the scraped
//! page content.

pub mod chat;
pub mod prompt;
pub mod traits;

/// Default model used when the configuration names none.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
