#![deny(missing_docs)]

//! Core library for the Scholar's Lens study-notes service.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Upload dispatch, PDF extraction, and text cleaning.
pub mod document;
/// Structured logging and tracing setup.
pub mod logging;
/// Prompt construction and reply parsing for study notes.
pub mod notes;
/// Service facade wiring document intake to note generation.
pub mod service;
/// LLM provider client abstraction and the Gemini adapter.
pub mod summarization;
