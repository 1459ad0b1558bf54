//! Fallback text generation for the FAQ chatbot.
//!
//! - [`config`]: model config and env-driven constructors.
//! - [`services::ollama_service`]: thin `/api/generate` client.
//! - [`generator::LazyGenerator`]: construct-once wrapper, shared via `Arc`.
//! - [`health_service`]: best-effort probe for a `/health` endpoint.
//! - [`telemetry`]: formatting layers for the binary's subscriber.

pub mod config;
pub mod error_handler;
pub mod generator;
pub mod health_service;
pub mod services;
pub mod telemetry;

pub use error_handler::{AiLlmError, Result};
pub use generator::{GenerateParams, LazyGenerator};
