//! Lead Scoring API Library
//!
//! This library scores lead-intake submissions. A submission is validated,
//! given an initial score by either a heuristic or an external conversion
//! classifier, re-ranked by keywords in its comments, and recorded in an
//! in-memory lead store.
//!
//! # Modules
//!
//! - `app`: Router construction and middleware.
//! - `circuit_breaker`: Circuit breaker for classifier calls.
//! - `classifier`: Conversion classifier trait and HTTP client.
//! - `config`: Configuration management.
//! - `errors`: HTTP-facing error type.
//! - `handlers`: HTTP request handlers.
//! - `lead_store`: Append-only in-memory lead history.
//! - `models`: Lead submission and scored lead models.
//! - `rerank`: Keyword re-ranker.
//! - `scoring`: Initial scoring strategies.
//! - `services`: Scoring pipeline orchestration.
//! - `validation`: Submission validation.

pub mod app;
pub mod circuit_breaker;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod lead_store;
pub mod models;
pub mod rerank;
pub mod scoring;
pub mod services;
pub mod validation;
