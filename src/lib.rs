//! Rxassist — prescription reference assistant.
//!
//! Pipeline: document bytes → text extraction (PDF text layer or LLM vision
//! OCR) → medicine-name extraction → per-medicine script normalization and
//! detail lookup → one append-only Session in SQLite, renderable as plain
//! text.

pub mod config;
pub mod db;
pub mod export;
pub mod models;
pub mod pipeline;
