//! Repository layer — session-scoped database operations.
//!
//! Sessions are append-only: insert and list are the only operations.

mod session;

pub use session::*;
