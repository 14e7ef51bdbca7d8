//! HTTP transport for the timetable API.
//!
//! ```text
//! axum router (/api/v1/..., /health)
//!        │  path tokens, JSON bodies
//!        ▼
//! handlers ──► services::{schedule, directory} ──► db (FullRepository)
//!        │
//!        ▼
//! {"data": ...} | {"status": code, "reason": "..."}
//! ```

pub mod dto;

pub mod error;

pub mod handlers;

pub mod router;

pub mod state;

pub use router::create_router;

pub use state::AppState;
