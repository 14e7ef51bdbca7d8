//! # Timetable API
//!
//! Class-schedule and contact-directory HTTP service.
//!
//! Lessons are stored per study group and recur on either even or odd
//! calendar weeks. Clients ask for a group's schedule, optionally narrowed to
//! one week parity and one weekday, and get back the nested shape
//! `group -> "even_week" | "odd_week" -> weekday -> [lesson]`.
//!
//! - [`models`]: lesson, person and group records; weekday and parity types
//! - [`services`]: selector parsing, partitioning, payload validation and the
//!   query façade
//! - [`db`]: repository traits and the in-memory / Postgres backends
//! - [`http`]: axum router and handlers

// RepositoryError carries an ErrorContext for logging.
#![allow(clippy::result_large_err)]

pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
