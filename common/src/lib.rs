//! Shared types and the template variable engine.
//!
//! - [`placeholder`] finds `{name}` tokens in a template body and substitutes values.
//! - [`field`] interprets raw form input per placeholder (plain, date, currency).
//! - [`model`] and [`requests`] are the records and payloads exchanged with the backend.

pub mod error;
pub mod field;
pub mod model;
pub mod placeholder;
pub mod requests;
