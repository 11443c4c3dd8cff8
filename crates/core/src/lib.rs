//! Pure domain logic for the funnel bot.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the conversational engine, and any future CLI tooling:
//!
//! - [`scenario`] — the three-way persona enumeration and its fixed order.
//! - [`scoring`] — counters, dominant-scenario selection, and the cost /
//!   lost-potential arithmetic.
//! - [`flow`] — the generic quiz flow definition (steps, options, effects).
//! - [`catalog`] — the three concrete flows with their option-value tables.
//! - [`routing`] — persona router selecting the next content branch.

pub mod catalog;
pub mod error;
pub mod flow;
pub mod routing;
pub mod scenario;
pub mod scoring;
pub mod types;

pub use error::CoreError;
pub use scenario::Scenario;
