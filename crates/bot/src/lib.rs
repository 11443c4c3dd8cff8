//! Funnel bot HTTP server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! reply-buffering transport) so integration tests and the binary entrypoint
//! can both access them.

pub mod config;
pub mod error;
pub mod reply;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
