//! Engine-level error types.
//!
//! Errors are local to a single user's turn: the dispatcher either recovers
//! inside the turn (missing session, stale option code) or surfaces the
//! error to its caller, which must never let it abort other users' sessions.

use funnel_core::CoreError;

use crate::store::StoreError;
use crate::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
