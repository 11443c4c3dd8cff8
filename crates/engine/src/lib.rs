//! Conversational engine: session state, collaborator seams, and the
//! dispatcher that drives the intake flow and the three quiz flows.
//!
//! - [`session`] — per-user ephemeral flow position with TTL expiry.
//! - [`store`] — the storage collaborator trait and its Postgres impl.
//! - [`transport`] — the message transport collaborator trait.
//! - [`content`] — prompt texts and inline keyboards.
//! - [`dispatch`] — the [`Engine`] mapping inbound actions to transitions.

pub mod content;
pub mod dispatch;
pub mod error;
pub mod session;
pub mod store;
pub mod transport;

pub use dispatch::{Engine, InboundAction};
pub use error::EngineError;
pub use session::SessionStore;
pub use store::{PgStore, Store};
pub use transport::{Choice, Prompt, Transport};
