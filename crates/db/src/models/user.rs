//! User entity model.

use serde::Serialize;
use sqlx::FromRow;

use funnel_core::routing::Professional;
use funnel_core::scenario::Scenario;
use funnel_core::types::{DbId, ExternalId, Timestamp};

/// A row from the `users` table.
///
/// `dominant_scenario` is stored as its stable string code; use
/// [`User::scenario`] to get the typed value.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub external_id: ExternalId,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub is_professional: bool,
    pub is_non_professional: bool,
    pub dominant_scenario: Option<String>,
    pub started_at: Timestamp,
}

impl User {
    /// Typed dominant scenario, `None` if unset or unrecognized.
    pub fn scenario(&self) -> Option<Scenario> {
        self.dominant_scenario.as_deref().and_then(Scenario::from_code)
    }

    /// Tri-state professional flag.
    pub fn professional(&self) -> Professional {
        Professional::from_flags(self.is_professional, self.is_non_professional)
    }
}
