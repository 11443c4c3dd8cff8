//! Ephemeral per-user session state.
//!
//! A session records where a user is inside an in-progress flow and the
//! answers collected so far. It lives only for the duration of the flow:
//! created on entry, dropped on completion or reset. Loss on restart is
//! acceptable -- the quiz simply restarts. Abandoned sessions carry no
//! external resources and are swept on a TTL basis.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use funnel_core::types::{DbId, ExternalId};

// ---------------------------------------------------------------------------
// State shapes
// ---------------------------------------------------------------------------

/// Which quiz flow a [`QuizSession`] is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Persona,
    Cost,
    LostPotential,
}

/// Position inside the free-text intake sub-machine.
///
/// The confirm states loop back to their waiting state on rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeState {
    WaitingName,
    ConfirmingName { name: String },
    WaitingPhone,
    ConfirmingPhone { phone: String },
    WaitingGoal,
}

/// Position and scratch answers inside one quiz flow.
///
/// `step` equal to the flow length means all questions are answered and the
/// session is waiting for the terminal "show results" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    pub kind: FlowKind,
    pub step: usize,
    /// Persisted run row (persona quiz only; numeric quizzes persist at the end).
    pub run_id: Option<DbId>,
    /// Collected numeric answers keyed by question ID.
    pub values: HashMap<&'static str, i64>,
    /// Currently-on multi-select codes (ordered for stable persistence).
    pub toggles: BTreeSet<String>,
}

impl QuizSession {
    pub fn new(kind: FlowKind, run_id: Option<DbId>) -> Self {
        Self { kind, step: 0, run_id, values: HashMap::new(), toggles: BTreeSet::new() }
    }
}

/// Current flow position for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Intake(IntakeState),
    Quiz(QuizSession),
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

struct Entry {
    state: SessionState,
    expires_at: DateTime<Utc>,
}

/// In-memory session store keyed by external user identity.
///
/// Each user's flow is processed sequentially, so the store needs no
/// per-entry locking beyond the map lock; different users never share
/// entries.
pub struct SessionStore {
    ttl: Duration,
    entries: RwLock<HashMap<ExternalId, Entry>>,
}

impl SessionStore {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Current state for a user, `None` if absent or expired.
    pub async fn get(&self, user: ExternalId) -> Option<SessionState> {
        let entries = self.entries.read().await;
        let entry = entries.get(&user)?;
        if entry.expires_at <= Utc::now() {
            return None;
        }
        Some(entry.state.clone())
    }

    /// Store the user's state, refreshing its deadline.
    pub async fn put(&self, user: ExternalId, state: SessionState) {
        let entry = Entry { state, expires_at: Utc::now() + self.ttl };
        self.entries.write().await.insert(user, entry);
    }

    /// Drop the user's session.
    pub async fn clear(&self, user: ExternalId) {
        self.entries.write().await.remove(&user);
    }

    /// Remove all expired entries, returning how many were dropped.
    pub async fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
