//! Dashboard controllers.
//!
//! Each role gets its own controller wrapping a [`DashboardCore`], which
//! owns the session, the backend handle and the [`DashboardState`]. All
//! mutations go through `&mut self`, so cache updates are applied one at a
//! time in the order responses come back.
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::backend::Backend;
use crate::core::{SyncError, SyncResult};
use crate::models::{EventId, EventRecord, ParentEventRecord, Participants};
use crate::session::{DashboardKind, Scope, Session};
use crate::state::{Action, CacheEntry, CardState, DashboardState};

pub mod facilitator;
pub mod parent;
pub mod volunteer;

pub use facilitator::FacilitatorDashboard;
pub use parent::ParentDashboard;
pub use volunteer::VolunteerDashboard;

/// How the entries of a cache are fetched from the backend
#[async_trait]
pub trait EventSource: CacheEntry + Send + Sized {
    async fn fetch_all(backend: &dyn Backend, scope: &Scope) -> SyncResult<Vec<Self>>;
}

#[async_trait]
impl EventSource for EventRecord {
    async fn fetch_all(backend: &dyn Backend, scope: &Scope) -> SyncResult<Vec<Self>> {
        backend.fetch_events(scope).await
    }
}

#[async_trait]
impl EventSource for ParentEventRecord {
    /// Students first, then each student's events one after the other.
    /// Any failure fails the whole load.
    async fn fetch_all(backend: &dyn Backend, scope: &Scope) -> SyncResult<Vec<Self>> {
        let students = backend.fetch_students(scope).await?;
        tracing::debug!("Loaded {} students", students.len());

        let mut entries = Vec::new();
        for student in &students {
            let events = backend.fetch_student_events(scope, student.id).await?;
            tracing::debug!("Loaded {} events for student {}", events.len(), student.id);
            entries.extend(
                events
                    .into_iter()
                    .map(|event| ParentEventRecord::new(event, student)),
            );
        }
        Ok(entries)
    }
}

pub struct DashboardCore<E> {
    kind: DashboardKind,
    session: Session,
    backend: Arc<dyn Backend>,
    state: DashboardState<E>,
}

impl<E: EventSource> DashboardCore<E> {
    pub fn new(kind: DashboardKind, session: Session, backend: Arc<dyn Backend>) -> Self {
        Self {
            kind,
            session,
            backend,
            state: DashboardState::default(),
        }
    }

    pub fn kind(&self) -> DashboardKind {
        self.kind
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &DashboardState<E> {
        &self.state
    }

    pub(crate) fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub(crate) fn dispatch(&mut self, action: Action<E>) {
        let placeholder = DashboardState::new(self.state.selected_date());
        let state = std::mem::replace(&mut self.state, placeholder);
        self.state = state.reduce(action);
    }

    pub(crate) fn require_scope(&self) -> SyncResult<Scope> {
        self.session.require_scope(self.kind)
    }

    /// Load the profile, then the events. Does nothing while the session
    /// is incomplete.
    pub async fn initialize(&mut self) -> SyncResult<()> {
        let Some(scope) = self.session.scope(self.kind) else {
            tracing::debug!("Session incomplete, not loading the {} dashboard", self.kind);
            return Ok(());
        };

        self.dispatch(Action::ProfileRequested);
        let profile = match self.backend.fetch_profile(&scope).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!("Failed to load {} profile: {}", self.kind, e);
                self.dispatch(Action::ProfileFailed(e.to_string()));
                return Err(e);
            }
        };
        self.dispatch(Action::ProfileLoaded(profile));

        self.dispatch(Action::EventsRequested);
        match E::fetch_all(self.backend.as_ref(), &scope).await {
            Ok(entries) => {
                tracing::info!("Loaded {} events for the {} dashboard", entries.len(), self.kind);
                self.dispatch(Action::EventsLoaded(entries));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load {} events: {}", self.kind, e);
                self.dispatch(Action::EventsFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Take over a new session from the auth provider. Whenever the token
    /// or user behind this dashboard changes, everything cached for the
    /// previous one is dropped and the dashboard loads again.
    pub async fn session_changed(&mut self, session: Session) -> SyncResult<()> {
        let previous = self.session.scope(self.kind);
        self.session = session;
        if self.session.scope(self.kind) == previous {
            return Ok(());
        }

        if previous.is_some() {
            tracing::info!("Session changed, resetting the {} dashboard", self.kind);
            self.state = DashboardState::new(self.state.selected_date());
        }
        self.initialize().await
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.dispatch(Action::DateSelected(date));
    }

    /// Expand or collapse a card, returning its new state
    pub fn toggle_card(&mut self, key: &str) -> CardState {
        self.dispatch(Action::CardToggled(key.to_string()));
        self.state.card_state(key)
    }

    pub fn close_card(&mut self) {
        self.dispatch(Action::CardClosed);
    }

    /// Expand a card and load its participants if they were never loaded
    pub(crate) async fn expand_with_participants(&mut self, key: &str) -> SyncResult<CardState> {
        let card = self.toggle_card(key);
        if card != CardState::Expanded {
            return Ok(card);
        }
        let Some(event) = self.state.find(key).map(|e| e.event().clone()) else {
            return Ok(card);
        };
        if event.participants.is_none() {
            self.load_participants(event.id).await?;
        }
        Ok(card)
    }

    /// Fetch students and volunteers of one event together. Either both
    /// land in the cache or neither does.
    pub async fn load_participants(&mut self, event_id: EventId) -> SyncResult<()> {
        let scope = self.require_scope()?;
        let backend = Arc::clone(&self.backend);

        let joined = futures::try_join!(
            backend.fetch_event_students(&scope, event_id),
            backend.fetch_event_volunteers(&scope, event_id),
        );
        let (students, volunteers) = joined.inspect_err(|e| {
            tracing::error!("Failed to load participants of event {}: {}", event_id, e);
        })?;

        self.dispatch(Action::ParticipantsLoaded {
            event_id,
            participants: Participants {
                students,
                volunteers,
            },
        });
        Ok(())
    }
}

pub(crate) fn unknown_card(key: &str) -> SyncError {
    SyncError::precondition(format!("no event card with key '{}'", key))
}
