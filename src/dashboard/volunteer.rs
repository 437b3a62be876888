use std::sync::Arc;

use chrono::NaiveDate;

use super::{DashboardCore, unknown_card};
use crate::backend::Backend;
use crate::core::SyncResult;
use crate::models::{EventId, EventRecord};
use crate::session::{DashboardKind, Session};
use crate::state::{Action, CardState, DashboardState};

/// Events a volunteer is assigned to, with the students signed up for them
pub struct VolunteerDashboard {
    core: DashboardCore<EventRecord>,
}

impl VolunteerDashboard {
    pub fn new(session: Session, backend: Arc<dyn Backend>) -> Self {
        Self {
            core: DashboardCore::new(DashboardKind::Volunteer, session, backend),
        }
    }

    pub fn state(&self) -> &DashboardState<EventRecord> {
        self.core.state()
    }

    pub async fn initialize(&mut self) -> SyncResult<()> {
        self.core.initialize().await
    }

    pub async fn session_changed(&mut self, session: Session) -> SyncResult<()> {
        self.core.session_changed(session).await
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.core.select_date(date);
    }

    pub async fn toggle_card(&mut self, key: &str) -> SyncResult<CardState> {
        self.core.expand_with_participants(key).await
    }

    pub fn close_card(&mut self) {
        self.core.close_card();
    }

    /// Decline an assignment. This only flags the card locally; the
    /// backend is not told.
    pub fn decline(&mut self, event_id: EventId) -> SyncResult<()> {
        let key = event_id.to_string();
        if self.core.state().find(&key).is_none() {
            return Err(unknown_card(&key));
        }
        if self.is_declined(event_id) {
            tracing::debug!("Event {} already declined", event_id);
            return Ok(());
        }
        self.core.dispatch(Action::Annotated(key));
        Ok(())
    }

    pub fn is_declined(&self, event_id: EventId) -> bool {
        self.core.state().is_annotated(&event_id.to_string())
    }
}
