use std::sync::Arc;

use chrono::NaiveDate;

use super::{DashboardCore, unknown_card};
use crate::backend::Backend;
use crate::core::SyncResult;
use crate::models::ParentEventRecord;
use crate::session::{DashboardKind, Session};
use crate::state::{Action, CardState, DashboardState};

/// Events of every child of a parent, one card per (event, child)
pub struct ParentDashboard {
    core: DashboardCore<ParentEventRecord>,
}

impl ParentDashboard {
    pub fn new(session: Session, backend: Arc<dyn Backend>) -> Self {
        Self {
            core: DashboardCore::new(DashboardKind::Parent, session, backend),
        }
    }

    pub fn state(&self) -> &DashboardState<ParentEventRecord> {
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

    pub fn toggle_card(&mut self, key: &str) -> CardState {
        self.core.toggle_card(key)
    }

    pub fn close_card(&mut self) {
        self.core.close_card();
    }

    /// Report the child of this card absent from the event. The card is
    /// only flagged once the backend accepted it, and a flagged card never
    /// sends the request again.
    pub async fn mark_absent(&mut self, key: &str) -> SyncResult<()> {
        if self.is_marked_absent(key) {
            tracing::debug!("{} already marked absent", key);
            return Ok(());
        }
        let Some(entry) = self.core.state().find(key) else {
            return Err(unknown_card(key));
        };
        let (student_id, event_id) = (entry.student_id, entry.event.id);

        let scope = self.core.require_scope()?;
        self.core
            .backend()
            .mark_absent(&scope, student_id, event_id)
            .await
            .inspect_err(|e| tracing::error!("Absence update error: {}", e))?;

        tracing::info!("Marked student {} absent from event {}", student_id, event_id);
        self.core.dispatch(Action::Annotated(key.to_string()));
        Ok(())
    }

    pub fn is_marked_absent(&self, key: &str) -> bool {
        self.core.state().is_annotated(key)
    }
}
