//! Facilitator dashboard: manages the events of the facilitator's school
//! and onboards parents and volunteers.
use std::sync::Arc;

use chrono::NaiveDate;

use super::{DashboardCore, unknown_card};
use crate::backend::Backend;
use crate::core::{SyncError, SyncResult};
use crate::models::{EventDraft, EventEdit, EventId, EventRecord, NewParent, NewVolunteer};
use crate::session::{DashboardKind, Session};
use crate::state::{Action, CardState, DashboardState};

pub struct FacilitatorDashboard {
    core: DashboardCore<EventRecord>,
    new_event: EventDraft,
    new_parent: NewParent,
    new_volunteer: NewVolunteer,
}

impl FacilitatorDashboard {
    pub fn new(session: Session, backend: Arc<dyn Backend>) -> Self {
        Self {
            core: DashboardCore::new(DashboardKind::Facilitator, session, backend),
            new_event: EventDraft::default(),
            new_parent: NewParent::default(),
            new_volunteer: NewVolunteer::default(),
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

    // Events

    pub async fn create_event(&mut self, draft: &EventDraft) -> SyncResult<EventRecord> {
        let scope = self.core.require_scope()?;
        let created = self
            .core
            .backend()
            .create_event(&scope, draft)
            .await
            .inspect_err(|e| tracing::error!("Event create error: {}", e))?;

        tracing::info!("Created event {} on {}", created.id, created.date_string());
        self.core.dispatch(Action::EventCreated(created.clone()));
        Ok(created)
    }

    pub fn new_event(&self) -> &EventDraft {
        &self.new_event
    }

    pub fn new_event_mut(&mut self) -> &mut EventDraft {
        &mut self.new_event
    }

    /// Create the event in the form. The form is only cleared once the
    /// backend confirmed the event.
    pub async fn submit_new_event(&mut self) -> SyncResult<EventRecord> {
        let draft = self.new_event.clone();
        let created = self.create_event(&draft).await?;
        self.new_event = EventDraft::default();
        Ok(created)
    }

    async fn send_update(&self, id: EventId, patch: &EventDraft) -> SyncResult<EventRecord> {
        let scope = self.core.require_scope()?;
        self.core
            .backend()
            .update_event(&scope, id, patch)
            .await
            .inspect_err(|e| tracing::error!("Update of event {} failed: {}", id, e))
    }

    pub async fn update_event(
        &mut self,
        id: EventId,
        patch: &EventDraft,
    ) -> SyncResult<EventRecord> {
        let updated = self.send_update(id, patch).await?;
        self.core.dispatch(Action::EventUpdated(updated.clone()));
        Ok(updated)
    }

    pub async fn delete_event(&mut self, id: EventId) -> SyncResult<()> {
        let scope = self.core.require_scope()?;
        self.core
            .backend()
            .delete_event(&scope, id)
            .await
            .inspect_err(|e| tracing::error!("Delete error: {}", e))?;
        self.core.dispatch(Action::EventDeleted(id));
        Ok(())
    }

    // Inline editing of the expanded card

    pub fn begin_edit(&mut self) -> SyncResult<()> {
        let Some(selection) = self.core.state().selection() else {
            return Err(SyncError::precondition("no card is expanded"));
        };
        let key = selection.key.clone();
        if self.core.state().find(&key).is_none() {
            return Err(unknown_card(&key));
        }
        self.core.dispatch(Action::EditStarted);
        Ok(())
    }

    pub fn edit_buffer(&self) -> Option<&EventEdit> {
        self.core.state().edit_buffer()
    }

    pub fn set_edit_buffer(&mut self, buffer: EventEdit) {
        self.core.dispatch(Action::EditChanged(buffer));
    }

    pub fn cancel_edit(&mut self) {
        self.core.dispatch(Action::EditCancelled);
    }

    /// Save the edit buffer. On failure the card stays in edit mode with
    /// the buffer intact.
    pub async fn save_edit(&mut self) -> SyncResult<EventRecord> {
        let Some(edit) = self.edit_buffer().cloned() else {
            return Err(SyncError::precondition("no card is being edited"));
        };
        let Some(id) = edit.id else {
            tracing::error!("No event ID found in edit buffer");
            return Err(SyncError::precondition("edited event has no id"));
        };

        let updated = self.send_update(id, &edit.fields).await?;
        self.core.dispatch(Action::EditSaved(updated.clone()));
        Ok(updated)
    }

    // People

    pub async fn add_parent(&mut self, parent: &NewParent) -> SyncResult<()> {
        let scope = self.core.require_scope()?;
        self.core
            .backend()
            .create_parent(&scope, parent)
            .await
            .inspect_err(|e| tracing::error!("Parent create error: {}", e))?;
        tracing::info!("Created parent {}", parent.email);
        Ok(())
    }

    pub fn new_parent_mut(&mut self) -> &mut NewParent {
        &mut self.new_parent
    }

    pub fn new_parent(&self) -> &NewParent {
        &self.new_parent
    }

    pub async fn submit_new_parent(&mut self) -> SyncResult<()> {
        let parent = self.new_parent.clone();
        self.add_parent(&parent).await?;
        self.new_parent = NewParent::default();
        Ok(())
    }

    /// Volunteers are created at the facilitator's own school, so the
    /// profile has to be loaded first.
    pub async fn add_volunteer(&mut self, volunteer: &NewVolunteer) -> SyncResult<()> {
        let scope = self.core.require_scope()?;
        let Some(profile) = self.core.state().profile() else {
            return Err(SyncError::precondition("facilitator profile is not loaded"));
        };
        self.core
            .backend()
            .create_volunteer(&scope, volunteer, profile.school_id)
            .await
            .inspect_err(|e| tracing::error!("Volunteer create error: {}", e))?;
        tracing::info!("Created volunteer {}", volunteer.email);
        Ok(())
    }

    pub fn new_volunteer_mut(&mut self) -> &mut NewVolunteer {
        &mut self.new_volunteer
    }

    pub fn new_volunteer(&self) -> &NewVolunteer {
        &self.new_volunteer
    }

    pub async fn submit_new_volunteer(&mut self) -> SyncResult<()> {
        let volunteer = self.new_volunteer.clone();
        self.add_volunteer(&volunteer).await?;
        self.new_volunteer = NewVolunteer::default();
        Ok(())
    }
}
