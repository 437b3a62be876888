//! The REST backend as seen by the dashboards.
//!
//! Every method takes the [`Scope`] the calling dashboard resolved from its
//! session. Implementations return records already normalized into their
//! canonical shape.
use async_trait::async_trait;

use crate::core::SyncResult;
use crate::models::{
    EventDraft, EventId, EventRecord, NewParent, NewVolunteer, ParticipantRecord, Profile,
    Student, VolunteerAssignment,
};
use crate::session::Scope;

pub mod http;

pub use http::HttpBackend;

#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch_profile(&self, scope: &Scope) -> SyncResult<Profile>;

    async fn fetch_events(&self, scope: &Scope) -> SyncResult<Vec<EventRecord>>;

    async fn fetch_students(&self, scope: &Scope) -> SyncResult<Vec<Student>>;

    async fn fetch_student_events(
        &self,
        scope: &Scope,
        student_id: i64,
    ) -> SyncResult<Vec<EventRecord>>;

    async fn create_event(&self, scope: &Scope, draft: &EventDraft) -> SyncResult<EventRecord>;

    async fn update_event(
        &self,
        scope: &Scope,
        id: EventId,
        patch: &EventDraft,
    ) -> SyncResult<EventRecord>;

    async fn delete_event(&self, scope: &Scope, id: EventId) -> SyncResult<()>;

    async fn fetch_event_students(
        &self,
        scope: &Scope,
        id: EventId,
    ) -> SyncResult<Vec<ParticipantRecord>>;

    async fn fetch_event_volunteers(
        &self,
        scope: &Scope,
        id: EventId,
    ) -> SyncResult<Vec<VolunteerAssignment>>;

    async fn mark_absent(&self, scope: &Scope, student_id: i64, event_id: EventId)
    -> SyncResult<()>;

    async fn create_parent(&self, scope: &Scope, parent: &NewParent) -> SyncResult<()>;

    async fn create_volunteer(
        &self,
        scope: &Scope,
        volunteer: &NewVolunteer,
        school_id: Option<i64>,
    ) -> SyncResult<()>;
}
