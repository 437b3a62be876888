//! Test utilities for integration tests
#![allow(dead_code)]
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use volunteer_hub::backend::Backend;
use volunteer_hub::core::{SyncError, SyncResult};
use volunteer_hub::models::{
    EventDraft, EventId, EventRecord, NewParent, NewVolunteer, ParticipantRecord, Profile,
    Student, VolunteerAssignment,
};
use volunteer_hub::session::{Role, Scope, Session};

pub fn facilitator_session() -> Session {
    Session::new("test-token", "7", Role::Volunteer, true)
}

pub fn volunteer_session() -> Session {
    Session::new("test-token", "8", Role::Volunteer, false)
}

pub fn parent_session() -> Session {
    Session::new("test-token", "9", Role::Parent, false)
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("Invalid test date")
}

pub fn event(id: EventId, title: &str, day: &str) -> EventRecord {
    EventRecord {
        id,
        title: title.to_string(),
        kind: "Field Trip".to_string(),
        date: date(day),
        start_time: "09:00:00".to_string(),
        end_time: "11:00:00".to_string(),
        start_location: "School".to_string(),
        end_location: "Museum".to_string(),
        participants: None,
    }
}

pub fn student(id: i64, first_name: &str) -> Student {
    Student {
        id,
        first_name: first_name.to_string(),
        last_name: "Doe".to_string(),
    }
}

pub fn profile(school_id: Option<i64>) -> Profile {
    Profile {
        first_name: "Jamie".to_string(),
        last_name: "Rivera".to_string(),
        email: "jamie@example.com".to_string(),
        school_id,
        ..Profile::default()
    }
}

/// In-memory backend that records every call and fails the operations it
/// is told to fail with a 500.
#[derive(Default)]
pub struct FakeBackend {
    pub profile: Profile,
    pub events: Vec<EventRecord>,
    pub students: Vec<Student>,
    pub student_events: HashMap<i64, Vec<EventRecord>>,
    pub event_students: Vec<ParticipantRecord>,
    pub event_volunteers: Vec<VolunteerAssignment>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<(String, String)>>,
    next_id: AtomicI64,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            profile: profile(Some(3)),
            next_id: AtomicI64::new(100),
            ..Self::default()
        }
    }

    pub fn with_events(mut self, events: Vec<EventRecord>) -> Self {
        self.events = events;
        self
    }

    pub fn fail(&self, op: &str) {
        self.failing.lock().unwrap().insert(op.to_string());
    }

    pub fn recover(&self, op: &str) {
        self.failing.lock().unwrap().remove(op);
    }

    /// Number of times `op` was called
    pub fn calls(&self, op: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == op)
            .count()
    }

    /// Arguments of every call to `op`, in order
    pub fn calls_with(&self, op: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == op)
            .map(|(_, args)| args.clone())
            .collect()
    }

    fn record(&self, op: &str, args: String) -> SyncResult<()> {
        self.calls.lock().unwrap().push((op.to_string(), args));
        if self.failing.lock().unwrap().contains(op) {
            return Err(SyncError::Status {
                status: 500,
                body: format!("{} failed", op),
            });
        }
        Ok(())
    }

    fn record_from_draft(id: EventId, draft: &EventDraft) -> SyncResult<EventRecord> {
        let date = NaiveDate::parse_from_str(&draft.date, "%Y-%m-%d")
            .map_err(|e| SyncError::malformed(e.to_string()))?;
        Ok(EventRecord {
            id,
            title: draft.title.clone(),
            kind: draft.kind.clone(),
            date,
            start_time: draft.start_time.clone(),
            end_time: draft.end_time.clone(),
            start_location: draft.start_location.clone(),
            end_location: draft.end_location.clone(),
            participants: None,
        })
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn fetch_profile(&self, scope: &Scope) -> SyncResult<Profile> {
        self.record("fetch_profile", scope.prefix())?;
        Ok(self.profile.clone())
    }

    async fn fetch_events(&self, scope: &Scope) -> SyncResult<Vec<EventRecord>> {
        self.record("fetch_events", scope.prefix())?;
        Ok(self.events.clone())
    }

    async fn fetch_students(&self, scope: &Scope) -> SyncResult<Vec<Student>> {
        self.record("fetch_students", scope.prefix())?;
        Ok(self.students.clone())
    }

    async fn fetch_student_events(
        &self,
        _scope: &Scope,
        student_id: i64,
    ) -> SyncResult<Vec<EventRecord>> {
        self.record("fetch_student_events", student_id.to_string())?;
        let per_student = format!("fetch_student_events:{}", student_id);
        if self.failing.lock().unwrap().contains(&per_student) {
            return Err(SyncError::Status {
                status: 500,
                body: "student events failed".to_string(),
            });
        }
        Ok(self
            .student_events
            .get(&student_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_event(&self, _scope: &Scope, draft: &EventDraft) -> SyncResult<EventRecord> {
        self.record("create_event", draft.title.clone())?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Self::record_from_draft(id, draft)
    }

    async fn update_event(
        &self,
        _scope: &Scope,
        id: EventId,
        patch: &EventDraft,
    ) -> SyncResult<EventRecord> {
        self.record("update_event", id.to_string())?;
        Self::record_from_draft(id, patch)
    }

    async fn delete_event(&self, _scope: &Scope, id: EventId) -> SyncResult<()> {
        self.record("delete_event", id.to_string())
    }

    async fn fetch_event_students(
        &self,
        _scope: &Scope,
        id: EventId,
    ) -> SyncResult<Vec<ParticipantRecord>> {
        self.record("fetch_event_students", id.to_string())?;
        Ok(self.event_students.clone())
    }

    async fn fetch_event_volunteers(
        &self,
        _scope: &Scope,
        id: EventId,
    ) -> SyncResult<Vec<VolunteerAssignment>> {
        self.record("fetch_event_volunteers", id.to_string())?;
        Ok(self.event_volunteers.clone())
    }

    async fn mark_absent(
        &self,
        _scope: &Scope,
        student_id: i64,
        event_id: EventId,
    ) -> SyncResult<()> {
        self.record("mark_absent", format!("{}/{}", student_id, event_id))
    }

    async fn create_parent(&self, _scope: &Scope, parent: &NewParent) -> SyncResult<()> {
        self.record("create_parent", parent.email.clone())
    }

    async fn create_volunteer(
        &self,
        _scope: &Scope,
        volunteer: &NewVolunteer,
        school_id: Option<i64>,
    ) -> SyncResult<()> {
        self.record(
            "create_volunteer",
            format!("{}@{:?}", volunteer.email, school_id),
        )
    }
}
