use serde::Serialize;

use super::event::EventRecord;
use super::profile::Student;

/// An event as seen by a parent: one copy per enrolled child
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParentEventRecord {
    #[serde(flatten)]
    pub event: EventRecord,
    pub student_id: i64,
    pub student_name: String,
    pub key: String,
}

impl ParentEventRecord {
    pub fn new(event: EventRecord, student: &Student) -> Self {
        let key = composite_key(event.id, student.id);
        Self {
            event,
            student_id: student.id,
            student_name: student.full_name(),
            key,
        }
    }
}

pub fn composite_key(event_id: i64, student_id: i64) -> String {
    format!("{}-{}", event_id, student_id)
}
