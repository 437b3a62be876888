//! Event records in their canonical cache shape plus the one mapping in
//! each direction between that shape and the backend wire format.
//!
//! The backend is inconsistent: depending on the endpoint it returns
//! `date` as a bare date or as a full timestamp, and the multi-word
//! fields as either camelCase or snake_case. Everything entering the
//! cache goes through [`WireEvent::into_record`]; everything sent back
//! goes through [`EventDraft`], which always serializes camelCase.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::participant::Participants;
use crate::core::{SyncError, SyncResult};

pub type EventId = i64;

/// Canonical, snake_case event as stored in a dashboard cache
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub start_location: String,
    pub end_location: String,
    /// `None` until the detail view has loaded participants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Participants>,
}

impl EventRecord {
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Copy of this record with server fields taken from `other`. Lazily
    /// loaded participants survive because the backend never echoes them.
    pub fn merged_with(&self, other: EventRecord) -> EventRecord {
        EventRecord {
            participants: other.participants.or_else(|| self.participants.clone()),
            ..other
        }
    }
}

/// Event as the backend sends it, tolerant of either naming convention
#[derive(Clone, Debug, Deserialize)]
pub struct WireEvent {
    pub id: EventId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "startTime", default)]
    start_time_camel: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(rename = "endTime", default)]
    end_time_camel: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(rename = "startLocation", default)]
    start_location_camel: Option<String>,
    #[serde(default)]
    start_location: Option<String>,
    #[serde(rename = "endLocation", default)]
    end_location_camel: Option<String>,
    #[serde(default)]
    end_location: Option<String>,
}

/// A non-empty camelCase value wins over the snake_case one
fn prefer_camel(camel: Option<String>, snake: Option<String>) -> String {
    match camel {
        Some(value) if !value.is_empty() => value,
        camel => snake.or(camel).unwrap_or_default(),
    }
}

impl WireEvent {
    pub fn into_record(self) -> SyncResult<EventRecord> {
        let raw_date = self
            .date
            .ok_or_else(|| SyncError::malformed(format!("event {} has no date", self.id)))?;
        let date = normalize_date(&raw_date)?;

        Ok(EventRecord {
            id: self.id,
            title: self.title.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            date,
            start_time: prefer_camel(self.start_time_camel, self.start_time),
            end_time: prefer_camel(self.end_time_camel, self.end_time),
            start_location: prefer_camel(self.start_location_camel, self.start_location),
            end_location: prefer_camel(self.end_location_camel, self.end_location),
            participants: None,
        })
    }
}

/// Normalize the records of an event list, failing the whole list on the
/// first bad record.
pub fn into_records(events: Vec<WireEvent>) -> SyncResult<Vec<EventRecord>> {
    events.into_iter().map(WireEvent::into_record).collect()
}

/// Envelope returned by the create endpoint
#[derive(Debug, Deserialize)]
pub struct CreatedEvent {
    pub event: WireEvent,
}

/// Truncate a backend date to its calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to UTC first) and
/// naive `YYYY-MM-DD[T ]HH:MM:SS` timestamps.
pub fn normalize_date(raw: &str) -> SyncResult<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc).date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(ts.date());
        }
    }

    Err(SyncError::malformed(format!("unrecognized date '{}'", raw)))
}

/// Event form fields. Serializes to the backend's camelCase body and is
/// used both for creating and for updating events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub start_location: String,
    pub end_location: String,
}

impl From<&EventRecord> for EventDraft {
    fn from(event: &EventRecord) -> Self {
        Self {
            title: event.title.clone(),
            kind: event.kind.clone(),
            date: event.date_string(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            start_location: event.start_location.clone(),
            end_location: event.end_location.clone(),
        }
    }
}

/// Edit buffer for an expanded card. The id travels with the form so a
/// save can be addressed, and a buffer without one cannot be saved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventEdit {
    pub id: Option<EventId>,
    pub fields: EventDraft,
}

impl From<&EventRecord> for EventEdit {
    fn from(event: &EventRecord) -> Self {
        Self {
            id: Some(event.id),
            fields: EventDraft::from(event),
        }
    }
}
