//! Owned dashboard state and the transitions that change it.
//!
//! Controllers never mutate the cache directly. They translate backend
//! outcomes and user input into an [`Action`] and hand it to
//! [`DashboardState::reduce`], which rebuilds whatever it touches. Reads
//! are projections computed from the current state on demand.

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, Utc};

pub mod card;
pub mod resource;

pub use card::{CardState, Selection};
pub use resource::Resource;

use crate::models::{
    EventEdit, EventId, EventRecord, ParentEventRecord, Participants, Profile,
};

/// Something that can live in a dashboard cache
pub trait CacheEntry: Clone {
    /// Identity of the entry within one cache
    fn key(&self) -> String;

    fn event(&self) -> &EventRecord;

    /// Same entry carrying a different version of its event
    fn with_event(&self, event: EventRecord) -> Self;
}

impl CacheEntry for EventRecord {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn event(&self) -> &EventRecord {
        self
    }

    fn with_event(&self, event: EventRecord) -> Self {
        event
    }
}

impl CacheEntry for ParentEventRecord {
    fn key(&self) -> String {
        self.key.clone()
    }

    fn event(&self) -> &EventRecord {
        &self.event
    }

    fn with_event(&self, event: EventRecord) -> Self {
        Self {
            event,
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug)]
pub enum Action<E> {
    ProfileRequested,
    ProfileLoaded(Profile),
    ProfileFailed(String),
    EventsRequested,
    EventsLoaded(Vec<E>),
    EventsFailed(String),
    EventCreated(E),
    EventUpdated(EventRecord),
    EventDeleted(EventId),
    ParticipantsLoaded {
        event_id: EventId,
        participants: Participants,
    },
    Annotated(String),
    DateSelected(NaiveDate),
    CardToggled(String),
    CardClosed,
    EditStarted,
    EditChanged(EventEdit),
    EditCancelled,
    EditSaved(EventRecord),
}

#[derive(Clone, Debug)]
pub struct DashboardState<E> {
    profile: Resource<Profile>,
    events: Resource<Vec<E>>,
    selected_date: NaiveDate,
    selection: Option<Selection>,
    annotations: BTreeSet<String>,
}

impl<E> Default for DashboardState<E> {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

/// Keep one entry per key. The last copy wins but stays at the position
/// where the key was first seen.
fn dedup_last_wins<E: CacheEntry>(entries: Vec<E>) -> Vec<E> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<E> = Vec::with_capacity(entries.len());
    for entry in entries {
        match positions.get(&entry.key()) {
            Some(&idx) => out[idx] = entry,
            None => {
                positions.insert(entry.key(), out.len());
                out.push(entry);
            }
        }
    }
    out
}

impl<E> DashboardState<E> {
    /// Empty state focused on `selected_date`
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            profile: Resource::NotLoaded,
            events: Resource::NotLoaded,
            selected_date,
            selection: None,
            annotations: BTreeSet::new(),
        }
    }
}

impl<E: CacheEntry> DashboardState<E> {

    pub fn reduce(self, action: Action<E>) -> Self {
        let mut next = self;
        match action {
            Action::ProfileRequested => {
                next.profile = next.profile.requested();
            }
            Action::ProfileLoaded(profile) => {
                next.profile = Resource::Loaded(profile);
            }
            Action::ProfileFailed(reason) => {
                next.profile = next.profile.failed(reason);
            }
            Action::EventsRequested => {
                next.events = next.events.requested();
            }
            Action::EventsLoaded(entries) => {
                next.events = Resource::Loaded(dedup_last_wins(entries));
                next.selection = next.selection_if_present();
            }
            Action::EventsFailed(reason) => {
                next.events = next.events.failed(reason);
            }
            Action::EventCreated(entry) => {
                let mut entries: Vec<E> = next
                    .take_events()
                    .into_iter()
                    .filter(|e| e.key() != entry.key())
                    .collect();
                entries.push(entry);
                next.events = Resource::Loaded(entries);
            }
            Action::EventUpdated(record) => {
                next.events = next.replace_event(record);
            }
            Action::EventDeleted(id) => {
                let entries = next
                    .take_events()
                    .into_iter()
                    .filter(|e| e.event().id != id)
                    .collect();
                next.events = Resource::Loaded(entries);
                next.selection = next.selection_if_present();
            }
            Action::ParticipantsLoaded {
                event_id,
                participants,
            } => {
                let entries = next
                    .take_events()
                    .into_iter()
                    .map(|e| {
                        if e.event().id == event_id {
                            let event = EventRecord {
                                participants: Some(participants.clone()),
                                ..e.event().clone()
                            };
                            e.with_event(event)
                        } else {
                            e
                        }
                    })
                    .collect();
                next.events = Resource::Loaded(entries);
            }
            Action::Annotated(key) => {
                next.annotations.insert(key);
            }
            Action::DateSelected(date) => {
                next.selected_date = date;
            }
            Action::CardToggled(key) => match &next.selection {
                Some(sel) if sel.is_editing() => {
                    tracing::debug!("Ignoring toggle of {} while {} is being edited", key, sel.key);
                }
                Some(sel) if sel.key == key => {
                    next.selection = None;
                }
                _ => {
                    if next.find(&key).is_some() {
                        next.selection = Some(Selection::expanded(&key));
                    }
                }
            },
            Action::CardClosed => {
                if !next.selection.as_ref().is_some_and(Selection::is_editing) {
                    next.selection = None;
                }
            }
            Action::EditStarted => {
                let edit = next
                    .selection
                    .as_ref()
                    .filter(|sel| !sel.is_editing())
                    .and_then(|sel| next.find(&sel.key))
                    .map(|entry| EventEdit::from(entry.event()));
                if let (Some(sel), Some(edit)) = (next.selection.as_mut(), edit) {
                    sel.edit = Some(edit);
                }
            }
            Action::EditChanged(buffer) => {
                if let Some(edit) = next.selection.as_mut().and_then(|sel| sel.edit.as_mut()) {
                    *edit = buffer;
                }
            }
            Action::EditCancelled => {
                if let Some(sel) = next.selection.as_mut() {
                    sel.edit = None;
                }
            }
            Action::EditSaved(record) => {
                next.events = next.replace_event(record);
                if let Some(sel) = next.selection.as_mut() {
                    sel.edit = None;
                }
            }
        }
        next
    }

    fn take_events(&mut self) -> Vec<E> {
        match std::mem::take(&mut self.events) {
            Resource::Loaded(entries) => entries,
            _ => Vec::new(),
        }
    }

    fn replace_event(&mut self, record: EventRecord) -> Resource<Vec<E>> {
        let entries = self
            .take_events()
            .into_iter()
            .map(|e| {
                if e.event().id == record.id {
                    e.with_event(e.event().merged_with(record.clone()))
                } else {
                    e
                }
            })
            .collect();
        Resource::Loaded(entries)
    }

    fn selection_if_present(&self) -> Option<Selection> {
        self.selection
            .as_ref()
            .filter(|sel| self.find(&sel.key).is_some())
            .cloned()
    }

    // Projections

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.get()
    }

    pub fn profile_resource(&self) -> &Resource<Profile> {
        &self.profile
    }

    pub fn events_resource(&self) -> &Resource<Vec<E>> {
        &self.events
    }

    /// Nothing but a loading indicator should be shown until the profile
    /// has arrived
    pub fn is_loading(&self) -> bool {
        !self.profile.is_loaded()
    }

    pub fn events(&self) -> &[E] {
        self.events.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, key: &str) -> Option<&E> {
        self.events().iter().find(|e| e.key() == key)
    }

    /// Dates that get flagged on the calendar
    pub fn event_dates(&self) -> BTreeSet<NaiveDate> {
        self.events().iter().map(|e| e.event().date).collect()
    }

    /// Events on `date`, or every event when none fall on that day
    pub fn events_on(&self, date: NaiveDate) -> Vec<&E> {
        let on_day: Vec<&E> = self
            .events()
            .iter()
            .filter(|e| e.event().date == date)
            .collect();
        if on_day.is_empty() {
            self.events().iter().collect()
        } else {
            on_day
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn visible_events(&self) -> Vec<&E> {
        self.events_on(self.selected_date)
    }

    /// Whether `visible_events` is narrowed to the selected day
    pub fn shows_selected_day(&self) -> bool {
        self.events()
            .iter()
            .any(|e| e.event().date == self.selected_date)
    }

    pub fn card_state(&self, key: &str) -> CardState {
        match &self.selection {
            Some(sel) if sel.key == key => sel.state(),
            _ => CardState::Collapsed,
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn expanded(&self) -> Option<&E> {
        self.selection.as_ref().and_then(|sel| self.find(&sel.key))
    }

    pub fn edit_buffer(&self) -> Option<&EventEdit> {
        self.selection.as_ref().and_then(|sel| sel.edit.as_ref())
    }

    pub fn is_annotated(&self, key: &str) -> bool {
        self.annotations.contains(key)
    }

    pub fn annotations(&self) -> &BTreeSet<String> {
        &self.annotations
    }
}
