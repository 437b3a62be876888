pub mod event;
pub mod parent_event;
pub mod participant;
pub mod people;
pub mod profile;

use serde::{Deserialize, Deserializer};

pub use event::{
    CreatedEvent, EventDraft, EventEdit, EventId, EventRecord, WireEvent, into_records,
    normalize_date,
};
pub use parent_event::{ParentEventRecord, composite_key};
pub use participant::{ParticipantRecord, Participants, VolunteerAssignment};
pub use people::{NewParent, NewVolunteer, SCHOOL_OPTIONS, VolunteerSignup};
pub use profile::{Profile, Student};

/// Read a JSON `null` as the type's default. The backend sends `null` for
/// empty nullable columns.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
