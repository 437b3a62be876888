use serde::{Deserialize, Serialize};

/// A student signed up for an event, with the parent to contact
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantRecord {
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub student_first_name: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub student_last_name: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub parent_first_name: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub parent_last_name: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub parent_email: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub parent_phone: String,
}

impl ParticipantRecord {
    pub fn student_name(&self) -> String {
        format!("{} {}", self.student_first_name, self.student_last_name)
    }

    pub fn parent_name(&self) -> String {
        format!("{} {}", self.parent_first_name, self.parent_last_name)
    }
}

/// A volunteer assigned to an event
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolunteerAssignment {
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub email: String,
    pub phone: Option<String>,
}

impl VolunteerAssignment {
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Participants of one event, loaded together or not at all
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participants {
    pub students: Vec<ParticipantRecord>,
    pub volunteers: Vec<VolunteerAssignment>,
}
