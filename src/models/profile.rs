use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile of the signed in user. The identifying fields are shared by
/// every role; role-specific ones (other than `school_id`) are kept as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub school_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A parent's child, as listed by the parent students endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub last_name: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
