//! Forms a facilitator uses to onboard parents and volunteers.
use serde::Serialize;

/// Schools a new volunteer can pick as their preference
pub const SCHOOL_OPTIONS: &[&str] = &[
    "Blackhawk Middle School",
    "Pflugerville High School",
    "Park Crest Middle School",
    "Kelly Lane Middle School",
    "Cele Middle School",
    "Rowe Lane Elementary",
    "Murchison Elementary",
    "Hendrickson High School",
    "Westview Middle School",
    "Timmerman Elementary",
];

/// Password every account created from the dashboard starts with
pub const DEFAULT_PASSWORD: &str = "password";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewParent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub waiver: bool,
}

impl Default for NewParent {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            waiver: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NewVolunteer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub interest: String,
    pub preferred_school: String,
}

/// Request body for creating a volunteer: the form plus the onboarding
/// defaults and the facilitator's school.
#[derive(Debug, Serialize)]
pub struct VolunteerSignup<'a> {
    #[serde(flatten)]
    pub form: &'a NewVolunteer,
    pub password: &'static str,
    pub facilitator: bool,
    pub school_id: Option<i64>,
    pub flexible: bool,
    pub background_check: bool,
    pub status: &'static str,
}

impl<'a> VolunteerSignup<'a> {
    pub fn new(form: &'a NewVolunteer, school_id: Option<i64>) -> Self {
        Self {
            form,
            password: DEFAULT_PASSWORD,
            facilitator: false,
            school_id,
            flexible: true,
            background_check: true,
            status: "active",
        }
    }
}
