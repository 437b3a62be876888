//! Session handed over by the auth provider and the scope a dashboard
//! derives from it.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{SyncError, SyncResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Volunteer,
    Facilitator,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parent" => Ok(Role::Parent),
            "volunteer" => Ok(Role::Volunteer),
            "facilitator" => Ok(Role::Facilitator),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub role: Option<Role>,
    pub is_facilitator: bool,
}

impl Session {
    pub fn new(token: &str, user_id: &str, role: Role, is_facilitator: bool) -> Self {
        Self {
            token: Some(token.to_string()),
            user_id: Some(user_id.to_string()),
            role: Some(role),
            is_facilitator,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user_id.is_some()
    }

    /// Facilitators sign in as volunteers carrying the facilitator flag
    pub fn can_facilitate(&self) -> bool {
        self.is_authenticated() && self.role == Some(Role::Volunteer) && self.is_facilitator
    }

    /// Resolve the backend scope for a dashboard. `None` means every data
    /// operation of that dashboard is suppressed.
    pub fn scope(&self, kind: DashboardKind) -> Option<Scope> {
        let (Some(token), Some(user_id)) = (&self.token, &self.user_id) else {
            return None;
        };
        if kind == DashboardKind::Facilitator && !self.can_facilitate() {
            return None;
        }
        Some(Scope {
            kind,
            user_id: user_id.clone(),
            token: token.clone(),
        })
    }

    pub fn require_scope(&self, kind: DashboardKind) -> SyncResult<Scope> {
        self.scope(kind).ok_or_else(|| {
            SyncError::precondition(format!("no usable session for the {} dashboard", kind))
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DashboardKind {
    Facilitator,
    Volunteer,
    Parent,
}

impl DashboardKind {
    /// Route prefix every request of this dashboard is scoped to
    pub fn route_prefix(&self, user_id: &str) -> String {
        match self {
            DashboardKind::Facilitator => format!("/volunteers/facilitator/{}", user_id),
            DashboardKind::Volunteer => format!("/volunteers/volunteer/{}", user_id),
            DashboardKind::Parent => format!("/parents/parent/{}", user_id),
        }
    }
}

impl fmt::Display for DashboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DashboardKind::Facilitator => "facilitator",
            DashboardKind::Volunteer => "volunteer",
            DashboardKind::Parent => "parent",
        };
        write!(f, "{}", name)
    }
}

/// Everything a backend call needs to address and authorize a request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scope {
    pub kind: DashboardKind,
    pub user_id: String,
    pub token: String,
}

impl Scope {
    pub fn prefix(&self) -> String {
        self.kind.route_prefix(&self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_suppresses_scope_without_token() {
        let session = Session {
            token: None,
            user_id: Some("7".to_string()),
            role: Some(Role::Parent),
            is_facilitator: false,
        };
        assert!(session.scope(DashboardKind::Parent).is_none());
        assert!(
            session
                .require_scope(DashboardKind::Parent)
                .unwrap_err()
                .is_precondition()
        );
    }

    #[test]
    fn it_requires_facilitator_flag_for_facilitator_scope() {
        let volunteer = Session::new("tok", "7", Role::Volunteer, false);
        assert!(volunteer.scope(DashboardKind::Facilitator).is_none());
        assert!(volunteer.scope(DashboardKind::Volunteer).is_some());

        let parent = Session::new("tok", "7", Role::Parent, true);
        assert!(parent.scope(DashboardKind::Facilitator).is_none());

        let facilitator = Session::new("tok", "7", Role::Volunteer, true);
        let scope = facilitator.scope(DashboardKind::Facilitator).unwrap();
        assert_eq!(scope.prefix(), "/volunteers/facilitator/7");
    }

    #[test]
    fn it_builds_route_prefixes() {
        assert_eq!(
            DashboardKind::Volunteer.route_prefix("3"),
            "/volunteers/volunteer/3"
        );
        assert_eq!(DashboardKind::Parent.route_prefix("3"), "/parents/parent/3");
    }

    #[test]
    fn it_parses_roles() {
        assert_eq!("Parent".parse::<Role>(), Ok(Role::Parent));
        assert_eq!(" volunteer ".parse::<Role>(), Ok(Role::Volunteer));
        assert!("admin".parse::<Role>().is_err());
    }
}
