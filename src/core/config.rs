use std::env;

use crate::session::{Role, Session};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub role: Option<Role>,
    pub is_facilitator: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let host = "127.0.0.1";
        let port = "3000";
        let api_url = env::var("VOLUNTEER_HUB_API_URL")
            .unwrap_or(format!("http://{}:{}", host, port))
            .trim_end_matches('/')
            .to_string();
        let token = env::var("VOLUNTEER_HUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        let user_id = env::var("VOLUNTEER_HUB_USER_ID")
            .ok()
            .filter(|id| !id.is_empty());
        let role = match env::var("VOLUNTEER_HUB_ROLE") {
            Ok(value) => match value.parse::<Role>() {
                Ok(role) => Some(role),
                Err(e) => {
                    tracing::warn!("Ignoring VOLUNTEER_HUB_ROLE: {}", e);
                    None
                }
            },
            Err(_) => None,
        };
        let is_facilitator = env::var("VOLUNTEER_HUB_IS_FACILITATOR")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            api_url,
            token,
            user_id,
            role,
            is_facilitator,
        }
    }
}

impl AppConfig {
    /// Session as the auth provider would hand it to a dashboard
    pub fn session(&self) -> Session {
        Session {
            token: self.token.clone(),
            user_id: self.user_id.clone(),
            role: self.role,
            is_facilitator: self.is_facilitator,
        }
    }
}
