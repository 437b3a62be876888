use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;

use super::ensure_session;
use crate::backend::Backend;
use crate::dashboard::{FacilitatorDashboard, ParentDashboard, VolunteerDashboard};
use crate::render::{render_facilitator, render_parent, render_volunteer};
use crate::session::{DashboardKind, Session};

pub async fn run(
    session: Session,
    backend: Arc<dyn Backend>,
    kind: DashboardKind,
    date: Option<NaiveDate>,
    expand: Option<String>,
) -> Result<()> {
    ensure_session(&session, kind)?;

    let output = match kind {
        DashboardKind::Facilitator => {
            let mut dashboard = FacilitatorDashboard::new(session, backend);
            dashboard.initialize().await?;
            if let Some(date) = date {
                dashboard.select_date(date);
            }
            if let Some(key) = &expand {
                dashboard.toggle_card(key).await?;
            }
            render_facilitator(&dashboard)
        }
        DashboardKind::Volunteer => {
            let mut dashboard = VolunteerDashboard::new(session, backend);
            dashboard.initialize().await?;
            if let Some(date) = date {
                dashboard.select_date(date);
            }
            if let Some(key) = &expand {
                dashboard.toggle_card(key).await?;
            }
            render_volunteer(&dashboard)
        }
        DashboardKind::Parent => {
            let mut dashboard = ParentDashboard::new(session, backend);
            dashboard.initialize().await?;
            if let Some(date) = date {
                dashboard.select_date(date);
            }
            if let Some(key) = &expand {
                dashboard.toggle_card(key);
            }
            render_parent(&dashboard)
        }
    };

    print!("{}", output);
    Ok(())
}
