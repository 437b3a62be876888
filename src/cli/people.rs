use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use clap::builder::PossibleValuesParser;

use super::{ensure_session, load_facilitator};
use crate::backend::Backend;
use crate::dashboard::ParentDashboard;
use crate::models::people::DEFAULT_PASSWORD;
use crate::models::{NewParent, NewVolunteer, SCHOOL_OPTIONS};
use crate::session::{DashboardKind, Session};

#[derive(Args)]
pub struct ParentFields {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    address: String,
    /// Record the liability waiver as not signed
    #[arg(long, action, default_value = "false")]
    no_waiver: bool,
}

#[derive(Args)]
pub struct VolunteerFields {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    interest: String,
    #[arg(long, value_parser = PossibleValuesParser::new(SCHOOL_OPTIONS))]
    preferred_school: Option<String>,
}

pub async fn add_parent(
    session: Session,
    backend: Arc<dyn Backend>,
    fields: ParentFields,
) -> Result<()> {
    let mut dashboard = load_facilitator(session, backend).await?;
    *dashboard.new_parent_mut() = NewParent {
        first_name: fields.first_name,
        last_name: fields.last_name,
        email: fields.email,
        phone: fields.phone,
        address: fields.address,
        waiver: !fields.no_waiver,
    };
    dashboard.submit_new_parent().await?;
    println!("Parent created (password set to '{}')", DEFAULT_PASSWORD);
    Ok(())
}

pub async fn add_volunteer(
    session: Session,
    backend: Arc<dyn Backend>,
    fields: VolunteerFields,
) -> Result<()> {
    let mut dashboard = load_facilitator(session, backend).await?;
    *dashboard.new_volunteer_mut() = NewVolunteer {
        first_name: fields.first_name,
        last_name: fields.last_name,
        email: fields.email,
        phone: fields.phone,
        interest: fields.interest,
        preferred_school: fields.preferred_school.unwrap_or_default(),
    };
    dashboard.submit_new_volunteer().await?;
    println!("Volunteer created (password set to '{}')", DEFAULT_PASSWORD);
    Ok(())
}

pub async fn mark_absent(session: Session, backend: Arc<dyn Backend>, key: &str) -> Result<()> {
    ensure_session(&session, DashboardKind::Parent)?;
    let mut dashboard = ParentDashboard::new(session, backend);
    dashboard.initialize().await?;
    dashboard.mark_absent(key).await?;

    let student = dashboard
        .state()
        .find(key)
        .map(|e| e.student_name.clone())
        .unwrap_or_default();
    println!("Marked {} absent for event card {}", student, key);
    Ok(())
}
