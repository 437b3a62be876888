use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::Args;

use super::{ensure_session, load_facilitator};
use crate::backend::Backend;
use crate::dashboard::VolunteerDashboard;
use crate::models::{EventDraft, EventRecord};
use crate::render::format_time;
use crate::session::{DashboardKind, Session};

#[derive(Args)]
pub struct EventFields {
    #[arg(long)]
    title: String,
    #[arg(long = "type")]
    kind: String,
    /// YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// HH:MM
    #[arg(long)]
    start_time: String,
    /// HH:MM
    #[arg(long)]
    end_time: String,
    #[arg(long)]
    start_location: String,
    #[arg(long)]
    end_location: String,
}

impl From<EventFields> for EventDraft {
    fn from(f: EventFields) -> Self {
        Self {
            title: f.title,
            kind: f.kind,
            date: f.date,
            start_time: f.start_time,
            end_time: f.end_time,
            start_location: f.start_location,
            end_location: f.end_location,
        }
    }
}

#[derive(Args)]
pub struct EventPatchFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long = "type")]
    kind: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    start_time: Option<String>,
    #[arg(long)]
    end_time: Option<String>,
    #[arg(long)]
    start_location: Option<String>,
    #[arg(long)]
    end_location: Option<String>,
}

impl EventPatchFields {
    fn apply(self, draft: &mut EventDraft) {
        let EventPatchFields {
            title,
            kind,
            date,
            start_time,
            end_time,
            start_location,
            end_location,
        } = self;
        let fields = [
            (&mut draft.title, title),
            (&mut draft.kind, kind),
            (&mut draft.date, date),
            (&mut draft.start_time, start_time),
            (&mut draft.end_time, end_time),
            (&mut draft.start_location, start_location),
            (&mut draft.end_location, end_location),
        ];
        for (target, value) in fields {
            if let Some(value) = value {
                *target = value;
            }
        }
    }
}

fn print_event(event: &EventRecord) {
    println!(
        "#{} {} ({}) on {}, {} - {}, {} -> {}",
        event.id,
        event.title,
        event.kind,
        event.date_string(),
        format_time(&event.start_time),
        format_time(&event.end_time),
        event.start_location,
        event.end_location
    );
}

pub async fn create(
    session: Session,
    backend: Arc<dyn Backend>,
    fields: EventFields,
) -> Result<()> {
    let mut dashboard = load_facilitator(session, backend).await?;
    *dashboard.new_event_mut() = fields.into();
    let created = dashboard.submit_new_event().await?;
    print!("Created ");
    print_event(&created);
    Ok(())
}

/// Goes through the same expand, edit, save cycle as the dashboard card
pub async fn update(
    session: Session,
    backend: Arc<dyn Backend>,
    id: i64,
    fields: EventPatchFields,
) -> Result<()> {
    let mut dashboard = load_facilitator(session, backend).await?;
    dashboard.toggle_card(&id.to_string()).await?;
    dashboard.begin_edit()?;

    let mut buffer = dashboard
        .edit_buffer()
        .cloned()
        .ok_or_else(|| anyhow!("Event {} not found", id))?;
    fields.apply(&mut buffer.fields);
    dashboard.set_edit_buffer(buffer);

    let updated = dashboard.save_edit().await?;
    print!("Updated ");
    print_event(&updated);
    Ok(())
}

pub async fn delete(session: Session, backend: Arc<dyn Backend>, id: i64) -> Result<()> {
    let mut dashboard = load_facilitator(session, backend).await?;
    dashboard.delete_event(id).await?;
    println!(
        "Deleted event {}, {} events left",
        id,
        dashboard.state().events().len()
    );
    Ok(())
}

pub async fn participants(
    session: Session,
    backend: Arc<dyn Backend>,
    kind: DashboardKind,
    id: i64,
) -> Result<()> {
    let key = id.to_string();
    let event = match kind {
        DashboardKind::Facilitator => {
            let mut dashboard = load_facilitator(session, backend).await?;
            dashboard.toggle_card(&key).await?;
            dashboard.state().find(&key).cloned()
        }
        DashboardKind::Volunteer => {
            ensure_session(&session, kind)?;
            let mut dashboard = VolunteerDashboard::new(session, backend);
            dashboard.initialize().await?;
            dashboard.toggle_card(&key).await?;
            dashboard.state().find(&key).cloned()
        }
        DashboardKind::Parent => {
            return Err(anyhow!("Parents can not list event participants"));
        }
    };

    let event = event.ok_or_else(|| anyhow!("Event {} not found", id))?;
    print_event(&event);
    let participants = event.participants.unwrap_or_default();
    for p in &participants.students {
        println!(
            "  student {} (parent {}, {}, {})",
            p.student_name(),
            p.parent_name(),
            p.parent_email,
            p.parent_phone
        );
    }
    for v in &participants.volunteers {
        println!("  volunteer {} <{}>", v.name(), v.email);
    }
    Ok(())
}
