use std::sync::Arc;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod events;
pub mod people;
pub mod show;

use crate::backend::{Backend, HttpBackend};
use crate::core::AppConfig;
use crate::dashboard::FacilitatorDashboard;
use crate::session::{DashboardKind, Session};
use events::{EventFields, EventPatchFields};
use people::{ParentFields, VolunteerFields};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DashboardArg {
    Facilitator,
    Volunteer,
    Parent,
}

impl From<DashboardArg> for DashboardKind {
    fn from(arg: DashboardArg) -> Self {
        match arg {
            DashboardArg::Facilitator => DashboardKind::Facilitator,
            DashboardArg::Volunteer => DashboardKind::Volunteer,
            DashboardArg::Parent => DashboardKind::Parent,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Load a dashboard and print it
    Show {
        #[arg(long, value_enum)]
        dashboard: DashboardArg,

        /// Calendar day to focus (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Key of the event card to expand
        #[arg(long)]
        expand: Option<String>,
    },
    /// Create an event (facilitator)
    CreateEvent {
        #[command(flatten)]
        fields: EventFields,
    },
    /// Update an event (facilitator)
    UpdateEvent {
        #[arg(long)]
        id: i64,

        #[command(flatten)]
        fields: EventPatchFields,
    },
    /// Delete an event (facilitator)
    DeleteEvent {
        #[arg(long)]
        id: i64,
    },
    /// List the students and volunteers of an event
    Participants {
        #[arg(long, value_enum, default_value = "volunteer")]
        dashboard: DashboardArg,

        #[arg(long)]
        id: i64,
    },
    /// Report a child absent from an event (parent)
    MarkAbsent {
        /// Card key in the form <event id>-<student id>
        #[arg(long)]
        key: String,
    },
    /// Create a parent account (facilitator)
    AddParent {
        #[command(flatten)]
        fields: ParentFields,
    },
    /// Create a volunteer account at the facilitator's school (facilitator)
    AddVolunteer {
        #[command(flatten)]
        fields: VolunteerFields,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Fail early with a readable message instead of rendering a dashboard
/// that can never load
pub(crate) fn ensure_session(session: &Session, kind: DashboardKind) -> Result<()> {
    if session.scope(kind).is_some() {
        return Ok(());
    }
    if !session.is_authenticated() {
        bail!("Missing VOLUNTEER_HUB_TOKEN or VOLUNTEER_HUB_USER_ID");
    }
    bail!(
        "The {} dashboard is not available for this account (role {:?}, facilitator: {})",
        kind,
        session.role,
        session.is_facilitator
    )
}

pub(crate) async fn load_facilitator(
    session: Session,
    backend: Arc<dyn Backend>,
) -> Result<FacilitatorDashboard> {
    ensure_session(&session, DashboardKind::Facilitator)?;
    let mut dashboard = FacilitatorDashboard::new(session, backend);
    dashboard.initialize().await?;
    Ok(dashboard)
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    let config = AppConfig::default();
    let session = config.session();
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config.api_url));
    tracing::debug!("Using backend at {}", config.api_url);

    // Handle each sub command
    match args.command {
        Some(Command::Show {
            dashboard,
            date,
            expand,
        }) => {
            show::run(session, backend, dashboard.into(), date, expand).await?;
        }
        Some(Command::CreateEvent { fields }) => {
            events::create(session, backend, fields).await?;
        }
        Some(Command::UpdateEvent { id, fields }) => {
            events::update(session, backend, id, fields).await?;
        }
        Some(Command::DeleteEvent { id }) => {
            events::delete(session, backend, id).await?;
        }
        Some(Command::Participants { dashboard, id }) => {
            events::participants(session, backend, dashboard.into(), id).await?;
        }
        Some(Command::MarkAbsent { key }) => {
            people::mark_absent(session, backend, &key).await?;
        }
        Some(Command::AddParent { fields }) => {
            people::add_parent(session, backend, fields).await?;
        }
        Some(Command::AddVolunteer { fields }) => {
            people::add_volunteer(session, backend, fields).await?;
        }
        None => {}
    }

    Ok(())
}
