//! Plain-text rendering of dashboards for the terminal
use std::fmt::Write;

use chrono::NaiveTime;
use itertools::Itertools;

use crate::dashboard::{FacilitatorDashboard, ParentDashboard, VolunteerDashboard};
use crate::models::{EventRecord, Participants, Profile};
use crate::state::{CacheEntry, CardState, DashboardState};

/// Show a SQL `TIME` the way people read it, e.g. `09:00:00` as `9:00 AM`
pub fn format_time(sql_time: &str) -> String {
    let sql_time = sql_time.trim();
    if sql_time.is_empty() {
        return String::new();
    }
    ["%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(sql_time, fmt).ok())
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_else(|| sql_time.to_string())
}

fn render_profile(out: &mut String, profile: &Profile) {
    writeln!(out, "Welcome, {}", profile.full_name()).ok();
    writeln!(out, "{}", profile.email).ok();
    if let Some(phone) = &profile.phone {
        writeln!(out, "{}", phone).ok();
    }
}

fn render_calendar<E: CacheEntry>(out: &mut String, state: &DashboardState<E>) {
    let dates = state.event_dates();
    let flagged = if dates.is_empty() {
        "none".to_string()
    } else {
        dates.iter().map(|d| d.format("%Y-%m-%d")).join(", ")
    };
    writeln!(out, "\nEvent Calendar").ok();
    writeln!(out, "Dates with events: {}", flagged).ok();
}

fn render_participants(out: &mut String, participants: Option<&Participants>) {
    writeln!(out, "    Students Signed Up").ok();
    let Some(participants) = participants else {
        writeln!(out, "      Loading...").ok();
        return;
    };
    if participants.students.is_empty() {
        writeln!(out, "      (none)").ok();
    }
    for p in &participants.students {
        writeln!(
            out,
            "      {} | {} | {} | {}",
            p.student_name(),
            p.parent_name(),
            p.parent_email,
            p.parent_phone
        )
        .ok();
    }
    if !participants.volunteers.is_empty() {
        let names = participants.volunteers.iter().map(|v| v.name()).join(", ");
        writeln!(out, "    Volunteers: {}", names).ok();
    }
}

fn render_event_details(out: &mut String, event: &EventRecord) {
    writeln!(
        out,
        "    Time: {} - {}",
        format_time(&event.start_time),
        format_time(&event.end_time)
    )
    .ok();
    writeln!(out, "    Start Location: {}", event.start_location).ok();
    writeln!(out, "    End Location: {}", event.end_location).ok();
}

/// Shared layout of all dashboards. `details` adds the role-specific lines
/// of an expanded card.
fn render_dashboard<E, F>(
    state: &DashboardState<E>,
    fallback_heading: &str,
    empty_message: &str,
    details: F,
) -> String
where
    E: CacheEntry,
    F: Fn(&mut String, &E, CardState),
{
    let mut out = String::new();
    let Some(profile) = state.profile() else {
        return "Loading...\n".to_string();
    };
    render_profile(&mut out, profile);
    render_calendar(&mut out, state);

    let heading = if state.shows_selected_day() {
        format!("Events on {}", state.selected_date().format("%a %b %d %Y"))
    } else {
        fallback_heading.to_string()
    };
    writeln!(out, "\n{}", heading).ok();

    if state.events().is_empty() {
        writeln!(out, "{}", empty_message).ok();
    }

    for entry in state.visible_events() {
        let event = entry.event();
        let card = state.card_state(&entry.key());
        let marker = if card == CardState::Collapsed { "+" } else { "-" };
        writeln!(out, "{} [{}] {} ({})", marker, entry.key(), event.title, event.kind).ok();
        writeln!(out, "    Date: {}", event.date_string()).ok();
        if card != CardState::Collapsed {
            render_event_details(&mut out, event);
            details(&mut out, entry, card);
        }
    }
    out
}

pub fn render_facilitator(dashboard: &FacilitatorDashboard) -> String {
    render_dashboard(
        dashboard.state(),
        "All Events",
        "No events scheduled yet.",
        |out, event, card| {
            if card == CardState::Editing
                && let Some(edit) = dashboard.edit_buffer()
            {
                writeln!(out, "    Editing: {} on {}", edit.fields.title, edit.fields.date).ok();
            }
            render_participants(out, event.participants.as_ref());
        },
    )
}

pub fn render_volunteer(dashboard: &VolunteerDashboard) -> String {
    render_dashboard(
        dashboard.state(),
        "Assigned Events",
        "No assigned events yet.",
        |out, event, _| {
            render_participants(out, event.participants.as_ref());
            let status = if dashboard.is_declined(event.id) {
                "Declined"
            } else {
                "Decline Event"
            };
            writeln!(out, "    [{}]", status).ok();
        },
    )
}

pub fn render_parent(dashboard: &ParentDashboard) -> String {
    render_dashboard(
        dashboard.state(),
        "All Events",
        "No events found for your children yet.",
        |out, entry, _| {
            writeln!(out, "    Student: {}", entry.student_name).ok();
            let status = if dashboard.is_marked_absent(&entry.key) {
                "Marked Absent"
            } else {
                "Mark Absent"
            };
            writeln!(out, "    [{}]", status).ok();
        },
    )
}
