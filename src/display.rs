//! Shared display helpers for the console commands.

use owo_colors::OwoColorize;

use crate::types::{Ticket, TicketPriority, TicketStatus};

/// Humanize a minute count the way the list views do: `<1 мин`, `45 мин`,
/// `2 ч 05 мин`, `3 дн 4 ч`.
pub fn format_minutes(total_minutes: Option<f64>) -> String {
    let Some(total) = total_minutes else {
        return "—".to_string();
    };
    let minutes = total.floor() as i64;
    if minutes <= 0 {
        return "<1 мин".to_string();
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours == 0 {
        return format!("{} мин", minutes);
    }
    let days = hours / 24;
    let rem_hours = hours % 24;
    if days > 0 {
        if rem_hours == 0 {
            return format!("{} дн", days);
        }
        return format!("{} дн {} ч", days, rem_hours);
    }
    format!("{} ч {:02} мин", hours, mins)
}

/// Format an ISO datetime string for display
///
/// The API serves naive ISO timestamps; show them to the minute and fall
/// back to the raw string when parsing fails.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(ts) = raw.parse::<jiff::Timestamp>() {
        return ts.strftime("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = raw.parse::<jiff::civil::DateTime>() {
        return dt.strftime("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

/// Colored status tag
pub fn status_tag(status: TicketStatus) -> String {
    let tag = format!("[{}]", status);
    match status {
        TicketStatus::New => tag.yellow().to_string(),
        TicketStatus::InProgress => tag.cyan().to_string(),
        TicketStatus::Closed => tag.green().to_string(),
        TicketStatus::AutoClosed => tag.dimmed().to_string(),
    }
}

/// Colored priority tag; P4 is the operator-attention level
pub fn priority_tag(priority: TicketPriority) -> String {
    let tag = priority.to_string();
    match priority {
        TicketPriority::P4 => tag.red().to_string(),
        TicketPriority::P3 => tag.yellow().to_string(),
        _ => tag,
    }
}

/// SLA column value: breach state for open tickets, dash when the server
/// sent no target
pub fn sla_tag(ticket: &Ticket) -> String {
    if ticket.sla_target_minutes.is_none() {
        return "—".to_string();
    }
    if ticket.sla_breached {
        "просрочено".red().to_string()
    } else {
        "в срок".green().to_string()
    }
}

/// Time-in-status column: only meaningful while the ticket is open
pub fn status_elapsed(ticket: &Ticket) -> String {
    if ticket.status.is_open() {
        format_minutes(ticket.status_elapsed_minutes)
    } else {
        "—".to_string()
    }
}
