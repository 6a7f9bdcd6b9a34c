use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::api::ApiClient;
use crate::display::{format_timestamp, priority_tag, sla_tag, status_elapsed, status_tag};
use crate::error::Result;
use crate::filter::{ChannelFilter, TicketFilter, ViewPreset, attention_tickets};
use crate::types::{Ticket, TicketPriority, TicketStatus};

/// A row in the ticket list table
#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Prio")]
    priority: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "SLA")]
    sla: String,
    #[tabled(rename = "In status")]
    in_status: String,
    #[tabled(rename = "Created")]
    created: String,
}

pub struct LsOptions {
    pub view: ViewPreset,
    pub statuses: Vec<TicketStatus>,
    pub priorities: Vec<TicketPriority>,
    pub channel: ChannelFilter,
    pub department: Option<String>,
    pub search: Option<String>,
    pub attention_only: bool,
    pub json: bool,
}

/// List tickets with the standard filter dimensions
pub async fn cmd_ls(client: &ApiClient, options: LsOptions) -> Result<()> {
    let tickets = client.list_tickets(None).await?;

    let mut filter = TicketFilter {
        priorities: options.priorities,
        channel: options.channel,
        department: options.department,
        search: options.search.unwrap_or_default(),
        ..Default::default()
    };
    // Explicit --status flags override the view preset wholesale
    if options.statuses.is_empty() {
        filter.apply_preset(options.view);
    } else {
        filter.statuses = options.statuses;
    }

    let attention = attention_tickets(&tickets);
    let visible: Vec<&Ticket> = if options.attention_only {
        attention.clone()
    } else {
        filter.apply(&tickets)
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!("No tickets match.");
    } else {
        println!("{}", render_ticket_table(&visible));
        println!("\n{} ticket(s) of {} total", visible.len(), tickets.len());
    }

    // The attention banner reflects the full collection, not the visible
    // subset, so a filtered view never hides an escalation
    if !options.attention_only && !attention.is_empty() {
        let ids: Vec<String> = attention.iter().map(|t| format!("#{}", t.id)).collect();
        println!(
            "{} {} open P4 ticket(s): {}",
            "attention:".red().bold(),
            attention.len(),
            ids.join(", ")
        );
    }

    Ok(())
}

pub(crate) fn render_ticket_table(tickets: &[&Ticket]) -> String {
    let rows: Vec<TicketRow> = tickets.iter().map(|t| ticket_row(t)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

fn ticket_row(t: &Ticket) -> TicketRow {
    TicketRow {
        id: t.id,
        subject: t.subject.clone(),
        status: status_tag(t.status),
        priority: priority_tag(t.priority),
        channel: t.channel.to_string(),
        customer: t
            .customer_email
            .clone()
            .or_else(|| t.customer_username.clone())
            .unwrap_or_else(|| "-".to_string()),
        sla: sla_tag(t),
        in_status: status_elapsed(t),
        created: format_timestamp(&t.created_at),
    }
}
