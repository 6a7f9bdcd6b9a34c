//! Client-side filtering for the ticket list views.
//!
//! The console always fetches the full collection and derives the visible
//! subset locally. Filtering never reorders or mutates the source: the
//! output is a subsequence of the input in fetch order.

use std::str::FromStr;

use crate::error::DeskError;
use crate::types::{Channel, Ticket, TicketPriority, TicketStatus};

/// Named status presets for the list view tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPreset {
    #[default]
    Active,
    Closed,
    All,
}

impl ViewPreset {
    /// The status set this preset selects. Applying a preset replaces any
    /// manually toggled statuses wholesale.
    pub fn statuses(&self) -> Vec<TicketStatus> {
        match self {
            ViewPreset::Active => vec![TicketStatus::New, TicketStatus::InProgress],
            ViewPreset::Closed => vec![TicketStatus::Closed, TicketStatus::AutoClosed],
            ViewPreset::All => vec![
                TicketStatus::New,
                TicketStatus::InProgress,
                TicketStatus::Closed,
                TicketStatus::AutoClosed,
            ],
        }
    }
}

impl FromStr for ViewPreset {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ViewPreset::Active),
            "closed" => Ok(ViewPreset::Closed),
            "all" => Ok(ViewPreset::All),
            _ => Err(DeskError::Other(format!(
                "unknown view '{}', expected 'active', 'closed' or 'all'",
                s
            ))),
        }
    }
}

/// Channel selector: a single channel or no restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelFilter {
    #[default]
    All,
    Only(Channel),
}

impl FromStr for ChannelFilter {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(ChannelFilter::All);
        }
        Ok(ChannelFilter::Only(s.parse()?))
    }
}

/// Independently toggleable filter dimensions for the ticket list.
///
/// Empty status and priority sets mean "no restriction". The two observed
/// versions of the original list view disagreed here; the maintained one
/// passes every ticket when nothing is selected, and that is the behavior
/// kept.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub statuses: Vec<TicketStatus>,
    pub priorities: Vec<TicketPriority>,
    pub channel: ChannelFilter,
    pub department: Option<String>,
    pub search: String,
}

impl TicketFilter {
    /// Replace the status set with a preset's selection
    pub fn apply_preset(&mut self, preset: ViewPreset) {
        self.statuses = preset.statuses();
    }

    /// Whether a single ticket passes every active predicate
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&ticket.status) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&ticket.priority) {
            return false;
        }
        if let ChannelFilter::Only(channel) = self.channel
            && ticket.channel != channel
        {
            return false;
        }
        if let Some(department) = &self.department
            && ticket.department_code.as_deref() != Some(department.as_str())
        {
            return false;
        }
        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        ticket.search_haystack().contains(&query)
    }

    /// Derive the visible subset, preserving fetch order
    pub fn apply<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
        tickets.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Tickets needing operator attention: highest priority and still open.
/// Always computed against the full unfiltered collection.
pub fn attention_tickets(tickets: &[Ticket]) -> Vec<&Ticket> {
    tickets
        .iter()
        .filter(|t| t.priority == TicketPriority::P4 && t.status.is_open())
        .collect()
}
