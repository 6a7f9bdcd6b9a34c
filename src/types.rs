use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DeskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    New,
    InProgress,
    Closed,
    AutoClosed,
}

impl TicketStatus {
    /// True for tickets still awaiting resolution
    pub fn is_open(&self) -> bool {
        matches!(self, TicketStatus::New | TicketStatus::InProgress)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::New => write!(f, "new"),
            TicketStatus::InProgress => write!(f, "in_progress"),
            TicketStatus::Closed => write!(f, "closed"),
            TicketStatus::AutoClosed => write!(f, "auto_closed"),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(TicketStatus::New),
            "in_progress" => Ok(TicketStatus::InProgress),
            "closed" => Ok(TicketStatus::Closed),
            "auto_closed" => Ok(TicketStatus::AutoClosed),
            _ => Err(DeskError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &["new", "in_progress", "closed", "auto_closed"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TicketPriority {
    P1,
    P2,
    #[default]
    P3,
    P4,
}

impl TicketPriority {
    pub fn as_num(&self) -> u8 {
        match self {
            TicketPriority::P1 => 1,
            TicketPriority::P2 => 2,
            TicketPriority::P3 => 3,
            TicketPriority::P4 => 4,
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.as_num())
    }
}

impl FromStr for TicketPriority {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "P1" => Ok(TicketPriority::P1),
            "P2" => Ok(TicketPriority::P2),
            "P3" => Ok(TicketPriority::P3),
            "P4" => Ok(TicketPriority::P4),
            _ => Err(DeskError::InvalidPriority(s.to_string())),
        }
    }
}

pub const VALID_PRIORITIES: &[&str] = &["P1", "P2", "P3", "P4"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Telegram,
    Email,
    Portal,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Telegram => write!(f, "telegram"),
            Channel::Email => write!(f, "email"),
            Channel::Portal => write!(f, "portal"),
        }
    }
}

impl FromStr for Channel {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "telegram" => Ok(Channel::Telegram),
            "email" => Ok(Channel::Email),
            "portal" => Ok(Channel::Portal),
            _ => Err(DeskError::InvalidChannel(s.to_string())),
        }
    }
}

pub const VALID_CHANNELS: &[&str] = &["telegram", "email", "portal"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorType {
    Customer,
    Agent,
    Ai,
}

impl fmt::Display for AuthorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorType::Customer => write!(f, "customer"),
            AuthorType::Agent => write!(f, "agent"),
            AuthorType::Ai => write!(f, "ai"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    Kk,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Ru => write!(f, "ru"),
            Language::Kk => write!(f, "kk"),
        }
    }
}

impl FromStr for Language {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "kk" => Ok(Language::Kk),
            _ => Err(DeskError::InvalidLanguage(s.to_string())),
        }
    }
}

pub const VALID_LANGUAGES: &[&str] = &["ru", "kk"];

/// Classified request type assigned by the platform's AI router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Problem,
    Question,
    Feedback,
    Career,
    Partner,
    Other,
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestType::Problem => write!(f, "problem"),
            RequestType::Question => write!(f, "question"),
            RequestType::Feedback => write!(f, "feedback"),
            RequestType::Career => write!(f, "career"),
            RequestType::Partner => write!(f, "partner"),
            RequestType::Other => write!(f, "other"),
        }
    }
}

impl FromStr for RequestType {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "problem" => Ok(RequestType::Problem),
            "question" => Ok(RequestType::Question),
            "feedback" => Ok(RequestType::Feedback),
            "career" => Ok(RequestType::Career),
            "partner" => Ok(RequestType::Partner),
            "other" => Ok(RequestType::Other),
            _ => Err(DeskError::InvalidRequestType(s.to_string())),
        }
    }
}

pub const VALID_REQUEST_TYPES: &[&str] = &[
    "problem", "question", "feedback", "career", "partner", "other",
];

/// Ticket as served by the API. The platform owns every field; the console
/// never mutates a ticket except through the documented endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    pub channel: Channel,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_username: Option<String>,
    #[serde(default)]
    pub request_type: Option<RequestType>,
    #[serde(default)]
    pub category_code: Option<String>,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    #[serde(default)]
    pub department_code: Option<String>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub auto_closed_by_ai: bool,
    #[serde(default)]
    pub ai_disabled: bool,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub closed_at: Option<String>,

    // SLA fields derived server-side from priority and timestamps
    #[serde(default)]
    pub sla_target_minutes: Option<f64>,
    #[serde(default)]
    pub sla_elapsed_minutes: Option<f64>,
    #[serde(default)]
    pub sla_breached: bool,
    #[serde(default)]
    pub status_elapsed_minutes: Option<f64>,
}

impl Ticket {
    /// Search haystack: subject, customer email and username, lowercased.
    /// Mirrors what the list views match free-text searches against.
    pub fn search_haystack(&self) -> String {
        format!(
            "{} {} {}",
            self.subject,
            self.customer_email.as_deref().unwrap_or(""),
            self.customer_username.as_deref().unwrap_or(""),
        )
        .to_lowercase()
    }
}

/// Message in a ticket thread. Insertion order is chronological; messages are
/// immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub author_type: AuthorType,
    pub body: String,
    #[serde(default)]
    pub language: Language,
    pub created_at: String,
}

/// Ticket detail payload: the ticket plus its full message thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDetails {
    #[serde(flatten)]
    pub ticket: Ticket,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    pub channel: Channel,
    pub language: Language,
    pub customer_email: Option<String>,
    pub customer_username: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub body: String,
    pub author_type: AuthorType,
    pub language: Language,
}

/// Partial update for `PUT /tickets/{id}/status`; `None` fields are left
/// untouched by the server
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketStatusUpdate {
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_type: Option<RequestType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_disabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqArticle {
    pub id: u64,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub category_code: Option<String>,
    #[serde(default)]
    pub auto_resolvable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FaqPayload {
    pub question: String,
    pub answer: String,
    pub language: Language,
    pub category_code: Option<String>,
    pub auto_resolvable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplySuggestions {
    pub suggestions: Vec<String>,
}

/// Dashboard metrics from `/analytics/overview`. The per-category and SLA
/// counters are optional: older deployments serve only the core block.
#[derive(Debug, Clone, Deserialize)]
pub struct OverviewMetrics {
    pub total_tickets: u64,
    pub new_today: u64,
    pub auto_closed_percent: f64,
    #[serde(default)]
    pub avg_first_response_minutes: Option<f64>,
    #[serde(default)]
    pub classification_accuracy: Option<f64>,
    pub generated_at: String,

    #[serde(default)]
    pub in_progress_tickets: Option<u64>,
    #[serde(default)]
    pub problem_tickets: Option<u64>,
    #[serde(default)]
    pub question_tickets: Option<u64>,
    #[serde(default)]
    pub feedback_tickets: Option<u64>,
    #[serde(default)]
    pub career_tickets: Option<u64>,
    #[serde(default)]
    pub partner_tickets: Option<u64>,
    #[serde(default)]
    pub other_tickets: Option<u64>,
    #[serde(default)]
    pub p1_tickets: Option<u64>,
    #[serde(default)]
    pub p2_tickets: Option<u64>,
    #[serde(default)]
    pub p3_tickets: Option<u64>,
    #[serde(default)]
    pub p4_tickets: Option<u64>,
    #[serde(default)]
    pub open_sla_ok_tickets: Option<u64>,
    #[serde(default)]
    pub open_sla_breached_tickets: Option<u64>,
    #[serde(default)]
    pub user_auto_closed_tickets: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for s in VALID_STATUSES {
            let parsed: TicketStatus = s.parse().unwrap();
            assert_eq!(parsed.to_string(), *s);
        }
        assert!("archived".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_status_is_open() {
        assert!(TicketStatus::New.is_open());
        assert!(TicketStatus::InProgress.is_open());
        assert!(!TicketStatus::Closed.is_open());
        assert!(!TicketStatus::AutoClosed.is_open());
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("P1".parse::<TicketPriority>().unwrap(), TicketPriority::P1);
        assert_eq!("p4".parse::<TicketPriority>().unwrap(), TicketPriority::P4);
        assert!("P0".parse::<TicketPriority>().is_err());
        assert!("P5".parse::<TicketPriority>().is_err());
    }

    #[test]
    fn test_channel_parse() {
        assert_eq!("telegram".parse::<Channel>().unwrap(), Channel::Telegram);
        assert!("sms".parse::<Channel>().is_err());
    }

    #[test]
    fn test_ticket_deserialization_minimal() {
        // Optional fields absent from the payload must default cleanly
        let json = serde_json::json!({
            "id": 7,
            "subject": "Wifi down",
            "channel": "telegram",
            "priority": "P2",
            "status": "new",
            "created_at": "2025-11-03T10:00:00Z"
        });
        let ticket: Ticket = serde_json::from_value(json).unwrap();
        assert_eq!(ticket.id, 7);
        assert_eq!(ticket.status, TicketStatus::New);
        assert_eq!(ticket.customer_email, None);
        assert!(!ticket.sla_breached);
    }

    #[test]
    fn test_ticket_deserialization_rejects_unknown_status() {
        let json = serde_json::json!({
            "id": 7,
            "subject": "x",
            "channel": "email",
            "priority": "P2",
            "status": "pending",
            "created_at": "2025-11-03T10:00:00Z"
        });
        assert!(serde_json::from_value::<Ticket>(json).is_err());
    }

    #[test]
    fn test_search_haystack_includes_contact_fields() {
        let json = serde_json::json!({
            "id": 1,
            "subject": "Billing",
            "channel": "email",
            "priority": "P3",
            "status": "new",
            "customer_email": "Ada@Example.com",
            "created_at": "2025-11-03T10:00:00Z"
        });
        let ticket: Ticket = serde_json::from_value(json).unwrap();
        assert!(ticket.search_haystack().contains("ada@example.com"));
        assert!(ticket.search_haystack().contains("billing"));
    }

    #[test]
    fn test_status_update_skips_unset_fields() {
        let update = TicketStatusUpdate {
            status: TicketStatus::InProgress,
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "in_progress" }));
    }
}
