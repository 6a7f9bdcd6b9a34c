pub mod api;
pub mod category;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod filter;
pub mod poll;
pub mod types;

pub use api::ApiClient;
pub use category::{CategoryCode, MAIN_CATEGORY_LABELS};
pub use config::Config;
pub use error::{DeskError, Result};
pub use filter::{ChannelFilter, TicketFilter, ViewPreset, attention_tickets};
pub use poll::{
    DETAIL_POLL_PERIOD, LIST_POLL_PERIOD, PollHandle, Snapshot, spawn_detail_poll, spawn_list_poll,
};
pub use types::{
    AuthorType, Channel, FaqArticle, FaqPayload, Language, Message, NewMessage, NewTicket,
    OverviewMetrics, RequestType, Ticket, TicketDetails, TicketPriority, TicketStatus,
    TicketStatusUpdate, VALID_CHANNELS, VALID_LANGUAGES, VALID_PRIORITIES, VALID_REQUEST_TYPES,
    VALID_STATUSES,
};
