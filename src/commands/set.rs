use owo_colors::OwoColorize;

use crate::api::ApiClient;
use crate::display::status_tag;
use crate::error::Result;
use crate::types::{RequestType, TicketPriority, TicketStatus, TicketStatusUpdate};

pub struct SetOptions {
    pub status: TicketStatus,
    pub priority: Option<TicketPriority>,
    pub request_type: Option<RequestType>,
    pub ai_disabled: Option<bool>,
}

/// Update a ticket's status, and optionally its priority, classification
/// or AI toggle, in one call
pub async fn cmd_set(client: &ApiClient, ticket_id: u64, options: SetOptions) -> Result<()> {
    let updated = client
        .update_ticket_status(
            ticket_id,
            &TicketStatusUpdate {
                status: options.status,
                priority: options.priority,
                request_type: options.request_type,
                ai_disabled: options.ai_disabled,
            },
        )
        .await?;

    println!(
        "{} ticket #{} is now {} {}",
        "updated".green(),
        updated.id,
        status_tag(updated.status),
        updated.priority
    );
    if updated.ai_disabled {
        println!("AI replies disabled");
    }
    Ok(())
}
