use owo_colors::OwoColorize;

use crate::api::ApiClient;
use crate::commands::text_from_arg_or_stdin;
use crate::error::{DeskError, Result};
use crate::types::{Channel, Language, NewTicket};

pub struct CreateOptions {
    pub subject: String,
    pub description: Option<String>,
    pub language: Language,
    pub email: Option<String>,
    pub username: Option<String>,
    pub json: bool,
}

/// Create a ticket on the customer's behalf. Console-created tickets are
/// portal tickets; the messaging channels create their own.
pub async fn cmd_create(client: &ApiClient, options: CreateOptions) -> Result<()> {
    let description = text_from_arg_or_stdin(options.description)?
        .ok_or_else(|| DeskError::Other("a description is required (argument or stdin)".to_string()))?;

    let ticket = client
        .create_ticket(&NewTicket {
            subject: options.subject,
            description,
            channel: Channel::Portal,
            language: options.language,
            customer_email: options.email,
            customer_username: options.username,
        })
        .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
        return Ok(());
    }

    println!(
        "{} ticket #{} ({} {})",
        "created".green(),
        ticket.id,
        ticket.priority,
        ticket.status
    );
    Ok(())
}
