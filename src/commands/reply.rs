use owo_colors::OwoColorize;

use crate::api::ApiClient;
use crate::commands::text_from_arg_or_stdin;
use crate::error::{DeskError, Result};
use crate::types::{AuthorType, NewMessage};

/// Post an agent reply to a ticket thread. The reply language follows the
/// ticket so the customer keeps reading in their own language.
pub async fn cmd_reply(client: &ApiClient, ticket_id: u64, body: Option<String>) -> Result<()> {
    let body = text_from_arg_or_stdin(body)?
        .ok_or_else(|| DeskError::Other("an empty reply would be posted; pass text or pipe stdin".to_string()))?;

    let details = client.get_ticket(ticket_id).await?;

    let message = client
        .add_message(
            ticket_id,
            &NewMessage {
                body,
                author_type: AuthorType::Agent,
                language: details.ticket.language,
            },
        )
        .await?;

    println!(
        "{} message #{} on ticket #{}",
        "posted".green(),
        message.id,
        ticket_id
    );
    Ok(())
}
