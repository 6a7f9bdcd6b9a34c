use owo_colors::OwoColorize;

use crate::api::ApiClient;
use crate::display::{format_minutes, format_timestamp, priority_tag, sla_tag, status_tag};
use crate::error::Result;
use crate::types::{AuthorType, TicketDetails};

/// Show a single ticket with its message thread. `--summary` and
/// `--suggest` fetch the AI panels alongside the ticket.
pub async fn cmd_show(
    client: &ApiClient,
    ticket_id: u64,
    summary: bool,
    suggest: bool,
    json: bool,
) -> Result<()> {
    let details = client.get_ticket(ticket_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    print_details(&details);

    // The AI panels are advisory; the ticket itself already rendered, so a
    // panel failure is reported without failing the command
    if summary || suggest {
        let (summary_result, suggest_result) = tokio::join!(
            async {
                if summary {
                    Some(client.ticket_summary(ticket_id).await)
                } else {
                    None
                }
            },
            async {
                if suggest {
                    Some(client.reply_suggestions(ticket_id).await)
                } else {
                    None
                }
            },
        );

        match summary_result {
            Some(Ok(result)) => {
                println!("\n{}", "Summary".bold().underline());
                println!("{}", result.summary);
            }
            Some(Err(e)) => eprintln!("summary unavailable: {e}"),
            None => {}
        }
        match suggest_result {
            Some(Ok(result)) => {
                println!("\n{}", "Suggested replies".bold().underline());
                for (i, suggestion) in result.suggestions.iter().enumerate() {
                    println!("{}. {}", i + 1, suggestion);
                }
            }
            Some(Err(e)) => eprintln!("suggestions unavailable: {e}"),
            None => {}
        }
    }

    Ok(())
}

pub(crate) fn print_details(details: &TicketDetails) {
    let t = &details.ticket;

    println!("{} {}", format!("#{}", t.id).bold(), t.subject.bold());
    println!(
        "{} {} {} via {}",
        status_tag(t.status),
        priority_tag(t.priority),
        t.request_type
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string()),
        t.channel
    );

    if let Some(email) = &t.customer_email {
        println!("customer:   {}", email);
    }
    if let Some(username) = &t.customer_username {
        println!("username:   {}", username);
    }
    if let Some(name) = &t.department_name {
        println!("department: {}", name);
    } else if let Some(code) = &t.department_code {
        println!("department: {}", code);
    }
    println!("language:   {}", t.language);
    println!("created:    {}", format_timestamp(&t.created_at));
    if let Some(closed_at) = &t.closed_at {
        println!("closed:     {}", format_timestamp(closed_at));
    }
    println!(
        "sla:        {} (target {}, elapsed {})",
        sla_tag(t),
        format_minutes(t.sla_target_minutes),
        format_minutes(t.sla_elapsed_minutes)
    );
    if t.ai_disabled {
        println!("{}", "AI replies disabled for this ticket".yellow());
    }
    if t.auto_closed_by_ai {
        println!("{}", "auto-closed by AI".dimmed());
    }

    if !t.description.is_empty() {
        println!("\n{}", t.description);
    }

    if details.messages.is_empty() {
        println!("\n(no messages)");
        return;
    }

    println!();
    for message in &details.messages {
        let author = match message.author_type {
            AuthorType::Customer => "customer".cyan().to_string(),
            AuthorType::Agent => "agent".green().to_string(),
            AuthorType::Ai => "ai".magenta().to_string(),
        };
        println!(
            "{} {} {}",
            format_timestamp(&message.created_at).dimmed(),
            author,
            format!("[{}]", message.language).dimmed()
        );
        println!("{}\n", message.body);
    }
}
