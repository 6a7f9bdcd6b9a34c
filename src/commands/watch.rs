use owo_colors::OwoColorize;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::commands::ls::render_ticket_table;
use crate::commands::show::print_details;
use crate::error::Result;
use crate::filter::{TicketFilter, ViewPreset, attention_tickets};
use crate::poll::{Snapshot, spawn_detail_poll, spawn_list_poll};
use crate::types::{Ticket, TicketDetails};

/// Live view that re-renders on every background refresh until Ctrl-C.
/// Without `--ticket` it watches the filtered list; with it, one thread.
///
/// The first fetch runs in the foreground so a bad URL or dead server
/// fails the command instead of printing an empty screen. Refresh failures
/// after that keep the last-known-good render.
pub async fn cmd_watch(
    client: &ApiClient,
    ticket_id: Option<u64>,
    view: ViewPreset,
) -> Result<()> {
    match ticket_id {
        Some(id) => watch_detail(client, id).await,
        None => watch_list(client, view).await,
    }
}

async fn watch_list(client: &ApiClient, view: ViewPreset) -> Result<()> {
    let mut filter = TicketFilter::default();
    filter.apply_preset(view);

    let tickets = client.list_tickets(None).await?;
    render_list(&tickets, &filter);

    let generation = 1u64;
    let (tx, mut rx) = mpsc::channel::<Snapshot<Vec<Ticket>>>(8);
    let poll = spawn_list_poll(client.clone(), generation, tx);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            snapshot = rx.recv() => {
                let Some(snapshot) = snapshot else { break };
                if snapshot.generation != generation {
                    continue;
                }
                render_list(&snapshot.data, &filter);
            }
        }
    }

    poll.shutdown().await;
    Ok(())
}

async fn watch_detail(client: &ApiClient, ticket_id: u64) -> Result<()> {
    let details = client.get_ticket(ticket_id).await?;
    render_detail(&details);

    let generation = 1u64;
    let (tx, mut rx) = mpsc::channel::<Snapshot<TicketDetails>>(8);
    let poll = spawn_detail_poll(client.clone(), ticket_id, generation, tx);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            snapshot = rx.recv() => {
                let Some(snapshot) = snapshot else { break };
                if snapshot.generation != generation {
                    continue;
                }
                render_detail(&snapshot.data);
            }
        }
    }

    poll.shutdown().await;
    Ok(())
}

fn clear_screen() {
    print!("\x1b[2J\x1b[H");
}

fn render_list(tickets: &[Ticket], filter: &TicketFilter) {
    clear_screen();
    let visible = filter.apply(tickets);
    if visible.is_empty() {
        println!("No tickets match.");
    } else {
        println!("{}", render_ticket_table(&visible));
    }

    let attention = attention_tickets(tickets);
    if !attention.is_empty() {
        let ids: Vec<String> = attention.iter().map(|t| format!("#{}", t.id)).collect();
        println!(
            "{} {} open P4 ticket(s): {}",
            "attention:".red().bold(),
            attention.len(),
            ids.join(", ")
        );
    }
    println!(
        "\n{}",
        format!(
            "refreshing every 5s, last update {} (Ctrl-C to exit)",
            jiff::Zoned::now().strftime("%H:%M:%S")
        )
        .dimmed()
    );
}

fn render_detail(details: &TicketDetails) {
    clear_screen();
    print_details(details);
    println!("{}", "refreshing every 4s (Ctrl-C to exit)".dimmed());
}
