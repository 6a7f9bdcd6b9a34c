use owo_colors::OwoColorize;

use crate::api::ApiClient;
use crate::display::{format_minutes, format_timestamp};
use crate::error::Result;
use crate::types::OverviewMetrics;

/// Print the analytics overview
pub async fn cmd_dashboard(client: &ApiClient, json: bool) -> Result<()> {
    if json {
        // Pass the payload through untyped so counters the typed model
        // does not know about still come out
        let raw: serde_json::Value = client.get("/analytics/overview").await?;
        println!("{}", serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let metrics = client.overview().await?;
    print_metrics(&metrics);
    Ok(())
}

fn print_metrics(m: &OverviewMetrics) {
    println!("{}", "Helpdesk overview".bold().underline());
    println!("total tickets:        {}", m.total_tickets);
    println!("new today:            {}", m.new_today);
    println!("auto-closed by AI:    {:.1}%", m.auto_closed_percent);
    println!(
        "avg first response:   {}",
        format_minutes(m.avg_first_response_minutes)
    );
    if let Some(accuracy) = m.classification_accuracy {
        println!("classification:       {:.1}%", accuracy);
    }

    if let Some(in_progress) = m.in_progress_tickets {
        println!("\nin progress:          {}", in_progress);
    }

    let by_type: Vec<(&str, Option<u64>)> = vec![
        ("problem", m.problem_tickets),
        ("question", m.question_tickets),
        ("feedback", m.feedback_tickets),
        ("career", m.career_tickets),
        ("partner", m.partner_tickets),
        ("other", m.other_tickets),
    ];
    if by_type.iter().any(|(_, v)| v.is_some()) {
        println!("\n{}", "By request type".bold());
        for (label, value) in by_type {
            if let Some(value) = value {
                println!("  {:<10} {}", label, value);
            }
        }
    }

    let by_priority: Vec<(&str, Option<u64>)> = vec![
        ("P1", m.p1_tickets),
        ("P2", m.p2_tickets),
        ("P3", m.p3_tickets),
        ("P4", m.p4_tickets),
    ];
    if by_priority.iter().any(|(_, v)| v.is_some()) {
        println!("\n{}", "By priority".bold());
        for (label, value) in by_priority {
            if let Some(value) = value {
                println!("  {:<10} {}", label, value);
            }
        }
    }

    if m.open_sla_ok_tickets.is_some() || m.open_sla_breached_tickets.is_some() {
        println!("\n{}", "Open tickets vs SLA".bold());
        if let Some(ok) = m.open_sla_ok_tickets {
            println!("  {:<10} {}", "on time", ok.to_string().green());
        }
        if let Some(breached) = m.open_sla_breached_tickets {
            println!("  {:<10} {}", "breached", breached.to_string().red());
        }
    }

    println!("\ngenerated at {}", format_timestamp(&m.generated_at));
}
