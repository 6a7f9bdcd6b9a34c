//! Shared fixtures for the API integration tests.

use serde_json::{Value, json};

/// Minimal ticket payload as the backend serves it
pub fn ticket_json(id: u64, status: &str, priority: &str) -> Value {
    json!({
        "id": id,
        "subject": format!("Ticket {}", id),
        "description": "Internet down since morning",
        "channel": "telegram",
        "language": "ru",
        "customer_email": format!("user{}@example.com", id),
        "customer_username": null,
        "request_type": "problem",
        "category_code": "problem:CONNECTION_WIFI",
        "priority": priority,
        "status": status,
        "department_code": "technical_support",
        "department_name": "Техническая поддержка",
        "auto_closed_by_ai": false,
        "ai_disabled": false,
        "created_at": "2025-11-03T10:00:00",
        "updated_at": "2025-11-03T11:30:00",
        "closed_at": null,
        "sla_target_minutes": 240.0,
        "sla_elapsed_minutes": 90.0,
        "sla_breached": false,
        "status_elapsed_minutes": 90.0
    })
}

pub fn message_json(id: u64, author: &str, body: &str) -> Value {
    json!({
        "id": id,
        "author_type": author,
        "body": body,
        "language": "ru",
        "created_at": "2025-11-03T10:05:00"
    })
}

pub fn ticket_details_json(id: u64) -> Value {
    let mut details = ticket_json(id, "in_progress", "P2");
    details["messages"] = json!([
        message_json(1, "customer", "Ничего не работает"),
        message_json(2, "ai", "Проверьте кабель"),
        message_json(3, "agent", "Направили инженера"),
    ]);
    details
}

pub fn faq_json(id: u64, category_code: Option<&str>) -> Value {
    json!({
        "id": id,
        "question": "Как поменять тариф?",
        "answer": "В личном кабинете, раздел тарифы.",
        "language": "ru",
        "category_code": category_code,
        "auto_resolvable": true
    })
}
