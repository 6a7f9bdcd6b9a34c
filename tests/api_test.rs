#[path = "common/mod.rs"]
mod common;

use common::{faq_json, ticket_details_json, ticket_json};
use serde_json::json;

use opsdesk::types::{
    AuthorType, Channel, Language, NewMessage, NewTicket, TicketPriority, TicketStatus,
    TicketStatusUpdate,
};
use opsdesk::{ApiClient, DeskError};

#[tokio::test]
async fn test_list_tickets() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/tickets")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                ticket_json(1, "new", "P4"),
                ticket_json(2, "closed", "P3"),
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let tickets = client.list_tickets(None).await.unwrap();

    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].id, 1);
    assert_eq!(tickets[0].status, TicketStatus::New);
    assert_eq!(tickets[0].priority, TicketPriority::P4);
    assert_eq!(tickets[1].status, TicketStatus::Closed);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_tickets_with_status_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/tickets?status=new")
        .with_status(200)
        .with_body(json!([ticket_json(1, "new", "P3")]).to_string())
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let tickets = client.list_tickets(Some(TicketStatus::New)).await.unwrap();

    assert_eq!(tickets.len(), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_ticket_with_thread() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/tickets/7")
        .with_status(200)
        .with_body(ticket_details_json(7).to_string())
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let details = client.get_ticket(7).await.unwrap();

    assert_eq!(details.ticket.id, 7);
    assert_eq!(details.messages.len(), 3);
    assert_eq!(details.messages[1].author_type, AuthorType::Ai);
    // Thread order is the server's chronological order
    let ids: Vec<u64> = details.messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_get_ticket_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/tickets/999")
        .with_status(404)
        .with_body(r#"{"detail": "Ticket not found"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let err = client.get_ticket(999).await.unwrap_err();

    assert!(matches!(err, DeskError::TicketNotFound(_)));
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/tickets")
        .with_status(500)
        .with_body("database exploded")
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let err = client.list_tickets(None).await.unwrap_err();

    match err {
        DeskError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database exploded");
        }
        other => panic!("expected Api error, got: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_json_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/tickets")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let err = client.list_tickets(None).await.unwrap_err();

    // A 2xx response with a bad body is a decode failure, not a
    // transport or API error
    assert!(matches!(err, DeskError::Json(_)), "got: {err}");
}

#[tokio::test]
async fn test_create_ticket_posts_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/tickets")
        .match_body(mockito::Matcher::PartialJson(json!({
            "subject": "No internet",
            "channel": "portal",
            "language": "ru"
        })))
        .with_status(201)
        .with_body(ticket_json(42, "new", "P3").to_string())
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let ticket = client
        .create_ticket(&NewTicket {
            subject: "No internet".to_string(),
            description: "Router lights are off".to_string(),
            channel: Channel::Portal,
            language: Language::Ru,
            customer_email: Some("a@b.kz".to_string()),
            customer_username: None,
        })
        .await
        .unwrap();

    assert_eq!(ticket.id, 42);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_failed_create_is_an_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/tickets")
        .with_status(422)
        .with_body(r#"{"detail": "subject required"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let err = client
        .create_ticket(&NewTicket {
            subject: String::new(),
            description: "x".to_string(),
            channel: Channel::Portal,
            language: Language::Ru,
            customer_email: None,
            customer_username: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DeskError::Api { status: 422, .. }));
}

#[tokio::test]
async fn test_add_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/tickets/7/messages")
        .match_body(mockito::Matcher::PartialJson(json!({
            "body": "On our way",
            "author_type": "agent"
        })))
        .with_status(201)
        .with_body(common::message_json(9, "agent", "On our way").to_string())
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let message = client
        .add_message(
            7,
            &NewMessage {
                body: "On our way".to_string(),
                author_type: AuthorType::Agent,
                language: Language::Ru,
            },
        )
        .await
        .unwrap();

    assert_eq!(message.id, 9);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_status_update_sends_only_set_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/tickets/7/status")
        .match_body(mockito::Matcher::Json(json!({ "status": "closed" })))
        .with_status(200)
        .with_body(ticket_json(7, "closed", "P3").to_string())
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let updated = client
        .update_ticket_status(
            7,
            &TicketStatusUpdate {
                status: TicketStatus::Closed,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, TicketStatus::Closed);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_overview_tolerates_missing_extended_counters() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/analytics/overview")
        .with_status(200)
        .with_body(
            json!({
                "total_tickets": 120,
                "new_today": 5,
                "auto_closed_percent": 37.5,
                "avg_first_response_minutes": 12.0,
                "classification_accuracy": null,
                "generated_at": "2025-11-03T12:00:00"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let metrics = client.overview().await.unwrap();

    assert_eq!(metrics.total_tickets, 120);
    assert_eq!(metrics.classification_accuracy, None);
    assert_eq!(metrics.p4_tickets, None);
}

#[tokio::test]
async fn test_faq_lifecycle_endpoints() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/faq")
        .with_status(200)
        .with_body(
            json!([faq_json(1, Some("problem:CONNECTION_WIFI")), faq_json(2, None)]).to_string(),
        )
        .create_async()
        .await;
    let delete_mock = server
        .mock("DELETE", "/faq/2")
        .with_status(204)
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let articles = client.list_faq().await.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(
        articles[0].category_code.as_deref(),
        Some("problem:CONNECTION_WIFI")
    );
    assert_eq!(articles[1].category_code, None);

    client.delete_faq(2).await.unwrap();
    delete_mock.assert_async().await;
}

#[tokio::test]
async fn test_ai_panel_endpoints() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/tickets/7/summary")
        .with_status(200)
        .with_body(json!({ "summary": "Customer lost connectivity." }).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/tickets/7/reply_suggestions")
        .with_status(200)
        .with_body(json!({ "suggestions": ["Restart the router", "Check cabling"] }).to_string())
        .create_async()
        .await;

    let client = ApiClient::new(server.url());
    let summary = client.ticket_summary(7).await.unwrap();
    let suggestions = client.reply_suggestions(7).await.unwrap();

    assert_eq!(summary.summary, "Customer lost connectivity.");
    assert_eq!(suggestions.suggestions.len(), 2);
}
