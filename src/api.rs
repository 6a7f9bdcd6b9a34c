//! HTTP client for the helpdesk REST API.
//!
//! Thin wrapper over a single `reqwest::Client`: every call is one request,
//! one attempt. Non-2xx responses become [`DeskError::Api`] carrying the
//! status code and the response body text; transport failures surface as
//! [`DeskError::Http`] and decode failures as [`DeskError::Json`]. Retry
//! policy belongs to
//! callers — the poller retries on its next tick, the operator re-runs a
//! failed command.

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{DeskError, Result};
use crate::types::{
    FaqArticle, FaqPayload, Message, NewMessage, NewTicket, OverviewMetrics, ReplySuggestions,
    SummaryResult, Ticket, TicketDetails, TicketStatus, TicketStatusUpdate,
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against an explicit base URL (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Build a client from the resolved console configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.api_url()?))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(DeskError::Api {
            status: status.as_u16(),
            body,
        })
    }

    /// Decode a checked response body. Going through the body text keeps
    /// decode failures as [`DeskError::Json`] instead of folding them into
    /// the transport variant.
    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let body = Self::check(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::parse(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::parse(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::parse(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    // Typed endpoints

    /// List tickets, optionally restricted server-side by status. The list
    /// views fetch the full collection and filter locally; the status query
    /// exists for scripting.
    pub async fn list_tickets(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>> {
        match status {
            Some(status) => self.get(&format!("/tickets?status={}", status)).await,
            None => self.get("/tickets").await,
        }
    }

    pub async fn get_ticket(&self, id: u64) -> Result<TicketDetails> {
        match self.get(&format!("/tickets/{}", id)).await {
            Err(DeskError::Api { status: 404, .. }) => {
                Err(DeskError::TicketNotFound(id.to_string()))
            }
            other => other,
        }
    }

    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket> {
        self.post("/tickets", ticket).await
    }

    pub async fn add_message(&self, ticket_id: u64, message: &NewMessage) -> Result<Message> {
        self.post(&format!("/tickets/{}/messages", ticket_id), message)
            .await
    }

    pub async fn update_ticket_status(
        &self,
        ticket_id: u64,
        update: &TicketStatusUpdate,
    ) -> Result<Ticket> {
        self.put(&format!("/tickets/{}/status", ticket_id), update)
            .await
    }

    pub async fn ticket_summary(&self, ticket_id: u64) -> Result<SummaryResult> {
        self.get(&format!("/tickets/{}/summary", ticket_id)).await
    }

    pub async fn reply_suggestions(&self, ticket_id: u64) -> Result<ReplySuggestions> {
        self.get(&format!("/tickets/{}/reply_suggestions", ticket_id))
            .await
    }

    pub async fn overview(&self) -> Result<OverviewMetrics> {
        self.get("/analytics/overview").await
    }

    pub async fn list_faq(&self) -> Result<Vec<FaqArticle>> {
        self.get("/faq").await
    }

    pub async fn create_faq(&self, article: &FaqPayload) -> Result<FaqArticle> {
        self.post("/faq", article).await
    }

    pub async fn update_faq(&self, id: u64, article: &FaqPayload) -> Result<FaqArticle> {
        self.put(&format!("/faq/{}", id), article).await
    }

    pub async fn delete_faq(&self, id: u64) -> Result<()> {
        self.delete(&format!("/faq/{}", id)).await
    }
}
