//! Tablebook API Client

use anyhow::{bail, Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// API Client for the Tablebook server
pub struct TablebookClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub open: bool,
    pub today: String,
    pub open_date: String,
    pub storage: String,
}

#[derive(Debug, Deserialize)]
pub struct SlotInfo {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    pub groups: Vec<String>,
    pub slots: Vec<SlotInfo>,
    pub max_tables: u8,
    pub max_booking_per_group: usize,
}

#[derive(Debug, Deserialize)]
pub struct BookingResponse {
    pub group: String,
    pub slot: String,
    pub slot_key: String,
    pub table: u8,
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct CancellationResponse {
    pub cancelled: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityResponse {
    pub slot: String,
    pub available: Vec<u8>,
    pub booked: Vec<u8>,
}

#[derive(Debug, Deserialize)]
pub struct GroupSummary {
    pub group: String,
    pub total_bookings: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Debug, Serialize)]
pub struct BookingRequest<'a> {
    pub group: &'a str,
    pub slot: &'a str,
    pub table: u8,
}

impl TablebookClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let resp = request
            .send()
            .await
            .context("Failed to connect to Tablebook API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => bail!("{}", err.message),
                Err(_) => bail!("API error ({}): {}", status, body),
            }
        }

        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.client.get(self.url(path)))
            .await?
            .json()
            .await
            .context("Failed to parse response")
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    pub async fn status(&self) -> Result<StatusResponse> {
        self.get_json("/tablebook/status").await
    }

    pub async fn catalog(&self) -> Result<CatalogResponse> {
        self.get_json("/tablebook/catalog").await
    }

    pub async fn availability(&self, slot: &str) -> Result<AvailabilityResponse> {
        let path = format!(
            "/tablebook/slots/{}/availability",
            urlencoding::encode(slot)
        );
        self.get_json(&path).await
    }

    /// All bookings, or only `group`'s when given
    pub async fn bookings(&self, group: Option<&str>) -> Result<Vec<BookingResponse>> {
        let mut request = self.client.get(self.url("/tablebook/bookings"));
        if let Some(group) = group {
            request = request.query(&[("group", group)]);
        }
        self.send(request)
            .await?
            .json()
            .await
            .context("Failed to parse response")
    }

    pub async fn summary(&self) -> Result<Vec<GroupSummary>> {
        self.get_json("/tablebook/summary").await
    }

    pub async fn book(&self, group: &str, slot: &str, table: u8) -> Result<BookingResponse> {
        let request = self
            .client
            .post(self.url("/tablebook/bookings"))
            .json(&BookingRequest { group, slot, table });

        self.send(request)
            .await?
            .json()
            .await
            .context("Failed to parse response")
    }

    pub async fn cancel(&self, group: &str, slot: &str, table: u8) -> Result<CancellationResponse> {
        let request = self
            .client
            .post(self.url("/tablebook/bookings/cancel"))
            .json(&BookingRequest { group, slot, table });

        self.send(request)
            .await?
            .json()
            .await
            .context("Failed to parse response")
    }

    /// Raw CSV export
    pub async fn export(&self) -> Result<Vec<u8>> {
        let bytes = self
            .send(self.client.get(self.url("/tablebook/export")))
            .await?
            .bytes()
            .await
            .context("Failed to read export")?;
        Ok(bytes.to_vec())
    }
}
