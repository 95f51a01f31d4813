//! Remote spreadsheet implementation of ReservationStore
//!
//! Talks to the Google Sheets v4 values API. The first row of the range
//! is the header `Group | Time Slot | Table`.
//!
//! `save` overwrites the range in a single update request. Rows left over
//! from a longer previous table are blanked in the same request, so a
//! rejected write leaves the previous table untouched.

mod auth;

pub use auth::{ServiceAccountKey, SheetsCredentials};

use auth::TokenSource;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use tablebook::domain::RESERVATION_COLUMNS;
use tablebook::{DomainError, Reservation, ReservationStore, TableNumber};

/// Sheets store configuration
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// API root, e.g. `https://sheets.googleapis.com`
    pub base_url: String,
    pub spreadsheet_id: String,
    /// A1 notation range holding the table, e.g. `Bookings!A:C`
    pub range: String,
    pub credentials: SheetsCredentials,
}

impl SheetsConfig {
    pub fn new(spreadsheet_id: impl Into<String>, credentials: SheetsCredentials) -> Self {
        Self {
            base_url: "https://sheets.googleapis.com".to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            range: "Bookings!A:C".to_string(),
            credentials,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeUpdate<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: Vec<Vec<Value>>,
}

pub struct SheetsStore {
    client: Client,
    tokens: TokenSource,
    base_url: String,
    spreadsheet_id: String,
    range: String,
}

impl SheetsStore {
    pub fn new(config: SheetsConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DomainError::persistence)?;

        Ok(Self {
            tokens: TokenSource::new(client.clone(), config.credentials),
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id,
            range: config.range,
        })
    }

    fn values_url(&self, suffix: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}{}",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(&self.range),
            suffix
        )
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        let token = self
            .tokens
            .access_token()
            .await
            .map_err(DomainError::persistence)?;

        let resp = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| DomainError::Persistence(format!("Sheets request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Persistence(format!(
                "Sheets API error {}: {}",
                status, body
            )));
        }

        Ok(resp)
    }

    async fn fetch_values(&self) -> Result<Vec<Vec<Value>>, DomainError> {
        let request = self.client.get(self.values_url("")).query(&[
            ("majorDimension", "ROWS"),
            ("valueRenderOption", "UNFORMATTED_VALUE"),
        ]);

        let range: ValueRange = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::Persistence(format!("Invalid Sheets response: {}", e)))?;

        Ok(range.values)
    }
}

#[async_trait]
impl ReservationStore for SheetsStore {
    async fn load(&self) -> Result<Vec<Reservation>, DomainError> {
        rows_to_reservations(&self.fetch_values().await?)
    }

    async fn save(&self, reservations: &[Reservation]) -> Result<(), DomainError> {
        let previous_rows = self.fetch_values().await?.len();

        let mut values = reservations_to_rows(reservations);
        if values.len() < previous_rows {
            let blank = vec![Value::String(String::new()); RESERVATION_COLUMNS.len()];
            values.resize(previous_rows, blank);
        }

        let update = ValueRangeUpdate {
            range: &self.range,
            major_dimension: "ROWS",
            values,
        };
        let write = self
            .client
            .put(self.values_url(""))
            .query(&[("valueInputOption", "RAW")])
            .json(&update);
        self.send(write).await?;

        tracing::debug!(
            count = reservations.len(),
            "Saved bookings to sheet {}",
            self.spreadsheet_id
        );
        Ok(())
    }
}

fn reservations_to_rows(reservations: &[Reservation]) -> Vec<Vec<Value>> {
    let header = RESERVATION_COLUMNS
        .iter()
        .map(|c| Value::String(c.to_string()))
        .collect();

    std::iter::once(header)
        .chain(reservations.iter().map(|r| {
            vec![
                Value::String(r.group.to_string()),
                Value::String(r.slot.label().to_string()),
                Value::from(r.table.get()),
            ]
        }))
        .collect()
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn rows_to_reservations(rows: &[Vec<Value>]) -> Result<Vec<Reservation>, DomainError> {
    let mut rows = rows.iter();

    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> = header.iter().map(cell_text).collect();
    if header != RESERVATION_COLUMNS {
        return Err(DomainError::Persistence(format!(
            "Unexpected sheet header: {:?}",
            header
        )));
    }

    rows.enumerate()
        .filter(|(_, row)| row.iter().any(|c| !cell_text(c).is_empty()))
        .map(|(i, row)| {
            let cell = |idx: usize| row.get(idx).map(cell_text).unwrap_or_default();
            let invalid = |e: DomainError| {
                DomainError::Persistence(format!("Invalid sheet row {}: {}", i + 2, e))
            };

            let table = match row.get(2) {
                Some(Value::Number(n)) => n
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| DomainError::Validation(format!("Invalid table: {}", n)))
                    .and_then(TableNumber::try_from),
                _ => cell(2).parse(),
            }
            .map_err(invalid)?;

            Ok(Reservation::new(
                cell(0).parse().map_err(invalid)?,
                cell(1).parse().map_err(invalid)?,
                table,
            ))
        })
        .collect()
}
