//! Sheets API credentials
//!
//! Service-account keys are exchanged for short-lived access tokens with
//! the OAuth 2.0 JWT bearer grant. Tokens are cached until shortly
//! before they expire.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::sync::Mutex;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_TTL_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;
const REDACTED: &str = "<redacted>";

#[derive(Debug, Error)]
pub enum SheetsAuthError {
    #[error("Failed to read service account key: {0}")]
    KeyFile(String),

    #[error("Failed to sign token request: {0}")]
    Signing(String),

    #[error("Token exchange failed: {0}")]
    Exchange(String),
}

/// Service account key file (the JSON downloaded from the cloud console)
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, SheetsAuthError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SheetsAuthError::KeyFile(format!("{:?}: {}", path, e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, SheetsAuthError> {
        serde_json::from_str(content).map_err(|e| SheetsAuthError::KeyFile(e.to_string()))
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &REDACTED)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

/// How the store authenticates against the Sheets API
#[derive(Clone)]
pub enum SheetsCredentials {
    ServiceAccount(ServiceAccountKey),
    /// Pre-issued bearer token, used as-is
    AccessToken(String),
}

impl std::fmt::Debug for SheetsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsCredentials::ServiceAccount(key) => {
                f.debug_tuple("ServiceAccount").field(key).finish()
            }
            SheetsCredentials::AccessToken(_) => {
                f.debug_tuple("AccessToken").field(&REDACTED).finish()
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_TTL_SECS
}

struct CachedToken {
    token: String,
    refresh_at: DateTime<Utc>,
}

/// Access token provider with caching
pub struct TokenSource {
    client: Client,
    credentials: SheetsCredentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    pub fn new(client: Client, credentials: SheetsCredentials) -> Self {
        Self {
            client,
            credentials,
            cached: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String, SheetsAuthError> {
        let key = match &self.credentials {
            SheetsCredentials::AccessToken(token) => return Ok(token.clone()),
            SheetsCredentials::ServiceAccount(key) => key,
        };

        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Utc::now() < token.refresh_at {
                return Ok(token.token.clone());
            }
        }

        let response = self.exchange(key).await?;
        let refresh_at =
            Utc::now() + Duration::seconds((response.expires_in - REFRESH_MARGIN_SECS).max(0));
        tracing::debug!("Obtained Sheets access token for {}", key.client_email);

        *cached = Some(CachedToken {
            token: response.access_token.clone(),
            refresh_at,
        });

        Ok(response.access_token)
    }

    async fn exchange(&self, key: &ServiceAccountKey) -> Result<TokenResponse, SheetsAuthError> {
        let assertion = sign_assertion(key, Utc::now())?;

        let resp = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| SheetsAuthError::Exchange(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsAuthError::Exchange(format!("{}: {}", status, body)));
        }

        resp.json::<TokenResponse>()
            .await
            .map_err(|e| SheetsAuthError::Exchange(e.to_string()))
    }
}

fn sign_assertion(key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String, SheetsAuthError> {
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| SheetsAuthError::Signing(e.to_string()))?;

    let claims = AssertionClaims {
        iss: &key.client_email,
        scope: SHEETS_SCOPE,
        aud: &key.token_uri,
        iat: now.timestamp(),
        exp: now.timestamp() + ASSERTION_TTL_SECS,
    };

    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| SheetsAuthError::Signing(e.to_string()))
}
