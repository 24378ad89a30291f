//! Admin API client (operator dashboard → relay).
//!
//! All requests carry the shared admin secret, which the relay's transport
//! verifies before invoking the core.

use compact_str::CompactString;
use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::admin::{AdminOrderResponse, ConfirmOrderRequest, ConfirmOrderResponse};

/// Typed HTTP client for the paydesk **Admin API**.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    base_url: Url,
    admin_secret: String,
}

impl AdminClient {
    /// Create a new `AdminClient`.
    ///
    /// * `base_url` – root URL of the relay.
    /// * `admin_secret` – the shared operator secret.
    pub fn new(base_url: Url, admin_secret: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            admin_secret: admin_secret.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /api/pending-orders?adminSecret=…` – list orders awaiting
    /// operator confirmation, most recent first.
    pub async fn list_actionable(&self) -> Result<Vec<AdminOrderResponse>, ClientError> {
        let url = self.base_url.join("/api/pending-orders")?;

        let resp = self
            .http
            .get(url)
            .query(&[("adminSecret", self.admin_secret.as_str())])
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `POST /api/confirm-order` – mark an order completed.
    pub async fn confirm_order(
        &self,
        id: impl Into<CompactString>,
    ) -> Result<ConfirmOrderResponse, ClientError> {
        let url = self.base_url.join("/api/confirm-order")?;
        let body = ConfirmOrderRequest {
            id: id.into(),
            admin_secret: self.admin_secret.clone(),
        };

        let resp = self.http.post(url).json(&body).send().await?;
        parse_response(resp).await
    }
}
