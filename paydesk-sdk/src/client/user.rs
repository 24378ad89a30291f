//! User API client (purchase plugin → relay).

use compact_str::CompactString;
use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::user::{
    ConfirmPaymentRequest, CreateOrderRequest, CreateOrderResponse, OrderStatusResponse,
    QuoteRequest, SuccessResponse, VoucherResponse,
};

/// Typed HTTP client for the paydesk **User API**.
///
/// Covers the order lifecycle from the paying side: quote (when the relay
/// runs on vouchers), create, poll, and self-confirm.
#[derive(Debug, Clone)]
pub struct UserClient {
    http: Client,
    base_url: Url,
}

impl UserClient {
    /// Create a new `UserClient`.
    ///
    /// * `base_url` – root URL of the relay.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /api/quote` – obtain a signed tier voucher with its price.
    pub async fn quote(
        &self,
        tier: impl Into<CompactString>,
    ) -> Result<VoucherResponse, ClientError> {
        let url = self.base_url.join("/api/quote")?;
        let body = QuoteRequest { tier: tier.into() };

        let resp = self.http.post(url).json(&body).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/create-order` – create a new order.
    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, ClientError> {
        let url = self.base_url.join("/api/create-order")?;

        let resp = self.http.post(url).json(request).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/order-status?id=…` – poll order status.
    pub async fn order_status(&self, id: &str) -> Result<OrderStatusResponse, ClientError> {
        let url = self.base_url.join("/api/order-status")?;

        let resp = self.http.get(url).query(&[("id", id)]).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/confirm-payment` – self-report that payment was sent.
    pub async fn confirm_payment(
        &self,
        id: impl Into<CompactString>,
    ) -> Result<SuccessResponse, ClientError> {
        let url = self.base_url.join("/api/confirm-payment")?;
        let body = ConfirmPaymentRequest { id: id.into() };

        let resp = self.http.post(url).json(&body).send().await?;
        parse_response(resp).await
    }
}
