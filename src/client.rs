//! High-level client for the Toss Pay gateway API.

use crate::config::Config;
use crate::entity::Payment;
use crate::error::Result;
use crate::http::HttpClient;
use crate::request::PurchaseRequest;
use crate::response::{self, ApiResult, ApprovedResult, CheckoutResponse, PurchaseResult};
use serde::Serialize;

/// Client for the three-call purchase flow: create a purchase, let the
/// payer authorize it on the checkout page, then approve it.
///
/// Each operation is one synchronous HTTP round-trip. Local validation
/// failures and transport problems come back as [`Err`]; a gateway
/// rejection comes back as [`ApiResult::Failure`] so callers can inspect
/// the gateway's status, code and message.
///
/// # Example
/// ```no_run
/// use tosspay::{ApiResult, PurchaseRequest, TossPayClient};
///
/// # fn main() -> tosspay::Result<()> {
/// let client = TossPayClient::development();
/// let request = PurchaseRequest::new("order-2024-0001", 40000, "Premium subscription");
///
/// match client.purchase(&request)? {
///     ApiResult::Success(result) => {
///         println!("redirect payer to {}", result.purchase_url);
///     }
///     ApiResult::Failure(err) => eprintln!("gateway rejected: {err}"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct TossPayClient {
    config: Config,
}

/// Wire body shared by the status and execute endpoints.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenBody<'a> {
    api_key: &'a str,
    pay_token: &'a str,
}

impl TossPayClient {
    /// Create a production client with the given merchant API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(Config::new(api_key))
    }

    /// Create a development client using the shared sandbox API key.
    pub fn development() -> Self {
        Self::with_config(Config::development())
    }

    /// Create a client with the provided configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create a purchase and return the checkout URL for the payer.
    ///
    /// The request is validated locally first; an invalid order number,
    /// an expiry beyond the one-hour maximum, or `auto_execute` without a
    /// `result_callback` fail without touching the network.
    ///
    /// On success the gateway answers with only the token and checkout
    /// page, so the payment snapshot is fetched right after and embedded
    /// in the result.
    pub fn purchase(&self, request: &PurchaseRequest) -> Result<ApiResult<PurchaseResult>> {
        request.validate()?;

        let body = serde_json::to_vec(&request.to_body(&self.config.api_key))?;
        let response = self.post("/payments", &body)?;

        let checkout = match response::parse_api_result::<CheckoutResponse>(&response)? {
            ApiResult::Success(checkout) => checkout,
            ApiResult::Failure(err) => return Ok(ApiResult::Failure(err)),
        };

        let payment = match self.get_payment(&checkout.pay_token)? {
            ApiResult::Success(payment) => payment,
            ApiResult::Failure(err) => return Ok(ApiResult::Failure(err)),
        };

        Ok(ApiResult::Success(PurchaseResult {
            pay_token: checkout.pay_token,
            purchase_url: checkout.checkout_page,
            payment,
        }))
    }

    /// Fetch the current state of a payment.
    pub fn get_payment(&self, pay_token: &str) -> Result<ApiResult<Payment>> {
        let body = serde_json::to_vec(&TokenBody {
            api_key: &self.config.api_key,
            pay_token,
        })?;
        let response = self.post("/status", &body)?;
        response::parse_api_result(&response)
    }

    /// Approve a payment the payer has authorized.
    ///
    /// The gateway rejects tokens whose payer has not completed checkout;
    /// that surfaces as [`ApiResult::Failure`] with the gateway's message.
    pub fn approve(&self, pay_token: &str) -> Result<ApiResult<ApprovedResult>> {
        let body = serde_json::to_vec(&TokenBody {
            api_key: &self.config.api_key,
            pay_token,
        })?;
        let response = self.post("/execute", &body)?;
        response::parse_api_result(&response)
    }

    fn post(&self, path: &str, body: &[u8]) -> Result<String> {
        let url = format!("{}{}", self.config.base_url(), path);
        tracing::debug!(%url, "posting gateway request");

        let mut http = HttpClient::new(self.config.timeout_secs)?;
        let response = http.post_json(&url, body)?;

        if response.status_code != 200 {
            // The gateway signals rejections in the body with HTTP 200;
            // anything else is infrastructure trouble worth surfacing.
            tracing::warn!(status_code = response.status_code, %url, "unexpected HTTP status");
        }

        response.body_string()
    }
}
