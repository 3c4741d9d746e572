//! Result types parsed from gateway responses.
//!
//! Every gateway endpoint answers with a JSON body whose `code` field
//! discriminates success (`0`) from rejection (anything else). Rejections
//! are surfaced as [`ApiError`] values rather than transport errors, so a
//! declined purchase and a dead network are never confused.

use crate::constants::SUCCESS_CODE;
use crate::entity::{ts, Payment};
use crate::error::{Result, TossPayError};
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Raw body of a successful create-purchase call.
///
/// The gateway returns only the token and the checkout page here; the
/// payment snapshot is fetched separately.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutResponse {
    pub pay_token: String,
    pub checkout_page: String,
}

/// Successful result of [`TossPayClient::purchase`](crate::TossPayClient::purchase).
#[derive(Debug, Clone)]
pub struct PurchaseResult {
    /// Gateway-issued identifier for the pending payment
    pub pay_token: String,
    /// Checkout page URL to redirect the payer to
    pub purchase_url: String,
    /// Snapshot of the freshly created payment (status `PAY_STANDBY`)
    pub payment: Payment,
}

/// Successful result of [`TossPayClient::approve`](crate::TossPayClient::approve).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedResult {
    /// When the gateway approved the payment
    #[serde(with = "ts")]
    pub approval_time: NaiveDateTime,
}

/// A rejection returned by the gateway.
///
/// Carries the typed fields every error body shares plus the raw response
/// JSON in `data` for anything endpoint-specific.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Status code reported inside the body (the HTTP status is usually 200)
    #[serde(default)]
    pub status: Option<i64>,
    /// Non-zero result code
    #[serde(default)]
    pub code: i64,
    /// Machine-readable error identifier, e.g. `COMMON_INVALID_PARAMETER`
    #[serde(default)]
    pub error_code: Option<String>,
    /// Human-readable message from the gateway
    #[serde(default)]
    pub msg: String,
    /// The full response body as received
    #[serde(skip)]
    pub data: Value,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl std::error::Error for ApiError {}

/// Outcome of one gateway call: either the typed success body or the
/// gateway's rejection.
#[derive(Debug, Clone)]
pub enum ApiResult<T> {
    Success(T),
    Failure(ApiError),
}

impl<T> ApiResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    /// Get the success value, discarding a failure.
    pub fn success(self) -> Option<T> {
        match self {
            ApiResult::Success(value) => Some(value),
            ApiResult::Failure(_) => None,
        }
    }

    /// Get the gateway rejection, discarding a success.
    pub fn failure(self) -> Option<ApiError> {
        match self {
            ApiResult::Success(_) => None,
            ApiResult::Failure(err) => Some(err),
        }
    }

    /// Convert into a standard `Result`, promoting the rejection to an error.
    pub fn into_result(self) -> std::result::Result<T, ApiError> {
        match self {
            ApiResult::Success(value) => Ok(value),
            ApiResult::Failure(err) => Err(err),
        }
    }
}

/// Parse a gateway response body into the two-way result.
///
/// # Errors
/// Returns an error if the body is not JSON or carries no `code` field;
/// a body that *is* a well-formed rejection parses as `Failure`, not `Err`.
pub(crate) fn parse_api_result<T: DeserializeOwned>(body: &str) -> Result<ApiResult<T>> {
    let value: Value = serde_json::from_str(body)?;
    let code = value
        .get("code")
        .and_then(Value::as_i64)
        .ok_or_else(|| TossPayError::unexpected_response(format!("missing result code: {body}")))?;

    if code == SUCCESS_CODE {
        Ok(ApiResult::Success(serde_json::from_value(value)?))
    } else {
        let mut err: ApiError = serde_json::from_value(value.clone())?;
        err.data = value;
        tracing::debug!(
            code,
            error_code = err.error_code.as_deref(),
            "gateway rejected request"
        );
        Ok(ApiResult::Failure(err))
    }
}
