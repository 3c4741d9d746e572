//! Purchase request construction and pre-flight validation.

use crate::constants::{MAX_EXPIRED_TIME, TIMESTAMP_FORMAT};
use crate::error::{Result, TossPayError};
use serde::Serialize;
use std::time::Duration;

/// Parameters for creating a purchase.
///
/// Only the order number, amount and product description are required;
/// everything else has the gateway's defaults.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tosspay::PurchaseRequest;
///
/// let request = PurchaseRequest::new("order-2024-0001", 40000, "Premium subscription")
///     .auto_execute(true)
///     .result_callback("https://merchant.example/callback")
///     .expired_time(Duration::from_secs(30 * 60));
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PurchaseRequest {
    order_no: String,
    amount: i64,
    amount_tax_free: i64,
    product_desc: String,
    product_item: Option<String>,
    auto_execute: bool,
    result_callback: Option<String>,
    expired_time: Option<Duration>,
    cash_receipt: bool,
    ret_url: Option<String>,
    ret_cancel_url: Option<String>,
}

impl PurchaseRequest {
    pub fn new(order_no: impl Into<String>, amount: i64, product_desc: impl Into<String>) -> Self {
        Self {
            order_no: order_no.into(),
            amount,
            amount_tax_free: 0,
            product_desc: product_desc.into(),
            product_item: None,
            auto_execute: false,
            result_callback: None,
            expired_time: None,
            cash_receipt: true,
            ret_url: None,
            ret_cancel_url: None,
        }
    }

    /// Tax-free portion of the amount (defaults to 0).
    #[must_use]
    pub fn amount_tax_free(mut self, amount: i64) -> Self {
        self.amount_tax_free = amount;
        self
    }

    /// Itemized product description shown on the checkout page.
    #[must_use]
    pub fn product_item(mut self, item: impl Into<String>) -> Self {
        self.product_item = Some(item.into());
        self
    }

    /// Approve automatically once the payer authorizes.
    ///
    /// Requires a [`result_callback`](Self::result_callback) so the gateway
    /// can deliver the outcome; [`validate`](Self::validate) rejects the
    /// combination otherwise.
    #[must_use]
    pub fn auto_execute(mut self, auto_execute: bool) -> Self {
        self.auto_execute = auto_execute;
        self
    }

    /// Callback URL the gateway notifies with the payment result.
    #[must_use]
    pub fn result_callback(mut self, url: impl Into<String>) -> Self {
        self.result_callback = Some(url.into());
        self
    }

    /// How long the payer has to authorize, at most one hour.
    #[must_use]
    pub fn expired_time(mut self, expiry: Duration) -> Self {
        self.expired_time = Some(expiry);
        self
    }

    /// Whether the gateway should issue a cash receipt (defaults to true).
    #[must_use]
    pub fn cash_receipt(mut self, cash_receipt: bool) -> Self {
        self.cash_receipt = cash_receipt;
        self
    }

    /// URL the payer returns to after completing checkout.
    #[must_use]
    pub fn ret_url(mut self, url: impl Into<String>) -> Self {
        self.ret_url = Some(url.into());
        self
    }

    /// URL the payer returns to after cancelling checkout.
    #[must_use]
    pub fn ret_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.ret_cancel_url = Some(url.into());
        self
    }

    pub fn order_no(&self) -> &str {
        &self.order_no
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Check the request against the gateway's documented constraints.
    ///
    /// Runs before any network call, so a rejected request never reaches
    /// the gateway.
    ///
    /// # Errors
    /// - [`TossPayError::InvalidOrderNo`] if the order number contains `&`
    /// - [`TossPayError::ExpiredTimeTooLong`] if the expiry exceeds one hour
    /// - [`TossPayError::NotAutoExecutable`] if `auto_execute` is set
    ///   without a `result_callback`
    pub fn validate(&self) -> Result<()> {
        if self.order_no.contains('&') {
            return Err(TossPayError::InvalidOrderNo(self.order_no.clone()));
        }

        if let Some(expiry) = self.expired_time {
            if expiry > MAX_EXPIRED_TIME {
                return Err(TossPayError::ExpiredTimeTooLong {
                    requested: expiry.as_secs(),
                    max: MAX_EXPIRED_TIME.as_secs(),
                });
            }
        }

        if self.auto_execute && self.result_callback.is_none() {
            return Err(TossPayError::NotAutoExecutable);
        }

        Ok(())
    }

    /// Build the wire body for the create-purchase endpoint.
    ///
    /// The relative expiry is turned into the absolute deadline the gateway
    /// expects, stamped at call time.
    pub(crate) fn to_body<'a>(&'a self, api_key: &'a str) -> CreatePaymentBody<'a> {
        let expired_time = self.expired_time.map(|expiry| {
            let deadline = chrono::Local::now().naive_local()
                + chrono::Duration::seconds(expiry.as_secs() as i64);
            deadline.format(TIMESTAMP_FORMAT).to_string()
        });

        CreatePaymentBody {
            api_key,
            order_no: &self.order_no,
            amount: self.amount,
            amount_tax_free: self.amount_tax_free,
            product_desc: &self.product_desc,
            product_item: self.product_item.as_deref(),
            auto_execute: self.auto_execute,
            result_callback: self.result_callback.as_deref(),
            expired_time,
            cash_receipt: self.cash_receipt,
            ret_url: self.ret_url.as_deref(),
            ret_cancel_url: self.ret_cancel_url.as_deref(),
        }
    }
}

/// Wire shape of the create-purchase body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePaymentBody<'a> {
    api_key: &'a str,
    order_no: &'a str,
    amount: i64,
    amount_tax_free: i64,
    product_desc: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_item: Option<&'a str>,
    auto_execute: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result_callback: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expired_time: Option<String>,
    cash_receipt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    ret_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ret_cancel_url: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_no_with_ampersand_rejected() {
        let request = PurchaseRequest::new("order-1&", 40000, "test");
        assert!(matches!(
            request.validate(),
            Err(TossPayError::InvalidOrderNo(_))
        ));
    }

    #[test]
    fn test_expiry_over_one_hour_rejected() {
        let request = PurchaseRequest::new("order-1", 40000, "test")
            .expired_time(Duration::from_secs(61 * 60));
        assert!(matches!(
            request.validate(),
            Err(TossPayError::ExpiredTimeTooLong {
                requested: 3660,
                max: 3600
            })
        ));
    }

    #[test]
    fn test_expiry_of_exactly_one_hour_allowed() {
        let request = PurchaseRequest::new("order-1", 40000, "test")
            .expired_time(Duration::from_secs(60 * 60));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_auto_execute_requires_callback() {
        let request = PurchaseRequest::new("order-1", 40000, "test").auto_execute(true);
        assert!(matches!(
            request.validate(),
            Err(TossPayError::NotAutoExecutable)
        ));

        let request = PurchaseRequest::new("order-1", 40000, "test")
            .auto_execute(true)
            .result_callback("https://merchant.example/callback");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_body_serialization() {
        let request = PurchaseRequest::new("order-1", 40000, "test")
            .product_item("subscription")
            .cash_receipt(false);

        let body = serde_json::to_value(request.to_body("sk_test_key")).expect("should serialize");
        assert_eq!(body["apiKey"], "sk_test_key");
        assert_eq!(body["orderNo"], "order-1");
        assert_eq!(body["amount"], 40000);
        assert_eq!(body["amountTaxFree"], 0);
        assert_eq!(body["productDesc"], "test");
        assert_eq!(body["productItem"], "subscription");
        assert_eq!(body["autoExecute"], false);
        assert_eq!(body["cashReceipt"], false);
        // Unset optionals stay off the wire entirely
        assert!(body.get("resultCallback").is_none());
        assert!(body.get("expiredTime").is_none());
        assert!(body.get("retUrl").is_none());
    }

    #[test]
    fn test_body_includes_absolute_expiry() {
        let request =
            PurchaseRequest::new("order-1", 40000, "test").expired_time(Duration::from_secs(600));

        let body = serde_json::to_value(request.to_body("key")).expect("should serialize");
        let expired = body["expiredTime"].as_str().expect("should be a string");
        // yyyy-MM-dd HH:mm:ss
        assert_eq!(expired.len(), 19);
        assert_eq!(&expired[4..5], "-");
        assert_eq!(&expired[10..11], " ");
    }
}
