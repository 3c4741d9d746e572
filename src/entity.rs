//! Gateway-side payment entities.
//!
//! Everything here is an immutable snapshot parsed from a gateway response;
//! the client never mutates these values.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a payment as reported by the gateway.
///
/// The gateway occasionally introduces new statuses; those parse as
/// [`PayStatus::Unknown`] rather than failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayStatus {
    /// Created and waiting for the payer to authorize
    PayStandby,
    /// Authorized by the payer, waiting for approval
    PayApproved,
    /// Approval in progress
    PayProgress,
    /// Fully settled
    PayComplete,
    /// Cancelled before completion
    PayCancel,
    RefundProgress,
    RefundSuccess,
    SettlementComplete,
    /// Status not known to this library version
    #[serde(other)]
    Unknown,
}

impl PayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayStatus::PayStandby => "PAY_STANDBY",
            PayStatus::PayApproved => "PAY_APPROVED",
            PayStatus::PayProgress => "PAY_PROGRESS",
            PayStatus::PayComplete => "PAY_COMPLETE",
            PayStatus::PayCancel => "PAY_CANCEL",
            PayStatus::RefundProgress => "REFUND_PROGRESS",
            PayStatus::RefundSuccess => "REFUND_SUCCESS",
            PayStatus::SettlementComplete => "SETTLEMENT_COMPLETE",
            PayStatus::Unknown => "UNKNOWN",
        }
    }

    /// True while the payment is still waiting for the payer.
    pub fn is_standby(&self) -> bool {
        matches!(self, PayStatus::PayStandby)
    }
}

impl fmt::Display for PayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A payment record held on the gateway side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Gateway-issued identifier for this payment
    pub pay_token: String,
    /// Merchant order number the payment was created with
    #[serde(default)]
    pub order_no: Option<String>,
    pub pay_status: PayStatus,
    /// Payment method chosen by the payer (absent before authorization)
    #[serde(default)]
    pub pay_method: Option<String>,
    /// Total amount in KRW
    pub amount: i64,
    #[serde(default)]
    pub amount_tax_free: Option<i64>,
    pub product_desc: String,
    #[serde(default, with = "ts_opt", skip_serializing_if = "Option::is_none")]
    pub created_ts: Option<NaiveDateTime>,
    #[serde(default, with = "ts_opt", skip_serializing_if = "Option::is_none")]
    pub paid_ts: Option<NaiveDateTime>,
}

/// Serde adapter for the gateway's `yyyy-MM-dd HH:mm:ss` timestamps.
pub(crate) mod ts {
    use crate::constants::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}

/// Like [`ts`] but tolerant of absent or null fields.
pub(crate) mod ts_opt {
    use crate::constants::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        dt: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => serializer.serialize_str(&dt.format(TIMESTAMP_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT)
                .map(Some)
                .map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}
