//! tosspay - client library for the Toss Pay v1 payment gateway API
//!
//! This library covers the gateway's three-call purchase flow: create a
//! purchase, redirect the payer to the checkout page to authorize it, then
//! approve (execute) the payment. Requests are validated locally before any
//! network call; gateway rejections come back as typed [`ApiError`] values
//! instead of transport errors.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod client;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod permissions;
pub mod request;
pub mod response;

mod http;

pub use client::TossPayClient;
pub use config::{Config, ConfigBuilder, Environment};
pub use entity::{PayStatus, Payment};
pub use error::{Result, TossPayError};
pub use request::PurchaseRequest;
pub use response::{ApiError, ApiResult, ApprovedResult, PurchaseResult};
