//! ERP API layer for sending JSON payloads to configured endpoints.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Per-endpoint clients ([`ErpApi`], [`ErpSender`])
//! - Client construction by logical key ([`ApiFactory`])
//! - Normalized send results ([`RequestResult`], [`FailureKind`])
//!
//! # Failure Handling
//!
//! Only configuration errors ([`ApiError`]) are returned as `Err`. A
//! disabled endpoint, a failed connection, a non-200 status, and an
//! undecodable body all come back as a [`RequestResult`] whose `errors`
//! field describes the problem. The client never retries; the configured
//! attempts count is exposed through [`RequestOptions`] for callers that
//! queue and resend.

mod client;
mod erp;
mod error;
mod factory;
mod http;
mod options;
mod result;

#[cfg(test)]
mod http_tests;

pub use self::http::{HttpClient, HttpRequest, HttpResponse};
pub use client::ReqwestClient;
pub use erp::{ErpApi, ErpSender};
pub use error::{ApiError, HttpError, SendFailure};
pub use factory::ApiFactory;
pub use options::{EndpointSummary, RequestOptions};
pub use result::{FailureKind, RequestResult};
