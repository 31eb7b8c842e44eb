//! HTTP networking module
//!
//! Provides the transport used by the provider and completion clients.

mod client;
mod request;

pub use client::HttpClient;
pub use request::{ApiRequest, ApiResponse, HttpMethod};
