//! SEO Dashboard API: a JSON backend for keyword research, domain analytics,
//! competitor analysis and SERP lookups.
//!
//! Requests are validated, mapped onto DataForSEO v3 tasks and relayed to the
//! provider; the provider's JSON is passed back largely unmodified. Keyword
//! ideas can additionally be generated by a chat-completion service.

pub mod completion;
pub mod config;
pub mod network;
pub mod provider;
pub mod web;

pub use config::Settings;
pub use provider::{ClientError, Credentials, ProviderClient, QueryOptions};
pub use web::{create_router, AppState};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
