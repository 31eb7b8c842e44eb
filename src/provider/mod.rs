//! Search-data provider integration
//!
//! Authentication, the generic request primitive and the named operations of
//! the DataForSEO v3 REST API.

mod client;
mod credentials;
mod error;
pub mod operations;

pub use client::{ConnectionStatus, ProviderClient};
pub use credentials::Credentials;
pub use error::ClientError;
pub use operations::QueryOptions;
