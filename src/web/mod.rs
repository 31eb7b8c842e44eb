//! Web server module
//!
//! Provides the JSON HTTP API of the SEO dashboard.

mod error;
mod extract;
pub mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use extract::JsonBody;
pub use routes::create_router;
pub use state::AppState;
