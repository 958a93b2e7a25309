//! HTTP API module for the billing engine.
//!
//! This module exposes a monthly billing run over JSON. Storage, auth and
//! export formatting live in the surrounding application.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::MonthlyBillingRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
