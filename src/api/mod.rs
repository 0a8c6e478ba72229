//! HTTP API module for the wage statement engine.
//!
//! This module exposes the calculation engine, the business-day resolver and
//! the statement exporter as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BusinessDaysQuery, ExportQuery, SalaryRequest};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, StatementFileNames, StatementResponse,
};
pub use state::AppState;
