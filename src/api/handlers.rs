//! HTTP request handlers for the wage statement API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::BTreeSet;
use std::time::Instant;

use axum::{
    Json, Router,
    body::Body,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_salary_with_trace, reconciles};
use crate::calendar::{HolidayCalendar, resolve_business_days};
use crate::error::EngineError;
use crate::export::{
    ExportFormat, SharePayload, StatementDocument, export_statement, statement_file_name,
};
use crate::models::{
    AuditTrace, AuditWarning, SalaryCalculation, SalaryInput, WarningSeverity, WorkPeriod,
};

use super::request::{BusinessDaysQuery, ExportQuery, SalaryRequest};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, StatementFileNames, StatementResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/business-days", get(business_days_handler))
        .route("/statement", post(statement_handler))
        .route("/statement/export", post(export_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a salary request and returns the statement record with its audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };
    let selected_dates = request.selected_dates.clone().unwrap_or_default();
    let input = match SalaryInput::try_from(request) {
        Ok(input) => input,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Request rejected");
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    match calculate_salary_with_trace(&input, state.config().rules()) {
        Ok(mut traced) => {
            let duration = start_time.elapsed();
            traced
                .warnings
                .extend(selected_holiday_warnings(&selected_dates, state.config().calendar()));
            info!(
                correlation_id = %correlation_id,
                period = %format!("{:04}-{:02}", traced.calculation.year, traced.calculation.month),
                total_salary = %traced.calculation.total_salary,
                net_payment = %traced.calculation.net_payment,
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            let response = CalculationResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                calculation: traced.calculation,
                audit_trace: AuditTrace {
                    steps: traced.steps,
                    warnings: traced.warnings,
                    duration_us: duration.as_micros() as u64,
                },
            };
            json_response(StatusCode::OK, &response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /business-days endpoint.
///
/// Returns the business days of a month against the configured holiday calendar.
async fn business_days_handler(
    State(state): State<AppState>,
    query: Result<Query<BusinessDaysQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Invalid business-days query");
            return error_response(ApiErrorResponse::bad_request(ApiError::with_details(
                "INVALID_INPUT",
                "year and month query parameters are required",
                rejection.body_text(),
            )));
        }
    };

    let config = state.config();
    let resolution = WorkPeriod::new(query.year, query.month)
        .and_then(|period| resolve_business_days(&period, config.calendar(), config.rules(), 1));

    match resolution {
        Ok(resolution) => json_response(StatusCode::OK, &resolution),
        Err(err) => {
            warn!(
                year = query.year,
                month = query.month,
                error = %err,
                "Business day lookup failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /statement endpoint.
///
/// Builds the formatted statement, file names and share payload for a calculation.
async fn statement_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryCalculation>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();

    let calc = match payload {
        Ok(Json(calc)) => calc,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match build_statement(&calc, &state) {
        Ok(statement) => {
            info!(
                correlation_id = %correlation_id,
                title = %statement.document.title,
                "Statement built"
            );
            json_response(StatusCode::OK, &statement)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Statement build failed");
            error_response(err.into())
        }
    }
}

/// Handler for POST /statement/export endpoint.
///
/// Renders a calculation with the renderer registered for the requested format.
async fn export_handler(
    State(state): State<AppState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
    payload: Result<Json<SalaryCalculation>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();

    let format = match query {
        Ok(Query(query)) => query.format.parse::<ExportFormat>(),
        Err(rejection) => Err(EngineError::invalid_input("format", rejection.body_text())),
    };
    let format = match format {
        Ok(format) => format,
        Err(err) => return error_response(err.into()),
    };

    let calc = match payload {
        Ok(Json(calc)) => calc,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };
    if let Err(err) = ensure_reconciled(&calc) {
        return error_response(err.into());
    }

    let renderer = match state.renderers().get(format) {
        Ok(renderer) => renderer,
        Err(err) => {
            warn!(correlation_id = %correlation_id, format = %format, "No renderer registered");
            let mut response: ApiErrorResponse = err.into();
            response.status = StatusCode::NOT_IMPLEMENTED;
            return error_response(response);
        }
    };

    match export_statement(&calc, state.config().rules(), renderer.as_ref()) {
        Ok(rendered) => {
            info!(
                correlation_id = %correlation_id,
                file_name = %rendered.file_name,
                bytes = rendered.bytes.len(),
                "Statement export completed"
            );
            let disposition = HeaderValue::from_str(&content_disposition(
                &rendered.file_name,
                rendered.format,
            ))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static(rendered.format.media_type())),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                Body::from(rendered.bytes),
            )
                .into_response()
        }
        Err(err) => error_response(err.into()),
    }
}

/// Builds the statement response for a calculation.
fn build_statement(
    calc: &SalaryCalculation,
    state: &AppState,
) -> Result<StatementResponse, EngineError> {
    ensure_reconciled(calc)?;
    Ok(StatementResponse {
        document: StatementDocument::from_calculation(calc, state.config().rules())?,
        file_names: StatementFileNames {
            png: statement_file_name(calc, ExportFormat::Png)?,
            pdf: statement_file_name(calc, ExportFormat::Pdf)?,
        },
        share: SharePayload::for_calculation(calc)?,
    })
}

/// Flags selected dates that are public holidays.
fn selected_holiday_warnings(
    dates: &[NaiveDate],
    calendar: &HolidayCalendar,
) -> Vec<AuditWarning> {
    let holidays: BTreeSet<NaiveDate> = dates
        .iter()
        .copied()
        .filter(|date| calendar.is_holiday(*date))
        .collect();
    holidays
        .into_iter()
        .map(|date| {
            AuditWarning::new(
                "HOLIDAY_SELECTED",
                format!("{} is a public holiday and was counted as a work day", date),
                WarningSeverity::Low,
            )
        })
        .collect()
}

/// Rejects a posted calculation whose amounts do not add up.
fn ensure_reconciled(calc: &SalaryCalculation) -> Result<(), EngineError> {
    if reconciles(calc) {
        Ok(())
    } else {
        Err(EngineError::invalid_input(
            "calculation",
            "total, deduction and net payment do not reconcile",
        ))
    }
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse::bad_request(error))
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, &error.error)
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name.
fn content_disposition(file_name: &str, format: ExportFormat) -> String {
    format!(
        "attachment; filename=\"statement.{}\"; filename*=UTF-8''{}",
        format.extension(),
        percent_encode_rfc5987(file_name)
    )
}

fn percent_encode_rfc5987(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        let keep = byte.is_ascii_alphanumeric()
            || matches!(
                byte,
                b'!' | b'#' | b'$' | b'&' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
            );
        if keep {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Holiday;

    #[test]
    fn test_percent_encode_keeps_attr_chars() {
        assert_eq!(percent_encode_rfc5987("a_b-1.png"), "a_b-1.png");
        assert_eq!(percent_encode_rfc5987("a b"), "a%20b");
    }

    #[test]
    fn test_percent_encode_utf8() {
        // 홍 is U+D64D, ED 99 8D in UTF-8
        assert_eq!(percent_encode_rfc5987("홍"), "%ED%99%8D");
    }

    #[test]
    fn test_selected_holidays_are_flagged_once() {
        let mut calendar = HolidayCalendar::new();
        calendar
            .insert_year(
                2025,
                vec![Holiday {
                    date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                    name: "신정".to_string(),
                }],
            )
            .unwrap();
        let new_year = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let workday = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();

        let warnings = selected_holiday_warnings(&[new_year, workday, new_year], &calendar);

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "HOLIDAY_SELECTED");
        assert!(warnings[0].message.contains("2025-01-01"));
    }

    #[test]
    fn test_selected_dates_in_uncovered_year_are_not_flagged() {
        let date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(selected_holiday_warnings(&[date], &HolidayCalendar::new()).is_empty());
    }

    #[test]
    fn test_content_disposition() {
        let value = content_disposition("홍_2025년02월.pdf", ExportFormat::Pdf);
        assert!(value.starts_with("attachment; filename=\"statement.pdf\"; filename*=UTF-8''"));
        assert!(value.is_ascii());
    }
}
