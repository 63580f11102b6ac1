use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use pawcal_core::ReminderRequest;
use pawcal_schedule::{ReminderScheduleBuilder, ScheduleError};
use pawcal_storage::make_identifier;

use crate::page;
use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn internal(err: impl std::fmt::Display) -> ApiError {
    error!("request failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

// ── Health ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ── Reminder submission ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReminderForm {
    pub pet_name: String,
    pub product_name: String,
    /// ISO date, expected >= today (enforced by the form).
    pub start_date: NaiveDate,
    pub dose_count: u32,
    /// 24-hour "HH:MM"; absent or empty means an all-day schedule.
    pub time_of_day: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize)]
pub struct ReminderResponse {
    pub id: String,
    pub calendar_url: String,
    pub page_url: String,
}

pub async fn create_reminder(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ReminderForm>,
) -> Result<Json<ReminderResponse>, ApiError> {
    let time_of_day = parse_time_of_day(form.time_of_day.as_deref())?;

    let request = ReminderRequest {
        pet_name: form.pet_name.clone(),
        product_name: form.product_name.clone(),
        start_date: form.start_date,
        dose_count: form.dose_count,
        time_of_day,
        notes: form.notes.clone(),
    };

    let schedule = ReminderScheduleBuilder::build(request).map_err(|e| match e {
        ScheduleError::EmptyPetName => bad_request(e.to_string()),
        other => internal(other),
    })?;

    let seq = state.issuer.lock().await.issue_next().await;
    let id = make_identifier(seq, &form.pet_name, &form.product_name);

    let ics = state
        .serializer
        .serialize(&schedule.into_events())
        .map_err(internal)?;
    let calendar_url = state.artifacts.put_calendar(&id, ics).await.map_err(internal)?;

    let html = page::render(&page::PageContext {
        pet_name: form.pet_name.clone(),
        product_name: form.product_name.clone(),
        calendar_url: calendar_url.clone(),
        frequency: "Monthly".to_string(),
        time: form
            .time_of_day
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "All day".to_string()),
        duration: format!("{} occurrences", form.dose_count),
        notes: form.notes.filter(|n| !n.trim().is_empty()),
    })
    .map_err(internal)?;
    let page_url = state.artifacts.put_page(&id, html).await.map_err(internal)?;

    info!(%id, pet = %form.pet_name, "reminder schedule created");
    Ok(Json(ReminderResponse {
        id,
        calendar_url,
        page_url,
    }))
}

fn parse_time_of_day(text: Option<&str>) -> Result<Option<NaiveTime>, ApiError> {
    match text.filter(|s| !s.is_empty()) {
        Some(t) => NaiveTime::parse_from_str(t, "%H:%M")
            .map(Some)
            .map_err(|_| bad_request(format!("invalid time_of_day (expected HH:MM): {t}"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_parses_24h_clock() {
        assert_eq!(
            parse_time_of_day(Some("08:30")).unwrap(),
            NaiveTime::from_hms_opt(8, 30, 0)
        );
        assert_eq!(parse_time_of_day(Some("19:00")).unwrap(), NaiveTime::from_hms_opt(19, 0, 0));
        assert_eq!(parse_time_of_day(None).unwrap(), None);
        assert_eq!(parse_time_of_day(Some("")).unwrap(), None);
        assert!(parse_time_of_day(Some("8.30pm")).is_err());
        assert!(parse_time_of_day(Some("25:00")).is_err());
    }
}
