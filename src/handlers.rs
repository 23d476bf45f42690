use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;
use crate::calendar::{CalendarDays, DayIndicator};
use crate::dates::DayKey;
use crate::error::ApiError;
use crate::models::{Availability, ClassDetails, Event, EventOccurrence, OccurrenceStatus};
use crate::selection::EventSelection;
use crate::validation::{parse_day, validate_limit};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventsQuery {
    /// Number of events per listing (1-50).
    pub limit: Option<u8>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OccurrencesQuery {
    /// Occurrence to select when present in the list.
    pub event_id: Option<String>,
    /// Occurrence the client currently shows; kept while it is still listed.
    pub selected: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    /// Day picked in the calendar, `YYYY-MM-DD`.
    pub date: Option<String>,
    pub event_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventListings {
    pub featured: Vec<Event>,
    pub upcoming: Vec<Event>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OccurrenceView {
    pub occurrence: EventOccurrence,
    pub status: Option<OccurrenceStatus>,
    pub availability: Option<Availability>,
    pub is_bookable: bool,
    pub duration: Option<String>,
    pub is_selected: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OccurrencesResponse {
    pub class_id: String,
    pub occurrences: Vec<OccurrenceView>,
    pub selected: Option<EventOccurrence>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarResponse {
    pub class_id: String,
    pub total: usize,
    pub days: Vec<DayIndicator>,
    pub date: Option<String>,
    pub events_on_date: Vec<EventOccurrence>,
    pub selected: Option<EventOccurrence>,
}

#[utoipa::path(get, path = "/", tag = "events")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Event Discovery API",
        "endpoints": {
            "/events": "Featured and upcoming events",
            "/classes/{slug}": "Class details",
            "/classes/{slug}/occurrences": "Occurrences of a class with the selected one",
            "/classes/{slug}/calendar": "Calendar day indicators for a class"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "events")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "events")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/events",
    params(EventsQuery),
    responses(
        (status = 200, description = "Featured and upcoming events", body = EventListings),
        (status = 400, description = "Invalid limit")
    ),
    tag = "events"
)]
pub async fn get_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = validate_limit(query.limit.unwrap_or(state.settings.events_limit))?;

    let (featured, upcoming) = futures::try_join!(
        state.client.fetch_featured_events(limit),
        state.client.fetch_upcoming_events(limit)
    )?;

    Ok(Json(EventListings { featured, upcoming }))
}

#[utoipa::path(
    get,
    path = "/classes/{slug}",
    params(("slug" = String, Path, description = "Class url slug")),
    responses(
        (status = 200, description = "Class details", body = ClassDetails),
        (status = 404, description = "Class not found")
    ),
    tag = "events"
)]
pub async fn get_class(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let class = state.client.fetch_class_by_slug(&slug).await?;
    Ok(Json(class))
}

async fn class_occurrences(
    state: &AppState,
    slug: &str,
) -> Result<(String, Vec<EventOccurrence>), ApiError> {
    let class = state.client.fetch_class_by_slug(slug).await?;
    let occurrences = state.client.fetch_occurrences_by_class(&class.id).await?;
    debug!(slug, class_id = %class.id, count = occurrences.len(), "loaded occurrences");
    Ok((class.id, occurrences))
}

#[utoipa::path(
    get,
    path = "/classes/{slug}/occurrences",
    params(("slug" = String, Path, description = "Class url slug"), OccurrencesQuery),
    responses(
        (status = 200, description = "Occurrences and the selected one", body = OccurrencesResponse),
        (status = 404, description = "Class not found")
    ),
    tag = "events"
)]
pub async fn get_occurrences(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<OccurrencesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (class_id, occurrences) = class_occurrences(&state, &slug).await?;
    let now = state.clock.now();
    let tz = state.settings.display_timezone;

    let mut selection = EventSelection::new(query.event_id, tz);
    selection.initialize(&occurrences, now);
    if let Some(previous) = query.selected.as_deref() {
        selection.select_by_id(previous, &occurrences);
    }

    let selected_id = selection.selected_id();
    let views = occurrences
        .iter()
        .map(|occurrence| OccurrenceView {
            status: occurrence.status(now, tz),
            availability: occurrence.availability(),
            is_bookable: occurrence.is_bookable(),
            duration: occurrence.duration_label(tz),
            is_selected: selected_id == Some(occurrence.id.as_str()),
            occurrence: occurrence.clone(),
        })
        .collect();

    Ok(Json(OccurrencesResponse {
        class_id,
        occurrences: views,
        selected: selection.selected().cloned(),
    }))
}

#[utoipa::path(
    get,
    path = "/classes/{slug}/calendar",
    params(("slug" = String, Path, description = "Class url slug"), CalendarQuery),
    responses(
        (status = 200, description = "Calendar day indicators", body = CalendarResponse),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Class not found")
    ),
    tag = "events"
)]
pub async fn get_calendar(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let day = query.date.as_deref().map(parse_day).transpose()?;
    let (class_id, occurrences) = class_occurrences(&state, &slug).await?;
    let now = state.clock.now();
    let tz = state.settings.display_timezone;

    let calendar = CalendarDays::group_by_day(&occurrences, tz);
    let mut selection = EventSelection::new(query.event_id, tz);
    selection.initialize(&occurrences, now);

    let events_on_date = match day {
        Some(day) => {
            selection.set_selected(calendar.resolve_day_selection(day, now, tz).cloned());
            calendar.events_on(day).to_vec()
        }
        None => Vec::new(),
    };

    Ok(Json(CalendarResponse {
        class_id,
        total: occurrences.len(),
        days: calendar.indicators(),
        date: day.map(|day| DayKey::from(day).to_string()),
        events_on_date,
        selected: selection.selected().cloned(),
    }))
}
