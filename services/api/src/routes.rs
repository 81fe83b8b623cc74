use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::atomic::Ordering;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use timetable::error::AppError;
use timetable::roster::RosterImporter;
use timetable::scheduling::{
    AssignmentDraft, AssignmentId, CourseSection, Instructor, InstructorId, InvalidAssignment,
    Modality, RemovalMode, ScheduleQuery, SectionId, SectionQuery, StartHour, TermId, Venue,
    VenueId, VenueSelector, Weekday,
};

use crate::infra::ApiState;

pub(crate) fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/venues", get(list_venues).post(upsert_venue))
        .route("/api/v1/terms", get(list_terms))
        .route("/api/v1/sections", get(list_sections).post(upsert_section))
        .route("/api/v1/sections/summary", get(term_summary))
        .route("/api/v1/sections/:section_id", axum::routing::delete(delete_section))
        .route("/api/v1/assignments", post(create_assignment))
        .route(
            "/api/v1/assignments/:assignment_id",
            put(update_assignment).delete(delete_assignment),
        )
        .route(
            "/api/v1/instructors",
            get(list_instructors).post(upsert_instructor),
        )
        .route(
            "/api/v1/instructors/:instructor_id",
            axum::routing::delete(delete_instructor),
        )
        .route(
            "/api/v1/instructors/:instructor_id/venues",
            put(set_instructor_venues),
        )
        .route("/api/v1/schedule", get(schedule_endpoint))
        .route("/api/v1/schedule/conflicts", get(conflicts_endpoint))
        .route("/api/v1/import/roster", post(import_roster))
        .with_state(state)
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<ApiState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<ApiState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
struct TermParams {
    term: u32,
}

#[derive(Debug, Deserialize)]
struct SectionParams {
    term: u32,
    search: Option<String>,
    #[serde(default)]
    only_unassigned: bool,
}

#[derive(Debug, Deserialize)]
struct ScheduleParams {
    term: u32,
    venue: Option<String>,
    instructor: Option<u32>,
    section: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemovalParams {
    #[serde(default)]
    cascade: bool,
}

impl RemovalParams {
    fn mode(&self) -> RemovalMode {
        if self.cascade {
            RemovalMode::Cascade
        } else {
            RemovalMode::Restrict
        }
    }
}

/// Assignment payload as the wire sees it: enum-valued fields stay raw
/// strings so out-of-set values surface as `UnknownValue` rather than an
/// opaque deserialization failure.
#[derive(Debug, Deserialize)]
struct AssignmentBody {
    modality: String,
    #[serde(default)]
    instructor_id: Option<u32>,
    #[serde(default)]
    venue_id: Option<u32>,
    #[serde(default)]
    weekday: Option<String>,
    #[serde(default)]
    start_hour: Option<String>,
    #[serde(default)]
    hosts_walk_ins: bool,
}

#[derive(Debug, Deserialize)]
struct CreateAssignmentRequest {
    section_id: u32,
    term_id: u32,
    #[serde(flatten)]
    body: AssignmentBody,
}

impl AssignmentBody {
    fn into_draft(self) -> Result<AssignmentDraft, AppError> {
        let modality = Modality::from_str(&self.modality).map_err(invalid)?;
        let weekday = self
            .weekday
            .as_deref()
            .map(Weekday::from_str)
            .transpose()
            .map_err(invalid)?;
        let start_hour = self
            .start_hour
            .as_deref()
            .map(StartHour::from_str)
            .transpose()
            .map_err(invalid)?;
        Ok(AssignmentDraft {
            modality,
            instructor: self.instructor_id.map(InstructorId),
            venue: self.venue_id.map(VenueId),
            weekday,
            start_hour,
            hosts_walk_ins: self.hosts_walk_ins,
        })
    }
}

fn invalid(reason: InvalidAssignment) -> AppError {
    AppError::Scheduling(reason.into())
}

async fn list_venues(State(state): State<ApiState>) -> Json<Vec<Venue>> {
    Json(state.service.venues())
}

async fn upsert_venue(
    State(state): State<ApiState>,
    Json(venue): Json<Venue>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.service.upsert_venue(venue)?;
    Ok(Json(json!({ "status": "ok" })))
}

async fn list_terms(State(state): State<ApiState>) -> Json<Vec<timetable::scheduling::Term>> {
    Json(state.service.terms())
}

async fn list_sections(
    State(state): State<ApiState>,
    Query(params): Query<SectionParams>,
) -> Json<Vec<timetable::scheduling::SectionOverview>> {
    let query = SectionQuery {
        term: TermId(params.term),
        search: params.search,
        only_unassigned: params.only_unassigned,
    };
    Json(state.service.list_course_sections(&query))
}

async fn term_summary(
    State(state): State<ApiState>,
    Query(params): Query<TermParams>,
) -> Json<timetable::scheduling::TermSummary> {
    Json(state.service.summarize(TermId(params.term)))
}

async fn upsert_section(
    State(state): State<ApiState>,
    Json(section): Json<CourseSection>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.service.upsert_course_section(section)?;
    Ok(Json(json!({ "status": "ok" })))
}

async fn delete_section(
    State(state): State<ApiState>,
    Path(section_id): Path<u32>,
    Query(params): Query<RemovalParams>,
) -> Result<StatusCode, AppError> {
    state
        .service
        .remove_course_section(SectionId(section_id), params.mode())?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_assignment(
    State(state): State<ApiState>,
    Json(request): Json<CreateAssignmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let draft = request.body.into_draft()?;
    let stored = state.service.create_assignment(
        SectionId(request.section_id),
        TermId(request.term_id),
        draft,
    )?;
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn update_assignment(
    State(state): State<ApiState>,
    Path(assignment_id): Path<u32>,
    Json(body): Json<AssignmentBody>,
) -> Result<Json<timetable::scheduling::Assignment>, AppError> {
    let draft = body.into_draft()?;
    let stored = state
        .service
        .update_assignment(AssignmentId(assignment_id), draft)?;
    Ok(Json(stored))
}

async fn delete_assignment(
    State(state): State<ApiState>,
    Path(assignment_id): Path<u32>,
) -> Result<StatusCode, AppError> {
    state.service.delete_assignment(AssignmentId(assignment_id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_instructors(
    State(state): State<ApiState>,
    Query(params): Query<TermParams>,
) -> Json<Vec<timetable::scheduling::InstructorOverview>> {
    Json(state.service.list_instructors(TermId(params.term)))
}

async fn upsert_instructor(
    State(state): State<ApiState>,
    Json(instructor): Json<Instructor>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.service.upsert_instructor(instructor)?;
    Ok(Json(json!({ "status": "ok" })))
}

async fn delete_instructor(
    State(state): State<ApiState>,
    Path(instructor_id): Path<u32>,
    Query(params): Query<RemovalParams>,
) -> Result<StatusCode, AppError> {
    state
        .service
        .remove_instructor(InstructorId(instructor_id), params.mode())?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct InstructorVenuesRequest {
    venue_ids: Vec<u32>,
}

async fn set_instructor_venues(
    State(state): State<ApiState>,
    Path(instructor_id): Path<u32>,
    Json(request): Json<InstructorVenuesRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let venues: BTreeSet<VenueId> = request.venue_ids.into_iter().map(VenueId).collect();
    state
        .service
        .set_instructor_venues(InstructorId(instructor_id), venues)?;
    Ok(Json(json!({ "status": "ok" })))
}

async fn schedule_endpoint(
    State(state): State<ApiState>,
    Query(params): Query<ScheduleParams>,
) -> Result<Json<Vec<timetable::scheduling::ScheduleEntry>>, AppError> {
    let venue = match params.venue.as_deref() {
        None => VenueSelector::Any,
        Some("remote") => VenueSelector::Remote,
        Some(raw) => match raw.parse::<u32>() {
            Ok(id) => VenueSelector::Venue(VenueId(id)),
            Err(_) => {
                return Err(invalid(InvalidAssignment::UnknownValue {
                    field: "venue",
                    value: raw.to_string(),
                }))
            }
        },
    };
    let query = ScheduleQuery {
        term: TermId(params.term),
        venue,
        instructor: params.instructor.map(InstructorId),
        section_code: params.section,
    };
    Ok(Json(state.service.schedule(&query)))
}

async fn conflicts_endpoint(
    State(state): State<ApiState>,
    Query(params): Query<TermParams>,
) -> Json<Vec<timetable::scheduling::Conflict>> {
    Json(state.service.detect_conflicts(TermId(params.term)))
}

async fn import_roster(
    State(state): State<ApiState>,
    Query(params): Query<TermParams>,
    body: String,
) -> Result<Json<timetable::roster::RosterSummary>, AppError> {
    let summary =
        RosterImporter::from_reader(&state.service, TermId(params.term), body.as_bytes())?;
    Ok(Json(summary))
}
