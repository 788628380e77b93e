use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::output::ForsysOutputError;
use super::params::{GenerationRequest, QueryParams, RankingRequest, RequestParamsError};
use super::priorities::WeightedPriorities;
use super::repository::{PlanningRepository, UserId};
use super::service::{ScenarioPlanningService, ScenarioServiceError};

/// Header carrying the id of the user a request is made for.
pub const USER_HEADER: &str = "x-planscape-user";

/// Body of a scenario set request: engine output plus the priorities it ran with.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioSetRequest {
    pub priorities: Vec<String>,
    pub project_output_csv: String,
}

/// Body of a single scenario request. Absent weights mean every priority
/// weighs 1.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioRequest {
    pub priorities: Vec<String>,
    #[serde(default)]
    pub priority_weights: Option<Vec<f64>>,
    pub project_output_csv: String,
}

/// Router exposing parameter assembly and engine output reshaping.
pub fn forsys_router<R>(service: Arc<ScenarioPlanningService<R>>) -> Router
where
    R: PlanningRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/forsys/ranking_params",
            get(ranking_params_handler::<R>).post(ranking_params_json_handler::<R>),
        )
        .route(
            "/api/v1/forsys/generation_params",
            get(generation_params_handler::<R>).post(generation_params_json_handler::<R>),
        )
        .route("/api/v1/forsys/scenario_set", post(scenario_set_handler::<R>))
        .route("/api/v1/forsys/scenario", post(scenario_handler::<R>))
        .with_state(service)
}

pub(crate) async fn ranking_params_handler<R>(
    State(service): State<Arc<ScenarioPlanningService<R>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    ranking_params(&service, &QueryParams::from(pairs))
}

pub(crate) async fn ranking_params_json_handler<R>(
    State(service): State<Arc<ScenarioPlanningService<R>>>,
    Json(body): Json<Value>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    ranking_params(&service, &QueryParams::from_json(&body))
}

pub(crate) async fn generation_params_handler<R>(
    State(service): State<Arc<ScenarioPlanningService<R>>>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    generation_params(&service, &headers, &QueryParams::from(pairs))
}

pub(crate) async fn generation_params_json_handler<R>(
    State(service): State<Arc<ScenarioPlanningService<R>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    generation_params(&service, &headers, &QueryParams::from_json(&body))
}

pub(crate) async fn scenario_set_handler<R>(
    State(service): State<Arc<ScenarioPlanningService<R>>>,
    Json(request): Json<ScenarioSetRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.scenario_set_from_csv(&request.project_output_csv, &request.priorities) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn scenario_handler<R>(
    State(service): State<Arc<ScenarioPlanningService<R>>>,
    Json(request): Json<ScenarioRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let ScenarioRequest {
        priorities,
        priority_weights,
        project_output_csv,
    } = request;
    let weighted = match priority_weights {
        Some(weights) => WeightedPriorities::new(priorities, weights),
        None => WeightedPriorities::uniform(priorities),
    };

    let result = weighted
        .map_err(ScenarioServiceError::from)
        .and_then(|weighted| service.scenario_from_csv(&project_output_csv, &weighted));
    match result {
        Ok(scenario) => (StatusCode::OK, Json(scenario)).into_response(),
        Err(error) => error_response(&error),
    }
}

fn ranking_params<R>(service: &ScenarioPlanningService<R>, lookup: &QueryParams) -> Response
where
    R: PlanningRepository + 'static,
{
    let result = RankingRequest::from_lookup(lookup)
        .map_err(ScenarioServiceError::from)
        .and_then(|request| service.ranking_params(request));
    match result {
        Ok(params) => (StatusCode::OK, Json(params)).into_response(),
        Err(error) => error_response(&error),
    }
}

fn generation_params<R>(
    service: &ScenarioPlanningService<R>,
    headers: &HeaderMap,
    lookup: &QueryParams,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let result = identity(headers)
        .and_then(|identity| GenerationRequest::from_lookup(lookup, identity))
        .map_err(ScenarioServiceError::from)
        .and_then(|request| service.generation_params(request));
    match result {
        Ok(params) => (StatusCode::OK, Json(params)).into_response(),
        Err(error) => error_response(&error),
    }
}

fn identity(headers: &HeaderMap) -> Result<Option<UserId>, RequestParamsError> {
    let Some(value) = headers.get(USER_HEADER) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .map(|id| Some(UserId(id)))
        .ok_or_else(|| {
            RequestParamsError::InvalidParameter(format!(
                "header, {USER_HEADER}, must hold a numeric user id"
            ))
        })
}

/// HTTP status for a service failure.
pub fn status_for(error: &ScenarioServiceError) -> StatusCode {
    match error {
        ScenarioServiceError::Params(error) => match error {
            RequestParamsError::NotFound(_) => StatusCode::NOT_FOUND,
            RequestParamsError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            RequestParamsError::Unauthenticated => StatusCode::UNAUTHORIZED,
            RequestParamsError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        },
        ScenarioServiceError::Output(ForsysOutputError::DuplicatePriority(_)) => {
            StatusCode::BAD_REQUEST
        }
        ScenarioServiceError::Output(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn error_response(error: &ScenarioServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (status_for(error), Json(payload)).into_response()
}
