//! `/messages` handlers: validate the query, call the store, turn empty results into 404.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use msglog_core::{validate_count, DateRange, PathFilter};
use serde::Deserialize;
use storage::{
    simulate, MessageRecord, MessageStatus, MessageStore, PathCountStat, PathSizeStat,
    SimulationReport,
};
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::router::AppState;

/// Query string of the range endpoints. Values stay raw so validation can report
/// missing and malformed dates in a fixed order.
#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub path: Option<String>,
}

impl RangeParams {
    fn range(&self) -> ApiResult<DateRange> {
        Ok(DateRange::from_params(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        )?)
    }

    fn filter(&self) -> PathFilter {
        PathFilter::new(self.path.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SimulateParams {
    pub count: Option<String>,
}

fn non_empty<T>(rows: Vec<T>) -> ApiResult<Vec<T>> {
    if rows.is_empty() {
        return Err(ApiError::no_messages());
    }
    Ok(rows)
}

/// GET /messages
#[instrument(skip(state, params))]
pub async fn list_messages(
    State(state): State<AppState>,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> ApiResult<Json<Vec<MessageRecord>>> {
    let Query(params) = params?;
    let range = params.range()?;

    let messages = state.store.list_messages(&params.filter(), &range).await?;
    Ok(Json(non_empty(messages)?))
}

/// GET /messages/count
#[instrument(skip(state, params))]
pub async fn count_messages(
    State(state): State<AppState>,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> ApiResult<Json<MessageStatus>> {
    let Query(params) = params?;
    let range = params.range()?;

    let status = state.store.count_messages(&params.filter(), &range).await?;
    if status.count == 0 {
        return Err(ApiError::no_messages());
    }
    Ok(Json(status))
}

/// GET /messages/sorted/size
#[instrument(skip(state, params))]
pub async fn sorted_by_size(
    State(state): State<AppState>,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> ApiResult<Json<Vec<PathSizeStat>>> {
    let Query(params) = params?;
    let range = params.range()?;

    let stats = state.store.sorted_by_size(&range).await?;
    Ok(Json(non_empty(stats)?))
}

/// GET /messages/sorted/count
#[instrument(skip(state, params))]
pub async fn sorted_by_count(
    State(state): State<AppState>,
    params: Result<Query<RangeParams>, QueryRejection>,
) -> ApiResult<Json<Vec<PathCountStat>>> {
    let Query(params) = params?;
    let range = params.range()?;

    let stats = state.store.sorted_by_count(&range).await?;
    Ok(Json(non_empty(stats)?))
}

/// GET /messages/simulate
#[instrument(skip(state, params))]
pub async fn simulate_messages(
    State(state): State<AppState>,
    params: Result<Query<SimulateParams>, QueryRejection>,
) -> ApiResult<Json<SimulationReport>> {
    let Query(params) = params?;
    let count = validate_count(params.count.as_deref(), state.simulation.max_count)?;

    let report = simulate(state.store.as_ref(), count, state.simulation.window).await?;
    Ok(Json(report))
}
