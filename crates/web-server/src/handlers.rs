use crate::{
    error::AppError,
    extract::{ApiJson, ApiPath, CurrentUser},
    AppState,
};
use analytics::{ChartReport, Statistics, TrendResult};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use core_types::{Chart, ChartUpdate, DataPoint, DataPointUpdate, NewChart, NewDataPoint};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct PointPath {
    pub chart_id: Uuid,
    pub point_id: Uuid,
}

// ==============================================================================
// Charts
// ==============================================================================

/// # GET /api/charts
pub async fn list_charts(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Json<Vec<Chart>> {
    Json(state.repo.list_charts(&user_id).await)
}

/// # POST /api/charts
pub async fn create_chart(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(payload): ApiJson<NewChart>,
) -> Result<(StatusCode, Json<Chart>), AppError> {
    payload.validate()?;
    let chart = state.repo.create_chart(&user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(chart)))
}

/// # GET /api/charts/:chart_id
pub async fn get_chart(
    ApiPath(chart_id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Chart>, AppError> {
    let chart = state.repo.get_chart(&user_id, chart_id).await?;
    Ok(Json(chart))
}

/// # PUT /api/charts/:chart_id
pub async fn update_chart(
    ApiPath(chart_id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(payload): ApiJson<ChartUpdate>,
) -> Result<Json<Chart>, AppError> {
    payload.validate()?;
    let chart = state.repo.update_chart(&user_id, chart_id, payload).await?;
    Ok(Json(chart))
}

/// # DELETE /api/charts/:chart_id
/// Removes the chart and every data point on it.
pub async fn delete_chart(
    ApiPath(chart_id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<StatusCode, AppError> {
    state.repo.delete_chart(&user_id, chart_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==============================================================================
// Data points
// ==============================================================================

/// # GET /api/charts/:chart_id/points
/// Points come back in ascending date order.
pub async fn list_points(
    ApiPath(chart_id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<DataPoint>>, AppError> {
    let points = state.repo.list_points(&user_id, chart_id).await?;
    Ok(Json(points))
}

/// # POST /api/charts/:chart_id/points
pub async fn create_point(
    ApiPath(chart_id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(payload): ApiJson<NewDataPoint>,
) -> Result<(StatusCode, Json<DataPoint>), AppError> {
    payload.validate(Utc::now().date_naive())?;
    let point = state.repo.add_point(&user_id, chart_id, payload).await?;
    Ok((StatusCode::CREATED, Json(point)))
}

/// # PUT /api/charts/:chart_id/points/:point_id
pub async fn update_point(
    ApiPath(path): ApiPath<PointPath>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(payload): ApiJson<DataPointUpdate>,
) -> Result<Json<DataPoint>, AppError> {
    payload.validate(Utc::now().date_naive())?;
    let point = state
        .repo
        .update_point(&user_id, path.chart_id, path.point_id, payload)
        .await?;
    Ok(Json(point))
}

/// # DELETE /api/charts/:chart_id/points/:point_id
pub async fn delete_point(
    ApiPath(path): ApiPath<PointPath>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<StatusCode, AppError> {
    state
        .repo
        .delete_point(&user_id, path.chart_id, path.point_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==============================================================================
// Analysis & export
// ==============================================================================

/// # GET /api/charts/:chart_id/trend
pub async fn get_trend(
    ApiPath(chart_id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<TrendResult>, AppError> {
    let points = state.repo.list_points(&user_id, chart_id).await?;
    Ok(Json(state.engine.compute_trend(&points)))
}

/// # GET /api/charts/:chart_id/stats
/// Responds with `null` for a chart without points.
pub async fn get_statistics(
    ApiPath(chart_id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Option<Statistics>>, AppError> {
    let points = state.repo.list_points(&user_id, chart_id).await?;
    Ok(Json(state.engine.summarize(&points)))
}

/// # GET /api/charts/:chart_id/report
/// Trend, statistics and the fitted line in a single response.
pub async fn get_report(
    ApiPath(chart_id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ChartReport>, AppError> {
    let points = state.repo.list_points(&user_id, chart_id).await?;
    Ok(Json(state.engine.report(&points)))
}

/// # GET /api/charts/:chart_id/export
/// Downloads the chart's points as a CSV attachment.
pub async fn export_chart(
    ApiPath(chart_id): ApiPath<Uuid>,
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let chart = state.repo.get_chart(&user_id, chart_id).await?;
    let points = state.repo.list_points(&user_id, chart_id).await?;
    let csv = state.exporter.export(&points)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        exporter::export_filename(&chart.name)
    );

    tracing::info!(%chart_id, rows = points.len(), "Chart exported.");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
