//! Handlers for `/performance` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use hrms_core::{
  performance::{AppraisalDetail, AppraisalRequest, NewPerformanceCycle, PerformanceCycle},
  store::{ConstraintViolation, DirectoryStore},
};
use serde_json::json;

use crate::error::ApiError;

/// `GET /performance/appraisals`
pub async fn list_appraisals<S: DirectoryStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<AppraisalDetail>>, ApiError> {
  let appraisals = store.list_appraisals().await.map_err(ApiError::store)?;
  Ok(Json(appraisals))
}

/// `POST /performance/appraisals`: returns 201 + `appraisalId`. 404 when the
/// assignment or cycle does not exist.
pub async fn create_appraisal<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<AppraisalRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(request) = body?;
  let input = request.into_new()?;
  let assignment_id = input.assignment_id;

  let id = match store.insert_appraisal(input).await.map_err(ApiError::store)? {
    Ok(id) => id,
    Err(ConstraintViolation::UnknownReference) => {
      return Err(ApiError::NotFound(
        "Assignment or performance cycle not found".into(),
      ));
    }
    Err(violation) => return Err(ApiError::Conflict(format!("write rejected: {violation:?}"))),
  };
  tracing::info!(appraisal_id = id, assignment_id, "appraisal created");
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Appraisal created successfully",
      "appraisalId": id,
    })),
  ))
}

/// `GET /performance/cycles`: newest first.
pub async fn list_cycles<S: DirectoryStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<PerformanceCycle>>, ApiError> {
  let cycles = store.list_performance_cycles().await.map_err(ApiError::store)?;
  Ok(Json(cycles))
}

/// `POST /performance/cycles`: returns 201 + `cycleId`.
pub async fn create_cycle<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewPerformanceCycle>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(input) = body?;
  input.validate()?;

  let id = store.insert_performance_cycle(input).await.map_err(ApiError::store)?;
  tracing::info!(cycle_id = id, "performance cycle created");
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Performance cycle created successfully",
      "cycleId": id,
    })),
  ))
}
