//! Handlers for `/jobs` endpoints.
//!
//! Salary bands are checked on create and again after every update; an
//! inverted band is a 400.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::{JsonRejection, PathRejection}},
  http::StatusCode,
  response::IntoResponse,
};
use hrms_core::{
  assignment::JobId,
  record::{Job, JobSummary, JobUpdate, NewJob},
  store::{ConstraintViolation, DirectoryStore},
};
use serde_json::{Value, json};

use crate::error::ApiError;

fn not_found() -> ApiError { ApiError::NotFound("Job not found".into()) }

fn rejected(violation: ConstraintViolation) -> ApiError {
  match violation {
    ConstraintViolation::DuplicateKey => ApiError::Conflict("Job_Code is already in use".into()),
    ConstraintViolation::UnknownReference => ApiError::NotFound("Department not found".into()),
    ConstraintViolation::StillReferenced => {
      ApiError::Conflict("Job still has assignments".into())
    }
    ConstraintViolation::ActiveTenure => {
      ApiError::Conflict(format!("write rejected: {violation:?}"))
    }
  }
}

/// `GET /jobs`: each with its department name and active headcount.
pub async fn list<S: DirectoryStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<JobSummary>>, ApiError> {
  let jobs = store.list_jobs().await.map_err(ApiError::store)?;
  Ok(Json(jobs))
}

/// `POST /jobs`: returns 201 + `jobId`.
pub async fn create<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewJob>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(input) = body?;
  input.validate()?;

  let id = store
    .insert_job(input)
    .await
    .map_err(ApiError::store)?
    .map_err(rejected)?;
  tracing::info!(job_id = id, "job created");
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Job created successfully",
      "jobId": id,
    })),
  ))
}

/// `GET /jobs/{id}`
pub async fn get_one<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  path: Result<Path<JobId>, PathRejection>,
) -> Result<Json<Job>, ApiError> {
  let Path(id) = path?;
  let job = store
    .get_job(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  Ok(Json(job))
}

/// `PUT /jobs/{id}`
pub async fn update<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  path: Result<Path<JobId>, PathRejection>,
  body: Result<Json<JobUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
  let Path(id) = path?;
  let Json(update) = body?;
  let mut job = store
    .get_job(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  job.apply(update)?;

  match store.save_job(job).await.map_err(ApiError::store)? {
    Ok(0) => Err(not_found()),
    Ok(_) => Ok(Json(json!({ "message": "Job updated successfully" }))),
    Err(violation) => Err(rejected(violation)),
  }
}

/// `DELETE /jobs/{id}`: 409 while assignments reference the job.
pub async fn delete<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  path: Result<Path<JobId>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
  let Path(id) = path?;
  match store.delete_job(id).await.map_err(ApiError::store)? {
    Ok(0) => Err(not_found()),
    Ok(_) => Ok(Json(json!({ "message": "Job deleted successfully" }))),
    Err(violation) => Err(rejected(violation)),
  }
}
