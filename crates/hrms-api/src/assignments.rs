//! Handlers for `/assignments` endpoints.
//!
//! Every write goes through [`AssignmentGuard`].
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/assignments` | Newest `Start_Date` first |
//! | `POST` | `/assignments` | Body: [`AssignmentRequest`]; returns 201 + `assignmentId` |
//! | `PUT`  | `/assignments/{id}` | Body: `{"Status":"Terminated","End_Date":"..."}` |
//! | `GET`  | `/assignments/employee/{employeeId}` | One employee's history |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::{JsonRejection, PathRejection}},
  http::StatusCode,
  response::IntoResponse,
};
use hrms_core::{
  assignment::{AssignmentDetail, AssignmentId, AssignmentRequest, StatusChange},
  guard::AssignmentGuard,
  store::RecordStore,
};
use serde_json::{Value, json};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /assignments`
pub async fn list<S: RecordStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<AssignmentDetail>>, ApiError> {
  let assignments = AssignmentGuard::new(store.as_ref()).list_assignments().await?;
  Ok(Json(assignments))
}

/// `GET /assignments/employee/{employeeId}`
pub async fn list_by_employee<S: RecordStore>(
  State(store): State<Arc<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<AssignmentDetail>>, ApiError> {
  let Path(employee_id) = path?;
  let assignments = AssignmentGuard::new(store.as_ref())
    .list_assignments_by_employee(&employee_id)
    .await?;
  Ok(Json(assignments))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /assignments`: returns 201 + `{"message", "assignmentId"}`.
pub async fn create<S: RecordStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<AssignmentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(request) = body?;
  let id = AssignmentGuard::new(store.as_ref())
    .create_assignment(request)
    .await?;
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Job assigned successfully",
      "assignmentId": id,
    })),
  ))
}

// ─── Update status ────────────────────────────────────────────────────────────

/// `PUT /assignments/{id}`
pub async fn update_status<S: RecordStore>(
  State(store): State<Arc<S>>,
  path: Result<Path<AssignmentId>, PathRejection>,
  body: Result<Json<StatusChange>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
  let Path(id) = path?;
  let Json(change) = body?;
  AssignmentGuard::new(store.as_ref())
    .update_assignment_status(id, change)
    .await?;
  Ok(Json(json!({ "message": "Assignment updated successfully" })))
}
