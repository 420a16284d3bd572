//! Handlers for `/training` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/training/programs` | Each with its `enrolled_count` |
//! | `POST` | `/training/programs` | Body: [`NewTrainingProgram`]; 409 on a duplicate `Program_Code` |
//! | `POST` | `/training/enroll` | Body: `{"Employee_ID", "Program_ID"}` |
//! | `GET`  | `/training/employee-training` | Enrolments with program and employee names |

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use hrms_core::{
  store::{ConstraintViolation, DirectoryStore},
  training::{EnrollmentDetail, EnrollmentRequest, NewTrainingProgram, ProgramSummary},
};
use serde_json::json;

use crate::error::ApiError;

/// `GET /training/programs`
pub async fn list_programs<S: DirectoryStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ProgramSummary>>, ApiError> {
  let programs = store.list_training_programs().await.map_err(ApiError::store)?;
  Ok(Json(programs))
}

/// `POST /training/programs`: returns 201 + `programId`.
pub async fn create_program<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewTrainingProgram>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(input) = body?;
  input.validate()?;

  let id = match store.insert_training_program(input).await.map_err(ApiError::store)? {
    Ok(id) => id,
    Err(ConstraintViolation::DuplicateKey) => {
      return Err(ApiError::Conflict("Program_Code is already in use".into()));
    }
    Err(violation) => return Err(ApiError::Conflict(format!("write rejected: {violation:?}"))),
  };
  tracing::info!(program_id = id, "training program created");
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Training program created successfully",
      "programId": id,
    })),
  ))
}

/// `POST /training/enroll`: returns 201 + `enrollmentId`.
pub async fn enroll<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<EnrollmentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(request) = body?;
  let (employee_id, program_id) = request.into_parts()?;

  let outcome = store
    .enroll_employee(employee_id.clone(), program_id)
    .await
    .map_err(ApiError::store)?;
  let id = match outcome {
    Ok(id) => id,
    Err(ConstraintViolation::UnknownReference) => {
      return Err(ApiError::NotFound("Employee or training program not found".into()));
    }
    Err(ConstraintViolation::DuplicateKey) => {
      return Err(ApiError::Conflict(
        "Employee is already enrolled in this program".into(),
      ));
    }
    Err(violation) => return Err(ApiError::Conflict(format!("write rejected: {violation:?}"))),
  };
  tracing::info!(enrollment_id = id, %employee_id, program_id, "employee enrolled");
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Employee enrolled successfully",
      "enrollmentId": id,
    })),
  ))
}

/// `GET /training/employee-training`
pub async fn list_enrollments<S: DirectoryStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<EnrollmentDetail>>, ApiError> {
  let enrollments = store.list_enrollments().await.map_err(ApiError::store)?;
  Ok(Json(enrollments))
}
