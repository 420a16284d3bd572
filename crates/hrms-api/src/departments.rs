//! Handlers for `/departments` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::{JsonRejection, PathRejection}},
  http::StatusCode,
  response::IntoResponse,
};
use hrms_core::{
  assignment::DepartmentId,
  record::{Department, DepartmentUpdate, NewDepartment},
  store::DirectoryStore,
};
use serde_json::{Value, json};

use crate::error::ApiError;

fn not_found() -> ApiError { ApiError::NotFound("Department not found".into()) }

/// `GET /departments`
pub async fn list<S: DirectoryStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Department>>, ApiError> {
  let departments = store.list_departments().await.map_err(ApiError::store)?;
  Ok(Json(departments))
}

/// `POST /departments`: returns 201 + `departmentId`.
pub async fn create<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewDepartment>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(input) = body?;
  input.validate()?;

  let id = store.insert_department(input).await.map_err(ApiError::store)?;
  tracing::info!(department_id = id, "department created");
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Department created successfully",
      "departmentId": id,
    })),
  ))
}

/// `GET /departments/{id}`
pub async fn get_one<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  path: Result<Path<DepartmentId>, PathRejection>,
) -> Result<Json<Department>, ApiError> {
  let Path(id) = path?;
  let department = store
    .get_department(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  Ok(Json(department))
}

/// `PUT /departments/{id}`
pub async fn update<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  path: Result<Path<DepartmentId>, PathRejection>,
  body: Result<Json<DepartmentUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
  let Path(id) = path?;
  let Json(update) = body?;
  let mut department = store
    .get_department(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  department.apply(update)?;

  if store.save_department(department).await.map_err(ApiError::store)? == 0 {
    return Err(not_found());
  }
  Ok(Json(json!({ "message": "Department updated successfully" })))
}

/// `DELETE /departments/{id}`: 409 while jobs reference the department.
pub async fn delete<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  path: Result<Path<DepartmentId>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
  let Path(id) = path?;
  match store.delete_department(id).await.map_err(ApiError::store)? {
    Ok(0) => Err(not_found()),
    Ok(_) => Ok(Json(json!({ "message": "Department deleted successfully" }))),
    Err(_) => Err(ApiError::Conflict("Department still has jobs".into())),
  }
}
