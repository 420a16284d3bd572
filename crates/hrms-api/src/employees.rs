//! Handlers for `/employees` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/employees` | Each with the title and department of the active assignment |
//! | `POST`   | `/employees` | Body: [`Employee`]; 409 on a duplicate `Employee_ID` |
//! | `GET`    | `/employees/{id}` | 404 if not found |
//! | `PUT`    | `/employees/{id}` | Body: [`EmployeeUpdate`] |
//! | `DELETE` | `/employees/{id}` | 409 while assignments or enrolments reference the employee |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::{JsonRejection, PathRejection}},
  http::StatusCode,
  response::IntoResponse,
};
use hrms_core::{
  record::{Employee, EmployeeSummary, EmployeeUpdate},
  store::{ConstraintViolation, DirectoryStore},
};
use serde_json::{Value, json};

use crate::error::ApiError;

fn not_found() -> ApiError { ApiError::NotFound("Employee not found".into()) }

/// `GET /employees`
pub async fn list<S: DirectoryStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<EmployeeSummary>>, ApiError> {
  let employees = store.list_employees().await.map_err(ApiError::store)?;
  Ok(Json(employees))
}

/// `POST /employees`
pub async fn create<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<Employee>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(employee) = body?;
  employee.validate()?;

  let employee_id = employee.employee_id.clone();
  match store.insert_employee(employee).await.map_err(ApiError::store)? {
    Ok(()) => {
      tracing::info!(%employee_id, "employee created");
      Ok((
        StatusCode::CREATED,
        Json(json!({
          "message": "Employee created successfully",
          "employeeId": employee_id,
        })),
      ))
    }
    Err(ConstraintViolation::DuplicateKey) => Err(ApiError::Conflict(format!(
      "Employee {employee_id} already exists"
    ))),
    Err(violation) => Err(ApiError::Conflict(format!("write rejected: {violation:?}"))),
  }
}

/// `GET /employees/{id}`
pub async fn get_one<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<Employee>, ApiError> {
  let Path(id) = path?;
  let employee = store
    .get_employee(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  Ok(Json(employee))
}

/// `PUT /employees/{id}`
pub async fn update<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  path: Result<Path<String>, PathRejection>,
  body: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
  let Path(id) = path?;
  let Json(update) = body?;
  let mut employee = store
    .get_employee(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;
  employee.apply(update)?;

  if store.save_employee(employee).await.map_err(ApiError::store)? == 0 {
    return Err(not_found());
  }
  Ok(Json(json!({ "message": "Employee updated successfully" })))
}

/// `DELETE /employees/{id}`
pub async fn delete<S: DirectoryStore>(
  State(store): State<Arc<S>>,
  path: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
  let Path(id) = path?;
  match store.delete_employee(&id).await.map_err(ApiError::store)? {
    Ok(0) => Err(not_found()),
    Ok(_) => Ok(Json(json!({ "message": "Employee deleted successfully" }))),
    Err(_) => Err(ApiError::Conflict(
      "Employee still has job assignments or training enrollments".into(),
    )),
  }
}
