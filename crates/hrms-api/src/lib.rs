//! JSON REST API for the HRMS.
//!
//! Exposes an axum [`Router`] backed by any [`hrms_core::store::DirectoryStore`].
//! CORS, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", hrms_api::api_router(store.clone()))
//! ```

pub mod assignments;
pub mod departments;
pub mod employees;
pub mod error;
pub mod jobs;
pub mod performance;
pub mod training;

use std::sync::Arc;

use axum::{
  Json, Router,
  routing::{get, post, put},
};
use hrms_core::store::DirectoryStore;
use serde_json::{Value, json};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DirectoryStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    // Assignments
    .route(
      "/assignments",
      get(assignments::list::<S>).post(assignments::create::<S>),
    )
    .route("/assignments/{id}", put(assignments::update_status::<S>))
    .route(
      "/assignments/employee/{employee_id}",
      get(assignments::list_by_employee::<S>),
    )
    // Employees
    .route("/employees", get(employees::list::<S>).post(employees::create::<S>))
    .route(
      "/employees/{id}",
      get(employees::get_one::<S>)
        .put(employees::update::<S>)
        .delete(employees::delete::<S>),
    )
    // Departments
    .route(
      "/departments",
      get(departments::list::<S>).post(departments::create::<S>),
    )
    .route(
      "/departments/{id}",
      get(departments::get_one::<S>)
        .put(departments::update::<S>)
        .delete(departments::delete::<S>),
    )
    // Jobs
    .route("/jobs", get(jobs::list::<S>).post(jobs::create::<S>))
    .route(
      "/jobs/{id}",
      get(jobs::get_one::<S>)
        .put(jobs::update::<S>)
        .delete(jobs::delete::<S>),
    )
    // Training
    .route(
      "/training/programs",
      get(training::list_programs::<S>).post(training::create_program::<S>),
    )
    .route("/training/enroll", post(training::enroll::<S>))
    .route(
      "/training/employee-training",
      get(training::list_enrollments::<S>),
    )
    // Performance
    .route(
      "/performance/appraisals",
      get(performance::list_appraisals::<S>).post(performance::create_appraisal::<S>),
    )
    .route(
      "/performance/cycles",
      get(performance::list_cycles::<S>).post(performance::create_cycle::<S>),
    )
    .with_state(store)
}

/// `GET /health`
async fn health() -> Json<Value> {
  Json(json!({ "status": "OK", "message": "HRMS API is running" }))
}
