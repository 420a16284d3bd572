//! The `RecordStore` / `DirectoryStore` traits and supporting types.
//!
//! The traits are implemented by storage backends (e.g. `hrms-store-sqlite`).
//! Higher layers (`hrms-api`, the guard) depend on these abstractions, not on
//! any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  assignment::{
    Assignment, AssignmentDetail, AssignmentId, AssignmentStatus, DepartmentId,
    JobId, NewAssignment,
  },
  performance::{
    AppraisalDetail, AppraisalId, CycleId, NewAppraisal, NewPerformanceCycle, PerformanceCycle,
  },
  record::{Department, Employee, EmployeeSummary, Job, JobSummary, NewDepartment, NewJob},
  training::{EnrollmentDetail, EnrollmentId, NewTrainingProgram, ProgramId, ProgramSummary},
};

// ─── Constraint outcomes ─────────────────────────────────────────────────────

/// A store-level constraint that rejected a write.
///
/// These are ordinary outcomes of a write, not failures of the store itself,
/// so they travel in the inner [`Checked`] result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
  /// The employee already holds an `Active` assignment.
  ActiveTenure,
  /// A referenced row (employee, job, department, assignment, program or
  /// cycle) does not exist.
  UnknownReference,
  /// The primary or unique key is already taken.
  DuplicateKey,
  /// The row is still referenced by other rows and cannot be deleted.
  StillReferenced,
}

pub type Checked<T> = std::result::Result<T, ConstraintViolation>;

// ─── Record store ────────────────────────────────────────────────────────────

/// The store contract consumed by [`crate::guard::AssignmentGuard`].
///
/// Implementations must enforce the active-tenure invariant atomically in
/// [`insert_assignment`](Self::insert_assignment) and
/// [`update_assignment_status`](Self::update_assignment_status): a write that
/// would leave an employee with two `Active` assignments returns
/// `Ok(Err(ConstraintViolation::ActiveTenure))` regardless of what earlier
/// reads observed.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Any assignment of `employee_id` whose status is `Active`.
  fn find_active_assignment<'a>(
    &'a self,
    employee_id: &'a str,
  ) -> impl Future<Output = Result<Option<Assignment>, Self::Error>> + Send + 'a;

  /// Retrieve a job by id. Returns `None` if not found.
  fn get_job(
    &self,
    job_id: JobId,
  ) -> impl Future<Output = Result<Option<Job>, Self::Error>> + Send + '_;

  /// Retrieve an assignment by id. Returns `None` if not found.
  fn get_assignment(
    &self,
    id: AssignmentId,
  ) -> impl Future<Output = Result<Option<Assignment>, Self::Error>> + Send + '_;

  /// Persist a new assignment and return its generated id.
  fn insert_assignment(
    &self,
    input: NewAssignment,
  ) -> impl Future<Output = Result<Checked<AssignmentId>, Self::Error>> + Send + '_;

  /// Overwrite `Status` and `End_Date` of one assignment. Returns the number
  /// of rows affected; `0` means no assignment has `id`.
  fn update_assignment_status(
    &self,
    id: AssignmentId,
    status: AssignmentStatus,
    end_date: NaiveDate,
  ) -> impl Future<Output = Result<Checked<u64>, Self::Error>> + Send + '_;

  /// All assignments joined with employee, job and department display
  /// fields, newest `Start_Date` first. Restricted to one employee when
  /// `employee_id` is given.
  fn list_assignments<'a>(
    &'a self,
    employee_id: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<AssignmentDetail>, Self::Error>> + Send + 'a;
}

// ─── Directory store ─────────────────────────────────────────────────────────

/// Plain CRUD over the records the guard only reads.
///
/// `save_*` methods overwrite every column of an existing row and return the
/// number of rows affected.
pub trait DirectoryStore: RecordStore {
  // ── Employees ─────────────────────────────────────────────────────────

  fn insert_employee(
    &self,
    employee: Employee,
  ) -> impl Future<Output = Result<Checked<()>, Self::Error>> + Send + '_;

  fn get_employee<'a>(
    &'a self,
    employee_id: &'a str,
  ) -> impl Future<Output = Result<Option<Employee>, Self::Error>> + Send + 'a;

  /// Every employee with the title and department of their active
  /// assignment, if any.
  fn list_employees(
    &self,
  ) -> impl Future<Output = Result<Vec<EmployeeSummary>, Self::Error>> + Send + '_;

  fn save_employee(
    &self,
    employee: Employee,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn delete_employee<'a>(
    &'a self,
    employee_id: &'a str,
  ) -> impl Future<Output = Result<Checked<u64>, Self::Error>> + Send + 'a;

  // ── Departments ───────────────────────────────────────────────────────

  fn insert_department(
    &self,
    input: NewDepartment,
  ) -> impl Future<Output = Result<DepartmentId, Self::Error>> + Send + '_;

  fn get_department(
    &self,
    id: DepartmentId,
  ) -> impl Future<Output = Result<Option<Department>, Self::Error>> + Send + '_;

  fn list_departments(
    &self,
  ) -> impl Future<Output = Result<Vec<Department>, Self::Error>> + Send + '_;

  fn save_department(
    &self,
    department: Department,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn delete_department(
    &self,
    id: DepartmentId,
  ) -> impl Future<Output = Result<Checked<u64>, Self::Error>> + Send + '_;

  // ── Jobs ──────────────────────────────────────────────────────────────

  fn insert_job(
    &self,
    input: NewJob,
  ) -> impl Future<Output = Result<Checked<JobId>, Self::Error>> + Send + '_;

  /// Every job with its department name and active-assignment count.
  fn list_jobs(
    &self,
  ) -> impl Future<Output = Result<Vec<JobSummary>, Self::Error>> + Send + '_;

  fn save_job(
    &self,
    job: Job,
  ) -> impl Future<Output = Result<Checked<u64>, Self::Error>> + Send + '_;

  fn delete_job(
    &self,
    id: JobId,
  ) -> impl Future<Output = Result<Checked<u64>, Self::Error>> + Send + '_;

  // ── Training ──────────────────────────────────────────────────────────

  /// Every program with its enrolment count.
  fn list_training_programs(
    &self,
  ) -> impl Future<Output = Result<Vec<ProgramSummary>, Self::Error>> + Send + '_;

  /// `input` must have passed [`NewTrainingProgram::validate`].
  fn insert_training_program(
    &self,
    input: NewTrainingProgram,
  ) -> impl Future<Output = Result<Checked<ProgramId>, Self::Error>> + Send + '_;

  /// Enrol an employee with completion status
  /// [`ENROLLED_STATUS`](crate::training::ENROLLED_STATUS). An employee can
  /// be enrolled in a program once.
  fn enroll_employee(
    &self,
    employee_id: String,
    program_id: ProgramId,
  ) -> impl Future<Output = Result<Checked<EnrollmentId>, Self::Error>> + Send + '_;

  fn list_enrollments(
    &self,
  ) -> impl Future<Output = Result<Vec<EnrollmentDetail>, Self::Error>> + Send + '_;

  // ── Performance ───────────────────────────────────────────────────────

  /// Newest `Start_Date` first.
  fn list_performance_cycles(
    &self,
  ) -> impl Future<Output = Result<Vec<PerformanceCycle>, Self::Error>> + Send + '_;

  fn insert_performance_cycle(
    &self,
    input: NewPerformanceCycle,
  ) -> impl Future<Output = Result<CycleId, Self::Error>> + Send + '_;

  fn insert_appraisal(
    &self,
    input: NewAppraisal,
  ) -> impl Future<Output = Result<Checked<AppraisalId>, Self::Error>> + Send + '_;

  fn list_appraisals(
    &self,
  ) -> impl Future<Output = Result<Vec<AppraisalDetail>, Self::Error>> + Send + '_;
}
