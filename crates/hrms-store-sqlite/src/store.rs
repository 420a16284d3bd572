//! [`SqliteStore`], the SQLite implementation of [`RecordStore`] and
//! [`DirectoryStore`].

use std::{ffi::c_int, path::Path};

use chrono::NaiveDate;
use rusqlite::{ErrorCode, OptionalExtension as _, ffi};

use hrms_core::{
  assignment::{
    Assignment, AssignmentDetail, AssignmentId, AssignmentStatus, DepartmentId, JobId,
    NewAssignment,
  },
  performance::{
    AppraisalDetail, AppraisalId, CycleId, NewAppraisal, NewPerformanceCycle, PerformanceCycle,
  },
  record::{Department, Employee, EmployeeSummary, Job, JobSummary, NewDepartment, NewJob},
  store::{Checked, ConstraintViolation, DirectoryStore, RecordStore},
  training::{
    ENROLLED_STATUS, EnrollmentDetail, EnrollmentId, NewTrainingProgram, ProgramId,
    ProgramSummary,
  },
};

use crate::{
  Result,
  encode::{
    APPRAISAL_COLUMNS, ASSIGNMENT_COLUMNS, CYCLE_COLUMNS, DEPARTMENT_COLUMNS, EMPLOYEE_COLUMNS,
    ENROLLMENT_COLUMNS, JOB_COLUMNS, PROGRAM_COLUMNS, RawAppraisalDetail, RawAssignment,
    RawAssignmentDetail, RawCycle, RawEmployee, RawEmployeeSummary, department_from_row,
    encode_date, enrollment_detail_from_row, job_from_row, job_summary_from_row,
    program_summary_from_row,
  },
  schema::SCHEMA,
};

// ─── Constraint classification ───────────────────────────────────────────────

/// Split a statement result into success, a recognised constraint
/// violation, or a genuine database error.
///
/// `classify` receives the SQLite extended result code of a constraint
/// failure and decides which [`ConstraintViolation`] it represents for the
/// statement at hand; `None` leaves it as an error.
fn checked<T>(
  result: rusqlite::Result<T>,
  classify: impl FnOnce(c_int) -> Option<ConstraintViolation>,
) -> tokio_rusqlite::Result<Checked<T>> {
  let err = match result {
    Ok(v) => return Ok(Ok(v)),
    Err(err) => err,
  };
  let violation = match &err {
    rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
      classify(e.extended_code)
    }
    _ => None,
  };
  match violation {
    Some(v) => Ok(Err(v)),
    None => Err(err.into()),
  }
}

fn on_insert(code: c_int) -> Option<ConstraintViolation> {
  match code {
    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(ConstraintViolation::UnknownReference),
    ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE => {
      Some(ConstraintViolation::DuplicateKey)
    }
    _ => None,
  }
}

fn on_delete(code: c_int) -> Option<ConstraintViolation> {
  (code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY).then_some(ConstraintViolation::StillReferenced)
}

/// On `assignments` the partial unique index is the only UNIQUE constraint.
fn on_assignment_write(code: c_int) -> Option<ConstraintViolation> {
  match code {
    ffi::SQLITE_CONSTRAINT_UNIQUE => Some(ConstraintViolation::ActiveTenure),
    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(ConstraintViolation::UnknownReference),
    _ => None,
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An HRMS record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("schema initialised");
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  async fn find_active_assignment(&self, employee_id: &str) -> Result<Option<Assignment>> {
    let employee_id = employee_id.to_owned();

    let raw: Option<RawAssignment> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ASSIGNMENT_COLUMNS} FROM assignments a
                 WHERE a.employee_id = ?1 AND a.status = 'Active'
                 LIMIT 1"
              ),
              rusqlite::params![employee_id],
              RawAssignment::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAssignment::into_assignment).transpose()
  }

  async fn get_job(&self, job_id: JobId) -> Result<Option<Job>> {
    let job = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {JOB_COLUMNS} FROM jobs j WHERE j.job_id = ?1"),
              rusqlite::params![job_id],
              job_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(job)
  }

  async fn get_assignment(&self, id: AssignmentId) -> Result<Option<Assignment>> {
    let raw: Option<RawAssignment> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ASSIGNMENT_COLUMNS} FROM assignments a WHERE a.assignment_id = ?1"
              ),
              rusqlite::params![id],
              RawAssignment::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAssignment::into_assignment).transpose()
  }

  async fn insert_assignment(&self, input: NewAssignment) -> Result<Checked<AssignmentId>> {
    let start_date_str = encode_date(input.start_date);
    let end_date_str   = input.end_date.map(encode_date);
    let status_str     = String::from(input.status);

    let outcome = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO assignments (
             employee_id, job_id, contract_id,
             start_date, end_date, status, assigned_salary
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            input.employee_id,
            input.job_id,
            input.contract_id,
            start_date_str,
            end_date_str,
            status_str,
            input.assigned_salary,
          ],
        );
        checked(inserted.map(|_| conn.last_insert_rowid()), on_assignment_write)
      })
      .await?;

    Ok(outcome)
  }

  async fn update_assignment_status(
    &self,
    id:       AssignmentId,
    status:   AssignmentStatus,
    end_date: NaiveDate,
  ) -> Result<Checked<u64>> {
    let status_str   = String::from(status);
    let end_date_str = encode_date(end_date);

    let outcome = self
      .conn
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE assignments SET status = ?1, end_date = ?2 WHERE assignment_id = ?3",
          rusqlite::params![status_str, end_date_str, id],
        );
        checked(updated.map(|n| n as u64), on_assignment_write)
      })
      .await?;

    Ok(outcome)
  }

  async fn list_assignments(&self, employee_id: Option<&str>) -> Result<Vec<AssignmentDetail>> {
    let employee_id = employee_id.map(str::to_owned);

    let raws: Vec<RawAssignmentDetail> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ASSIGNMENT_COLUMNS},
                  e.first_name, e.last_name, j.job_title, j.job_code, d.department_name
           FROM assignments a
           JOIN jobs      j ON j.job_id      = a.job_id
           JOIN employees e ON e.employee_id = a.employee_id
           LEFT JOIN departments d ON d.department_id = j.department_id
           WHERE ?1 IS NULL OR a.employee_id = ?1
           ORDER BY a.start_date DESC, a.assignment_id DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![employee_id], RawAssignmentDetail::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAssignmentDetail::into_detail).collect()
  }
}

// ─── DirectoryStore impl ─────────────────────────────────────────────────────

impl DirectoryStore for SqliteStore {
  // ── Employees ─────────────────────────────────────────────────────────────

  async fn insert_employee(&self, employee: Employee) -> Result<Checked<()>> {
    let dob_str = employee.date_of_birth.map(encode_date);

    let outcome = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO employees (
             employee_id, first_name, middle_name, last_name, gender, nationality,
             date_of_birth, employment_status, mobile_phone, work_email, personal_email
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            employee.employee_id,
            employee.first_name,
            employee.middle_name,
            employee.last_name,
            employee.gender,
            employee.nationality,
            dob_str,
            employee.employment_status,
            employee.mobile_phone,
            employee.work_email,
            employee.personal_email,
          ],
        );
        checked(inserted.map(|_| ()), on_insert)
      })
      .await?;

    Ok(outcome)
  }

  async fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>> {
    let employee_id = employee_id.to_owned();

    let raw: Option<RawEmployee> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees e WHERE e.employee_id = ?1"),
              rusqlite::params![employee_id],
              RawEmployee::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEmployee::into_employee).transpose()
  }

  async fn list_employees(&self) -> Result<Vec<EmployeeSummary>> {
    let raws: Vec<RawEmployeeSummary> = self
      .conn
      .call(|conn| {
        // The partial unique index guarantees at most one joined row per
        // employee.
        let mut stmt = conn.prepare(&format!(
          "SELECT {EMPLOYEE_COLUMNS}, j.job_title, d.department_name
           FROM employees e
           LEFT JOIN assignments a ON a.employee_id = e.employee_id AND a.status = 'Active'
           LEFT JOIN jobs        j ON j.job_id = a.job_id
           LEFT JOIN departments d ON d.department_id = j.department_id
           ORDER BY e.employee_id"
        ))?;
        let rows = stmt
          .query_map([], RawEmployeeSummary::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEmployeeSummary::into_summary).collect()
  }

  async fn save_employee(&self, employee: Employee) -> Result<u64> {
    let dob_str = employee.date_of_birth.map(encode_date);

    let updated = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE employees SET
             first_name = ?2, middle_name = ?3, last_name = ?4, gender = ?5,
             nationality = ?6, date_of_birth = ?7, employment_status = ?8,
             mobile_phone = ?9, work_email = ?10, personal_email = ?11
           WHERE employee_id = ?1",
          rusqlite::params![
            employee.employee_id,
            employee.first_name,
            employee.middle_name,
            employee.last_name,
            employee.gender,
            employee.nationality,
            dob_str,
            employee.employment_status,
            employee.mobile_phone,
            employee.work_email,
            employee.personal_email,
          ],
        )?;
        Ok(n as u64)
      })
      .await?;

    Ok(updated)
  }

  async fn delete_employee(&self, employee_id: &str) -> Result<Checked<u64>> {
    let employee_id = employee_id.to_owned();

    let outcome = self
      .conn
      .call(move |conn| {
        let deleted = conn.execute(
          "DELETE FROM employees WHERE employee_id = ?1",
          rusqlite::params![employee_id],
        );
        checked(deleted.map(|n| n as u64), on_delete)
      })
      .await?;

    Ok(outcome)
  }

  // ── Departments ───────────────────────────────────────────────────────────

  async fn insert_department(&self, input: NewDepartment) -> Result<DepartmentId> {
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO departments (department_name, department_type, location, contact_email)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            input.department_name,
            input.department_type,
            input.location,
            input.contact_email,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(id)
  }

  async fn get_department(&self, id: DepartmentId) -> Result<Option<Department>> {
    let department = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {DEPARTMENT_COLUMNS} FROM departments d WHERE d.department_id = ?1"
              ),
              rusqlite::params![id],
              department_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(department)
  }

  async fn list_departments(&self) -> Result<Vec<Department>> {
    let departments = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {DEPARTMENT_COLUMNS} FROM departments d ORDER BY d.department_id"
        ))?;
        let rows = stmt
          .query_map([], department_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(departments)
  }

  async fn save_department(&self, department: Department) -> Result<u64> {
    let updated = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE departments SET
             department_name = ?2, department_type = ?3, location = ?4, contact_email = ?5
           WHERE department_id = ?1",
          rusqlite::params![
            department.department_id,
            department.department_name,
            department.department_type,
            department.location,
            department.contact_email,
          ],
        )?;
        Ok(n as u64)
      })
      .await?;

    Ok(updated)
  }

  async fn delete_department(&self, id: DepartmentId) -> Result<Checked<u64>> {
    let outcome = self
      .conn
      .call(move |conn| {
        let deleted = conn.execute(
          "DELETE FROM departments WHERE department_id = ?1",
          rusqlite::params![id],
        );
        checked(deleted.map(|n| n as u64), on_delete)
      })
      .await?;

    Ok(outcome)
  }

  // ── Jobs ──────────────────────────────────────────────────────────────────

  async fn insert_job(&self, input: NewJob) -> Result<Checked<JobId>> {
    let outcome = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO jobs (
             job_code, job_title, job_level, job_category, min_salary, max_salary,
             job_description, status, department_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            input.job_code,
            input.job_title,
            input.job_level,
            input.job_category,
            input.min_salary,
            input.max_salary,
            input.job_description,
            input.status,
            input.department_id,
          ],
        );
        checked(inserted.map(|_| conn.last_insert_rowid()), on_insert)
      })
      .await?;

    Ok(outcome)
  }

  async fn list_jobs(&self) -> Result<Vec<JobSummary>> {
    let jobs = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {JOB_COLUMNS}, d.department_name,
                  (SELECT COUNT(*) FROM assignments a
                   WHERE a.job_id = j.job_id AND a.status = 'Active') AS assigned_count
           FROM jobs j
           LEFT JOIN departments d ON d.department_id = j.department_id
           ORDER BY j.job_id"
        ))?;
        let rows = stmt
          .query_map([], job_summary_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(jobs)
  }

  async fn save_job(&self, job: Job) -> Result<Checked<u64>> {
    let outcome = self
      .conn
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE jobs SET
             job_code = ?2, job_title = ?3, job_level = ?4, job_category = ?5,
             min_salary = ?6, max_salary = ?7, job_description = ?8, status = ?9,
             department_id = ?10
           WHERE job_id = ?1",
          rusqlite::params![
            job.job_id,
            job.job_code,
            job.job_title,
            job.job_level,
            job.job_category,
            job.min_salary,
            job.max_salary,
            job.job_description,
            job.status,
            job.department_id,
          ],
        );
        checked(updated.map(|n| n as u64), on_insert)
      })
      .await?;

    Ok(outcome)
  }

  async fn delete_job(&self, id: JobId) -> Result<Checked<u64>> {
    let outcome = self
      .conn
      .call(move |conn| {
        let deleted = conn.execute("DELETE FROM jobs WHERE job_id = ?1", rusqlite::params![id]);
        checked(deleted.map(|n| n as u64), on_delete)
      })
      .await?;

    Ok(outcome)
  }

  // ── Training ──────────────────────────────────────────────────────────────

  async fn list_training_programs(&self) -> Result<Vec<ProgramSummary>> {
    let programs = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROGRAM_COLUMNS},
                  (SELECT COUNT(*) FROM employee_training et
                   WHERE et.program_id = tp.program_id) AS enrolled_count
           FROM training_programs tp
           ORDER BY tp.program_id"
        ))?;
        let rows = stmt
          .query_map([], program_summary_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(programs)
  }

  async fn insert_training_program(&self, input: NewTrainingProgram) -> Result<Checked<ProgramId>> {
    let approval_status = input.approval_status().to_owned();

    let outcome = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO training_programs (
             program_code, title, objectives, program_type, subtype,
             delivery_method, approval_status
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            input.program_code,
            input.title,
            input.objectives,
            input.program_type,
            input.subtype,
            input.delivery_method,
            approval_status,
          ],
        );
        checked(inserted.map(|_| conn.last_insert_rowid()), on_insert)
      })
      .await?;

    Ok(outcome)
  }

  async fn enroll_employee(
    &self,
    employee_id: String,
    program_id:  ProgramId,
  ) -> Result<Checked<EnrollmentId>> {
    let outcome = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO employee_training (employee_id, program_id, completion_status)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![employee_id, program_id, ENROLLED_STATUS],
        );
        checked(inserted.map(|_| conn.last_insert_rowid()), on_insert)
      })
      .await?;

    Ok(outcome)
  }

  async fn list_enrollments(&self) -> Result<Vec<EnrollmentDetail>> {
    let enrollments = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ENROLLMENT_COLUMNS}, tp.title, tp.program_code,
                  e.first_name || ' ' || e.last_name AS employee_name
           FROM employee_training et
           JOIN training_programs tp ON tp.program_id  = et.program_id
           JOIN employees         e  ON e.employee_id  = et.employee_id
           ORDER BY et.enrollment_id"
        ))?;
        let rows = stmt
          .query_map([], enrollment_detail_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(enrollments)
  }

  // ── Performance ───────────────────────────────────────────────────────────

  async fn list_performance_cycles(&self) -> Result<Vec<PerformanceCycle>> {
    let raws: Vec<RawCycle> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CYCLE_COLUMNS} FROM performance_cycles pc
           ORDER BY pc.start_date DESC, pc.cycle_id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawCycle::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCycle::into_cycle).collect()
  }

  async fn insert_performance_cycle(&self, input: NewPerformanceCycle) -> Result<CycleId> {
    let start_date_str = encode_date(input.start_date);
    let end_date_str   = encode_date(input.end_date);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO performance_cycles (cycle_name, start_date, end_date)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![input.cycle_name, start_date_str, end_date_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(id)
  }

  async fn insert_appraisal(&self, input: NewAppraisal) -> Result<Checked<AppraisalId>> {
    let appraisal_date_str = input.appraisal_date.map(encode_date);

    let outcome = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO appraisals (
             assignment_id, cycle_id, appraisal_date, overall_score,
             manager_comments, hr_comments, employee_comments, reviewer_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            input.assignment_id,
            input.cycle_id,
            appraisal_date_str,
            input.overall_score,
            input.manager_comments,
            input.hr_comments,
            input.employee_comments,
            input.reviewer_id,
          ],
        );
        checked(inserted.map(|_| conn.last_insert_rowid()), on_insert)
      })
      .await?;

    Ok(outcome)
  }

  async fn list_appraisals(&self) -> Result<Vec<AppraisalDetail>> {
    let raws: Vec<RawAppraisalDetail> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {APPRAISAL_COLUMNS},
                  e.first_name || ' ' || e.last_name AS employee_name,
                  j.job_title, pc.cycle_name
           FROM appraisals ap
           LEFT JOIN assignments        a  ON a.assignment_id = ap.assignment_id
           LEFT JOIN employees          e  ON e.employee_id   = a.employee_id
           LEFT JOIN jobs               j  ON j.job_id        = a.job_id
           LEFT JOIN performance_cycles pc ON pc.cycle_id     = ap.cycle_id
           ORDER BY ap.appraisal_id"
        ))?;
        let rows = stmt
          .query_map([], RawAppraisalDetail::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAppraisalDetail::into_detail).collect()
  }
}
