//! The assignment lifecycle guard.
//!
//! Every create and status change of an assignment passes through
//! [`AssignmentGuard`], which validates the request against the store's
//! current state and then commits through a store write that re-checks the
//! active-tenure invariant atomically. The guard holds no state of its own
//! between requests.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::{
  GuardError,
  assignment::{
    AssignmentDetail, AssignmentId, AssignmentRequest, AssignmentStatus,
    NewAssignment, StatusChange,
  },
  form::parse_date,
  store::{ConstraintViolation, RecordStore},
};

pub const ACTIVE_TENURE_CONFLICT: &str = "Employee already has an active assignment. \
                                          Please terminate the current assignment first.";

type GuardResult<T, S> = Result<T, GuardError<<S as RecordStore>::Error>>;

/// Validates and commits assignment writes against a [`RecordStore`].
///
/// Cheap to construct; build one per request.
pub struct AssignmentGuard<'s, S> {
  store: &'s S,
}

impl<'s, S: RecordStore> AssignmentGuard<'s, S> {
  pub fn new(store: &'s S) -> Self { Self { store } }

  /// Validate `request` and persist it as a new assignment.
  ///
  /// Checks run in order and the first failure wins: required fields, date
  /// order, active tenure (only for `Active`), salary band (only when a
  /// salary is given). Returns the generated assignment id.
  pub async fn create_assignment(
    &self,
    request: AssignmentRequest,
  ) -> GuardResult<AssignmentId, S> {
    let input = resolve_request(request)?;

    if input.status.is_active() {
      let existing = self
        .store
        .find_active_assignment(&input.employee_id)
        .await
        .map_err(GuardError::Store)?;
      if let Some(existing) = existing {
        debug!(
          employee_id = %input.employee_id,
          existing = existing.assignment_id,
          "create rejected: employee already has an active assignment"
        );
        return Err(GuardError::conflict(ACTIVE_TENURE_CONFLICT));
      }
    }

    if let Some(salary) = input.assigned_salary {
      let job = self
        .store
        .get_job(input.job_id)
        .await
        .map_err(GuardError::Store)?
        .ok_or_else(|| GuardError::not_found("Job not found"))?;
      let band = job
        .salary_band()
        .map_err(|e| GuardError::validation(e.to_string()))?;
      if !band.contains(salary) {
        debug!(job_id = job.job_id, salary, "create rejected: salary outside band");
        return Err(GuardError::validation(format!(
          "Salary must be between {} and {} for {}",
          band.min(),
          band.max(),
          job.job_title
        )));
      }
    }

    let employee_id = input.employee_id.clone();
    let job_id = input.job_id;
    match self
      .store
      .insert_assignment(input)
      .await
      .map_err(GuardError::Store)?
    {
      Ok(id) => {
        info!(assignment_id = id, %employee_id, job_id, "assignment created");
        Ok(id)
      }
      Err(violation) => Err(rejected(violation, "Employee or job not found")),
    }
  }

  /// Apply a status change (typically termination) to an existing
  /// assignment.
  ///
  /// `End_Date` defaults to today's UTC date. Terminated assignments are
  /// immutable, and moving an assignment back to `Active` is subject to the
  /// same active-tenure rule as creation.
  pub async fn update_assignment_status(
    &self,
    id: AssignmentId,
    change: StatusChange,
  ) -> GuardResult<(), S> {
    let status = change
      .status
      .map(AssignmentStatus::from)
      .ok_or_else(|| GuardError::validation("Status is required"))?;
    let end_date = match change.end_date {
      Some(raw) => parse_date(&raw)
        .ok_or_else(|| GuardError::validation("End Date must be a valid date"))?,
      None => today(),
    };

    let current = self
      .store
      .get_assignment(id)
      .await
      .map_err(GuardError::Store)?
      .ok_or_else(|| GuardError::not_found("Assignment not found"))?;

    if current.status.is_terminated() {
      debug!(assignment_id = id, "update rejected: assignment is terminated");
      return Err(GuardError::conflict(format!(
        "Assignment {id} is terminated and can no longer change status"
      )));
    }

    if status.is_active() && !current.status.is_active() {
      let existing = self
        .store
        .find_active_assignment(&current.employee_id)
        .await
        .map_err(GuardError::Store)?;
      if let Some(existing) = existing
        && existing.assignment_id != id
      {
        debug!(
          assignment_id = id,
          existing = existing.assignment_id,
          "update rejected: employee already has an active assignment"
        );
        return Err(GuardError::conflict(ACTIVE_TENURE_CONFLICT));
      }
    }

    match self
      .store
      .update_assignment_status(id, status.clone(), end_date)
      .await
      .map_err(GuardError::Store)?
    {
      Ok(0) => Err(GuardError::not_found("Assignment not found")),
      Ok(_) => {
        info!(assignment_id = id, %status, %end_date, "assignment status updated");
        Ok(())
      }
      Err(violation) => Err(rejected(violation, "Assignment not found")),
    }
  }

  /// Every assignment, newest `Start_Date` first.
  pub async fn list_assignments(&self) -> GuardResult<Vec<AssignmentDetail>, S> {
    self
      .store
      .list_assignments(None)
      .await
      .map_err(GuardError::Store)
  }

  /// The assignments of one employee, newest `Start_Date` first.
  pub async fn list_assignments_by_employee(
    &self,
    employee_id: &str,
  ) -> GuardResult<Vec<AssignmentDetail>, S> {
    self
      .store
      .list_assignments(Some(employee_id))
      .await
      .map_err(GuardError::Store)
  }
}

/// Steps 1 and 2 of creation: required fields, date parsing and date order.
/// Resolves every default.
fn resolve_request<E>(request: AssignmentRequest) -> Result<NewAssignment, GuardError<E>> {
  let AssignmentRequest {
    employee_id,
    job_id,
    contract_id,
    start_date,
    end_date,
    status,
    assigned_salary,
  } = request;

  let (Some(employee_id), Some(job_id), Some(start_date)) = (employee_id, job_id, start_date)
  else {
    return Err(GuardError::validation(
      "Employee, Job, and Start Date are required",
    ));
  };

  let start_date = parse_date(&start_date)
    .ok_or_else(|| GuardError::validation("Start Date must be a valid date"))?;
  let end_date: Option<NaiveDate> = end_date
    .map(|raw| {
      parse_date(&raw).ok_or_else(|| GuardError::validation("End Date must be a valid date"))
    })
    .transpose()?;

  if let Some(end) = end_date
    && end <= start_date
  {
    return Err(GuardError::validation("End Date must be after Start Date"));
  }

  Ok(NewAssignment {
    employee_id,
    job_id,
    contract_id,
    start_date,
    end_date,
    status: status.map(AssignmentStatus::from).unwrap_or_default(),
    assigned_salary,
  })
}

/// Map a constraint the store enforced at write time onto the taxonomy.
fn rejected<E>(violation: ConstraintViolation, missing: &str) -> GuardError<E> {
  debug!(?violation, "write rejected by store constraint");
  match violation {
    ConstraintViolation::ActiveTenure => GuardError::conflict(ACTIVE_TENURE_CONFLICT),
    ConstraintViolation::UnknownReference => GuardError::not_found(missing),
    ConstraintViolation::DuplicateKey | ConstraintViolation::StillReferenced => {
      GuardError::conflict(format!("write rejected: {violation:?}"))
    }
  }
}

fn today() -> NaiveDate { Utc::now().date_naive() }
