//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use hrms_core::{
  GuardError,
  assignment::{AssignmentRequest, AssignmentStatus, JobId, NewAssignment, StatusChange},
  guard::AssignmentGuard,
  performance::{NewAppraisal, NewPerformanceCycle},
  record::{Employee, NewDepartment, NewJob},
  store::{ConstraintViolation, DirectoryStore, RecordStore},
  training::{NewTrainingProgram, ProgramId},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(s: &str) -> NaiveDate { NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap() }

fn employee(id: &str, first: &str, last: &str) -> Employee {
  Employee {
    employee_id:       id.into(),
    first_name:        first.into(),
    middle_name:       None,
    last_name:         last.into(),
    gender:            None,
    nationality:       None,
    date_of_birth:     Some(date("1990-04-12")),
    employment_status: "Active".into(),
    mobile_phone:      None,
    work_email:        Some(format!("{}@example.com", first.to_lowercase())),
    personal_email:    None,
  }
}

fn new_job(code: &str, title: &str, department_id: Option<i64>) -> NewJob {
  NewJob {
    job_code:        code.into(),
    job_title:       title.into(),
    job_level:       Some("L2".into()),
    job_category:    None,
    min_salary:      50_000.0,
    max_salary:      90_000.0,
    job_description: None,
    status:          "Active".into(),
    department_id,
  }
}

fn new_assignment(employee_id: &str, job_id: JobId, start: &str, status: AssignmentStatus) -> NewAssignment {
  NewAssignment {
    employee_id:     employee_id.into(),
    job_id,
    contract_id:     None,
    start_date:      date(start),
    end_date:        None,
    status,
    assigned_salary: Some(60_000.0),
  }
}

/// A store holding employees E100 and E200 and one job in Engineering.
async fn seeded() -> (SqliteStore, JobId) {
  let s = store().await;
  let dept = s
    .insert_department(NewDepartment {
      department_name: "Engineering".into(),
      department_type: None,
      location:        Some("Floor 3".into()),
      contact_email:   None,
    })
    .await
    .unwrap();
  s.insert_employee(employee("E100", "Ada", "Lovelace")).await.unwrap().unwrap();
  s.insert_employee(employee("E200", "Alan", "Turing")).await.unwrap().unwrap();
  let job = s.insert_job(new_job("ENG-2", "Engineer", Some(dept))).await.unwrap().unwrap();
  (s, job)
}

// ─── Assignments ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_assignment() {
  let (s, job) = seeded().await;

  let id = s
    .insert_assignment(new_assignment("E100", job, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();

  let fetched = s.get_assignment(id).await.unwrap().unwrap();
  assert_eq!(fetched.assignment_id, id);
  assert_eq!(fetched.employee_id, "E100");
  assert_eq!(fetched.start_date, date("2024-01-01"));
  assert_eq!(fetched.end_date, None);
  assert_eq!(fetched.status, AssignmentStatus::Active);
  assert_eq!(fetched.assigned_salary, Some(60_000.0));
}

#[tokio::test]
async fn get_assignment_missing_returns_none() {
  let s = store().await;
  assert!(s.get_assignment(42).await.unwrap().is_none());
}

#[tokio::test]
async fn find_active_assignment_ignores_other_statuses() {
  let (s, job) = seeded().await;
  s.insert_assignment(new_assignment("E100", job, "2022-01-01", AssignmentStatus::Terminated))
    .await
    .unwrap()
    .unwrap();
  assert!(s.find_active_assignment("E100").await.unwrap().is_none());

  let id = s
    .insert_assignment(new_assignment("E100", job, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();
  let active = s.find_active_assignment("E100").await.unwrap().unwrap();
  assert_eq!(active.assignment_id, id);
}

#[tokio::test]
async fn unique_index_rejects_second_active_assignment() {
  let (s, job) = seeded().await;
  s.insert_assignment(new_assignment("E100", job, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();

  let second = s
    .insert_assignment(new_assignment("E100", job, "2024-06-01", AssignmentStatus::Active))
    .await
    .unwrap();
  assert_eq!(second, Err(ConstraintViolation::ActiveTenure));
}

#[tokio::test]
async fn unique_index_allows_many_inactive_assignments() {
  let (s, job) = seeded().await;
  for (start, status) in [
    ("2020-01-01", AssignmentStatus::Terminated),
    ("2021-01-01", AssignmentStatus::Terminated),
    ("2022-01-01", AssignmentStatus::Probation),
    ("2023-01-01", AssignmentStatus::Probation),
    ("2024-01-01", AssignmentStatus::Active),
  ] {
    s.insert_assignment(new_assignment("E100", job, start, status))
      .await
      .unwrap()
      .unwrap();
  }
  assert_eq!(s.list_assignments(Some("E100")).await.unwrap().len(), 5);
}

#[tokio::test]
async fn insert_assignment_with_unknown_job_is_unknown_reference() {
  let (s, _) = seeded().await;
  let outcome = s
    .insert_assignment(new_assignment("E100", 999, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap();
  assert_eq!(outcome, Err(ConstraintViolation::UnknownReference));
}

#[tokio::test]
async fn insert_assignment_with_unknown_employee_is_unknown_reference() {
  let (s, job) = seeded().await;
  let outcome = s
    .insert_assignment(new_assignment("E999", job, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap();
  assert_eq!(outcome, Err(ConstraintViolation::UnknownReference));
}

#[tokio::test]
async fn update_status_sets_status_and_end_date() {
  let (s, job) = seeded().await;
  let id = s
    .insert_assignment(new_assignment("E100", job, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();

  let updated = s
    .update_assignment_status(id, AssignmentStatus::Terminated, date("2024-12-31"))
    .await
    .unwrap();
  assert_eq!(updated, Ok(1));

  let fetched = s.get_assignment(id).await.unwrap().unwrap();
  assert_eq!(fetched.status, AssignmentStatus::Terminated);
  assert_eq!(fetched.end_date, Some(date("2024-12-31")));
  assert!(s.find_active_assignment("E100").await.unwrap().is_none());
}

#[tokio::test]
async fn update_status_of_missing_assignment_touches_nothing() {
  let s = store().await;
  let updated = s
    .update_assignment_status(7, AssignmentStatus::Terminated, date("2024-12-31"))
    .await
    .unwrap();
  assert_eq!(updated, Ok(0));
}

#[tokio::test]
async fn update_status_to_active_respects_unique_index() {
  let (s, job) = seeded().await;
  s.insert_assignment(new_assignment("E100", job, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();
  let probation = s
    .insert_assignment(new_assignment("E100", job, "2024-02-01", AssignmentStatus::Probation))
    .await
    .unwrap()
    .unwrap();

  let outcome = s
    .update_assignment_status(probation, AssignmentStatus::Active, date("2024-03-01"))
    .await
    .unwrap();
  assert_eq!(outcome, Err(ConstraintViolation::ActiveTenure));
}

#[tokio::test]
async fn list_assignments_joins_and_orders_newest_first() {
  let (s, job) = seeded().await;
  s.insert_assignment(new_assignment("E100", job, "2021-03-01", AssignmentStatus::Terminated))
    .await
    .unwrap()
    .unwrap();
  s.insert_assignment(new_assignment("E200", job, "2024-05-01", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();
  s.insert_assignment(new_assignment("E100", job, "2023-07-15", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();

  let all = s.list_assignments(None).await.unwrap();
  let starts: Vec<_> = all.iter().map(|d| d.assignment.start_date).collect();
  assert_eq!(starts, vec![date("2024-05-01"), date("2023-07-15"), date("2021-03-01")]);

  let first = &all[0];
  assert_eq!(first.first_name, "Alan");
  assert_eq!(first.last_name, "Turing");
  assert_eq!(first.job_title, "Engineer");
  assert_eq!(first.job_code, "ENG-2");
  assert_eq!(first.department_name.as_deref(), Some("Engineering"));

  let ada = s.list_assignments(Some("E100")).await.unwrap();
  assert_eq!(ada.len(), 2);
  assert!(ada.iter().all(|d| d.assignment.employee_id == "E100"));
  assert_eq!(ada[0].assignment.start_date, date("2023-07-15"));
}

#[tokio::test]
async fn list_assignments_for_unknown_employee_is_empty() {
  let (s, _) = seeded().await;
  assert!(s.list_assignments(Some("E999")).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_assignments_without_department_keeps_row() {
  let (s, _) = seeded().await;
  let orphan = s.insert_job(new_job("OPS-1", "Operator", None)).await.unwrap().unwrap();
  s.insert_assignment(new_assignment("E200", orphan, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();

  let rows = s.list_assignments(Some("E200")).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].department_name, None);
}

// ─── Guard over SQLite ───────────────────────────────────────────────────────

fn request(employee_id: &str, job_id: JobId, start: &str) -> AssignmentRequest {
  AssignmentRequest {
    employee_id: Some(employee_id.into()),
    job_id: Some(job_id),
    start_date: Some(start.into()),
    assigned_salary: Some(65_000.0),
    ..Default::default()
  }
}

#[tokio::test]
async fn concurrent_creates_admit_exactly_one_active_assignment() {
  let (s, job) = seeded().await;
  let guard = AssignmentGuard::new(&s);

  let (a, b) = tokio::join!(
    guard.create_assignment(request("E100", job, "2024-01-01")),
    guard.create_assignment(request("E100", job, "2024-02-01")),
  );

  let outcomes = [a, b];
  assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
  assert!(
    outcomes
      .iter()
      .any(|r| matches!(r, Err(GuardError::Conflict(_))))
  );

  let active: Vec<_> = s
    .list_assignments(Some("E100"))
    .await
    .unwrap()
    .into_iter()
    .filter(|d| d.assignment.status.is_active())
    .collect();
  assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn guard_maps_unknown_employee_to_not_found() {
  let (s, job) = seeded().await;
  let err = AssignmentGuard::new(&s)
    .create_assignment(request("E999", job, "2024-01-01"))
    .await
    .unwrap_err();
  assert!(matches!(err, GuardError::NotFound(_)), "{err:?}");
}

#[tokio::test]
async fn guard_terminate_then_reassign() {
  let (s, job) = seeded().await;
  let guard = AssignmentGuard::new(&s);

  let first = guard
    .create_assignment(request("E100", job, "2023-01-01"))
    .await
    .unwrap();
  guard
    .update_assignment_status(first, StatusChange {
      status:   Some("Terminated".into()),
      end_date: Some("2023-12-31".into()),
    })
    .await
    .unwrap();

  let second = guard
    .create_assignment(request("E100", job, "2024-01-01"))
    .await
    .unwrap();
  assert_ne!(first, second);

  let active = s.find_active_assignment("E100").await.unwrap().unwrap();
  assert_eq!(active.assignment_id, second);
}

// ─── Employees ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_employee() {
  let (s, _) = seeded().await;
  let fetched = s.get_employee("E100").await.unwrap().unwrap();
  assert_eq!(fetched, employee("E100", "Ada", "Lovelace"));
  assert!(s.get_employee("E999").await.unwrap().is_none());
}

#[tokio::test]
async fn insert_duplicate_employee_is_duplicate_key() {
  let (s, _) = seeded().await;
  let outcome = s.insert_employee(employee("E100", "Other", "Person")).await.unwrap();
  assert_eq!(outcome, Err(ConstraintViolation::DuplicateKey));
}

#[tokio::test]
async fn list_employees_shows_active_job() {
  let (s, job) = seeded().await;
  s.insert_assignment(new_assignment("E100", job, "2020-01-01", AssignmentStatus::Terminated))
    .await
    .unwrap()
    .unwrap();
  s.insert_assignment(new_assignment("E100", job, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();

  let all = s.list_employees().await.unwrap();
  assert_eq!(all.len(), 2);

  let ada = all.iter().find(|e| e.employee.employee_id == "E100").unwrap();
  assert_eq!(ada.job_title.as_deref(), Some("Engineer"));
  assert_eq!(ada.department_name.as_deref(), Some("Engineering"));

  let alan = all.iter().find(|e| e.employee.employee_id == "E200").unwrap();
  assert_eq!(alan.job_title, None);
}

#[tokio::test]
async fn save_employee_overwrites_row() {
  let (s, _) = seeded().await;
  let mut ada = s.get_employee("E100").await.unwrap().unwrap();
  ada.mobile_phone = Some("+44 20 7946 0000".into());
  assert_eq!(s.save_employee(ada.clone()).await.unwrap(), 1);
  assert_eq!(s.get_employee("E100").await.unwrap().unwrap(), ada);

  assert_eq!(s.save_employee(employee("E999", "No", "Body")).await.unwrap(), 0);
}

#[tokio::test]
async fn delete_employee_with_assignments_is_still_referenced() {
  let (s, job) = seeded().await;
  s.insert_assignment(new_assignment("E100", job, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();

  assert_eq!(
    s.delete_employee("E100").await.unwrap(),
    Err(ConstraintViolation::StillReferenced)
  );
  assert_eq!(s.delete_employee("E200").await.unwrap(), Ok(1));
  assert_eq!(s.delete_employee("E200").await.unwrap(), Ok(0));
}

// ─── Departments ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn department_crud() {
  let s = store().await;
  let id = s
    .insert_department(NewDepartment {
      department_name: "Finance".into(),
      department_type: Some("Support".into()),
      location:        None,
      contact_email:   None,
    })
    .await
    .unwrap();

  let mut dept = s.get_department(id).await.unwrap().unwrap();
  assert_eq!(dept.department_name, "Finance");

  dept.location = Some("Floor 1".into());
  assert_eq!(s.save_department(dept.clone()).await.unwrap(), 1);
  assert_eq!(s.list_departments().await.unwrap(), vec![dept]);

  assert_eq!(s.delete_department(id).await.unwrap(), Ok(1));
  assert!(s.get_department(id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_department_with_jobs_is_still_referenced() {
  let (s, job) = seeded().await;
  let dept = s.get_job(job).await.unwrap().unwrap().department_id.unwrap();
  assert_eq!(
    s.delete_department(dept).await.unwrap(),
    Err(ConstraintViolation::StillReferenced)
  );
}

// ─── Jobs ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_job_reads_salary_band() {
  let (s, job) = seeded().await;
  let fetched = s.get_job(job).await.unwrap().unwrap();
  assert_eq!(fetched.job_code, "ENG-2");
  assert_eq!(fetched.min_salary, 50_000.0);
  assert_eq!(fetched.max_salary, 90_000.0);
  assert!(s.get_job(999).await.unwrap().is_none());
}

#[tokio::test]
async fn insert_job_with_duplicate_code_is_duplicate_key() {
  let (s, _) = seeded().await;
  let outcome = s.insert_job(new_job("ENG-2", "Another", None)).await.unwrap();
  assert_eq!(outcome, Err(ConstraintViolation::DuplicateKey));
}

#[tokio::test]
async fn insert_job_with_unknown_department_is_unknown_reference() {
  let s = store().await;
  let outcome = s.insert_job(new_job("ENG-9", "Engineer", Some(77))).await.unwrap();
  assert_eq!(outcome, Err(ConstraintViolation::UnknownReference));
}

#[tokio::test]
async fn list_jobs_counts_active_assignments() {
  let (s, job) = seeded().await;
  s.insert_assignment(new_assignment("E100", job, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();
  s.insert_assignment(new_assignment("E200", job, "2022-01-01", AssignmentStatus::Terminated))
    .await
    .unwrap()
    .unwrap();

  let jobs = s.list_jobs().await.unwrap();
  assert_eq!(jobs.len(), 1);
  assert_eq!(jobs[0].assigned_count, 1);
  assert_eq!(jobs[0].department_name.as_deref(), Some("Engineering"));
}

#[tokio::test]
async fn save_job_updates_band_and_rejects_duplicate_code() {
  let (s, job) = seeded().await;
  s.insert_job(new_job("OPS-1", "Operator", None)).await.unwrap().unwrap();

  let mut fetched = s.get_job(job).await.unwrap().unwrap();
  fetched.max_salary = 120_000.0;
  assert_eq!(s.save_job(fetched.clone()).await.unwrap(), Ok(1));
  assert_eq!(s.get_job(job).await.unwrap().unwrap().max_salary, 120_000.0);

  fetched.job_code = "OPS-1".into();
  assert_eq!(
    s.save_job(fetched).await.unwrap(),
    Err(ConstraintViolation::DuplicateKey)
  );
}

#[tokio::test]
async fn delete_job_with_assignments_is_still_referenced() {
  let (s, job) = seeded().await;
  s.insert_assignment(new_assignment("E100", job, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(
    s.delete_job(job).await.unwrap(),
    Err(ConstraintViolation::StillReferenced)
  );
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_file_store_keeps_rows() {
  let dir = std::env::temp_dir().join(format!("hrms-store-test-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("hrms.db");
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert_employee(employee("E100", "Ada", "Lovelace")).await.unwrap().unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.get_employee("E100").await.unwrap().is_some());

  let _ = std::fs::remove_dir_all(&dir);
}

// ─── Training ────────────────────────────────────────────────────────────────

fn program(code: &str, title: &str) -> NewTrainingProgram {
  NewTrainingProgram {
    program_code: Some(code.into()),
    title: Some(title.into()),
    delivery_method: Some("Online".into()),
    ..Default::default()
  }
}

async fn insert_program(s: &SqliteStore, code: &str) -> ProgramId {
  s.insert_training_program(program(code, "Site safety"))
    .await
    .unwrap()
    .unwrap()
}

#[tokio::test]
async fn training_programs_count_enrollments() {
  let (s, _) = seeded().await;
  let safety = insert_program(&s, "SAFE-1").await;
  let rust = insert_program(&s, "RUST-1").await;

  s.enroll_employee("E100".into(), safety).await.unwrap().unwrap();
  s.enroll_employee("E200".into(), safety).await.unwrap().unwrap();

  let programs = s.list_training_programs().await.unwrap();
  assert_eq!(programs.len(), 2);
  let count = |id| programs.iter().find(|p| p.program.program_id == id).unwrap().enrolled_count;
  assert_eq!(count(safety), 2);
  assert_eq!(count(rust), 0);
  assert_eq!(programs[0].program.approval_status, "Pending");
}

#[tokio::test]
async fn duplicate_program_code_is_duplicate_key() {
  let s = store().await;
  insert_program(&s, "SAFE-1").await;
  let outcome = s.insert_training_program(program("SAFE-1", "Again")).await.unwrap();
  assert_eq!(outcome, Err(ConstraintViolation::DuplicateKey));
}

#[tokio::test]
async fn enrollment_checks_references_and_duplicates() {
  let (s, _) = seeded().await;
  let safety = insert_program(&s, "SAFE-1").await;

  let outcome = s.enroll_employee("E999".into(), safety).await.unwrap();
  assert_eq!(outcome, Err(ConstraintViolation::UnknownReference));
  let outcome = s.enroll_employee("E100".into(), safety + 100).await.unwrap();
  assert_eq!(outcome, Err(ConstraintViolation::UnknownReference));

  s.enroll_employee("E100".into(), safety).await.unwrap().unwrap();
  let outcome = s.enroll_employee("E100".into(), safety).await.unwrap();
  assert_eq!(outcome, Err(ConstraintViolation::DuplicateKey));
}

#[tokio::test]
async fn list_enrollments_joins_program_and_employee() {
  let (s, _) = seeded().await;
  let safety = insert_program(&s, "SAFE-1").await;
  s.enroll_employee("E100".into(), safety).await.unwrap().unwrap();

  let rows = s.list_enrollments().await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].enrollment.completion_status, "In Progress");
  assert_eq!(rows[0].program_code, "SAFE-1");
  assert_eq!(rows[0].employee_name, "Ada Lovelace");

  // Enrolled employees cannot be deleted.
  let outcome = s.delete_employee("E100").await.unwrap();
  assert_eq!(outcome, Err(ConstraintViolation::StillReferenced));
}

// ─── Performance ─────────────────────────────────────────────────────────────

fn appraisal(assignment_id: i64, cycle_id: Option<i64>) -> NewAppraisal {
  NewAppraisal {
    assignment_id,
    cycle_id,
    appraisal_date: Some(date("2024-06-30")),
    overall_score: Some(4.2),
    manager_comments: Some("Steady".into()),
    hr_comments: None,
    employee_comments: None,
    reviewer_id: Some("E200".into()),
  }
}

#[tokio::test]
async fn cycles_list_newest_first() {
  let s = store().await;
  for (name, start, end) in [("H1", "2024-01-01", "2024-06-30"), ("H2", "2024-07-01", "2024-12-31")] {
    s.insert_performance_cycle(NewPerformanceCycle {
      cycle_name: name.into(),
      start_date: date(start),
      end_date:   date(end),
    })
    .await
    .unwrap();
  }

  let cycles = s.list_performance_cycles().await.unwrap();
  assert_eq!(cycles.len(), 2);
  assert_eq!(cycles[0].cycle_name, "H2");
  assert_eq!(cycles[1].end_date, date("2024-06-30"));
}

#[tokio::test]
async fn appraisal_is_joined_through_its_assignment() {
  let (s, job) = seeded().await;
  let assignment = s
    .insert_assignment(new_assignment("E100", job, "2024-01-01", AssignmentStatus::Active))
    .await
    .unwrap()
    .unwrap();
  let cycle = s
    .insert_performance_cycle(NewPerformanceCycle {
      cycle_name: "H1 2024".into(),
      start_date: date("2024-01-01"),
      end_date:   date("2024-06-30"),
    })
    .await
    .unwrap();

  s.insert_appraisal(appraisal(assignment, Some(cycle))).await.unwrap().unwrap();
  s.insert_appraisal(appraisal(assignment, None)).await.unwrap().unwrap();

  let rows = s.list_appraisals().await.unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].employee_name.as_deref(), Some("Ada Lovelace"));
  assert_eq!(rows[0].job_title.as_deref(), Some("Engineer"));
  assert_eq!(rows[0].cycle_name.as_deref(), Some("H1 2024"));
  assert_eq!(rows[0].appraisal.appraisal_date, Some(date("2024-06-30")));
  assert_eq!(rows[1].cycle_name, None);
}

#[tokio::test]
async fn appraisal_with_unknown_assignment_is_unknown_reference() {
  let (s, _) = seeded().await;
  let outcome = s.insert_appraisal(appraisal(404, None)).await.unwrap();
  assert_eq!(outcome, Err(ConstraintViolation::UnknownReference));
}
