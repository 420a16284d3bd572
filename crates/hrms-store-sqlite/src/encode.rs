//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` strings, which also sort correctly.
//! Statuses are stored as their display strings.

use chrono::NaiveDate;
use hrms_core::{
  assignment::{Assignment, AssignmentDetail, AssignmentStatus},
  performance::{Appraisal, AppraisalDetail, PerformanceCycle},
  record::{Department, Employee, EmployeeSummary, Job, JobSummary},
  training::{Enrollment, EnrollmentDetail, ProgramSummary, TrainingProgram},
};
use rusqlite::Row;

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

fn decode_opt_date(s: Option<String>) -> Result<Option<NaiveDate>> {
  s.as_deref().map(decode_date).transpose()
}

// ─── Column lists ────────────────────────────────────────────────────────────
//
// Each list matches the field order read by the corresponding `from_row`.

pub const ASSIGNMENT_COLUMNS: &str = "a.assignment_id, a.employee_id, a.job_id, a.contract_id, \
                                      a.start_date, a.end_date, a.status, a.assigned_salary";

pub const EMPLOYEE_COLUMNS: &str = "e.employee_id, e.first_name, e.middle_name, e.last_name, \
                                    e.gender, e.nationality, e.date_of_birth, \
                                    e.employment_status, e.mobile_phone, e.work_email, \
                                    e.personal_email";

pub const JOB_COLUMNS: &str = "j.job_id, j.job_code, j.job_title, j.job_level, j.job_category, \
                               j.min_salary, j.max_salary, j.job_description, j.status, \
                               j.department_id";

pub const DEPARTMENT_COLUMNS: &str =
  "d.department_id, d.department_name, d.department_type, d.location, d.contact_email";

pub const PROGRAM_COLUMNS: &str = "tp.program_id, tp.program_code, tp.title, tp.objectives, \
                                   tp.program_type, tp.subtype, tp.delivery_method, \
                                   tp.approval_status";

pub const ENROLLMENT_COLUMNS: &str =
  "et.enrollment_id, et.employee_id, et.program_id, et.completion_status";

pub const CYCLE_COLUMNS: &str = "pc.cycle_id, pc.cycle_name, pc.start_date, pc.end_date";

pub const APPRAISAL_COLUMNS: &str = "ap.appraisal_id, ap.assignment_id, ap.cycle_id, \
                                     ap.appraisal_date, ap.overall_score, ap.manager_comments, \
                                     ap.hr_comments, ap.employee_comments, ap.reviewer_id";

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `assignments` row.
pub struct RawAssignment {
  pub assignment_id:   i64,
  pub employee_id:     String,
  pub job_id:          i64,
  pub contract_id:     Option<String>,
  pub start_date:      String,
  pub end_date:        Option<String>,
  pub status:          String,
  pub assigned_salary: Option<f64>,
}

impl RawAssignment {
  /// Read the [`ASSIGNMENT_COLUMNS`] starting at column 0.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      assignment_id:   row.get(0)?,
      employee_id:     row.get(1)?,
      job_id:          row.get(2)?,
      contract_id:     row.get(3)?,
      start_date:      row.get(4)?,
      end_date:        row.get(5)?,
      status:          row.get(6)?,
      assigned_salary: row.get(7)?,
    })
  }

  pub fn into_assignment(self) -> Result<Assignment> {
    Ok(Assignment {
      assignment_id:   self.assignment_id,
      employee_id:     self.employee_id,
      job_id:          self.job_id,
      contract_id:     self.contract_id,
      start_date:      decode_date(&self.start_date)?,
      end_date:        decode_opt_date(self.end_date)?,
      status:          AssignmentStatus::from(self.status),
      assigned_salary: self.assigned_salary,
    })
  }
}

/// An assignment row joined with employee, job and department columns.
pub struct RawAssignmentDetail {
  pub assignment:      RawAssignment,
  pub first_name:      String,
  pub last_name:       String,
  pub job_title:       String,
  pub job_code:        String,
  pub department_name: Option<String>,
}

impl RawAssignmentDetail {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      assignment:      RawAssignment::from_row(row)?,
      first_name:      row.get(8)?,
      last_name:       row.get(9)?,
      job_title:       row.get(10)?,
      job_code:        row.get(11)?,
      department_name: row.get(12)?,
    })
  }

  pub fn into_detail(self) -> Result<AssignmentDetail> {
    Ok(AssignmentDetail {
      assignment:      self.assignment.into_assignment()?,
      first_name:      self.first_name,
      last_name:       self.last_name,
      job_title:       self.job_title,
      job_code:        self.job_code,
      department_name: self.department_name,
    })
  }
}

/// Raw values read directly from an `employees` row.
pub struct RawEmployee {
  pub employee_id:       String,
  pub first_name:        String,
  pub middle_name:       Option<String>,
  pub last_name:         String,
  pub gender:            Option<String>,
  pub nationality:       Option<String>,
  pub date_of_birth:     Option<String>,
  pub employment_status: String,
  pub mobile_phone:      Option<String>,
  pub work_email:        Option<String>,
  pub personal_email:    Option<String>,
}

impl RawEmployee {
  /// Read the [`EMPLOYEE_COLUMNS`] starting at column 0.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      employee_id:       row.get(0)?,
      first_name:        row.get(1)?,
      middle_name:       row.get(2)?,
      last_name:         row.get(3)?,
      gender:            row.get(4)?,
      nationality:       row.get(5)?,
      date_of_birth:     row.get(6)?,
      employment_status: row.get(7)?,
      mobile_phone:      row.get(8)?,
      work_email:        row.get(9)?,
      personal_email:    row.get(10)?,
    })
  }

  pub fn into_employee(self) -> Result<Employee> {
    Ok(Employee {
      employee_id:       self.employee_id,
      first_name:        self.first_name,
      middle_name:       self.middle_name,
      last_name:         self.last_name,
      gender:            self.gender,
      nationality:       self.nationality,
      date_of_birth:     decode_opt_date(self.date_of_birth)?,
      employment_status: self.employment_status,
      mobile_phone:      self.mobile_phone,
      work_email:        self.work_email,
      personal_email:    self.personal_email,
    })
  }
}

/// An employee row joined with the title and department of the active
/// assignment.
pub struct RawEmployeeSummary {
  pub employee:        RawEmployee,
  pub job_title:       Option<String>,
  pub department_name: Option<String>,
}

impl RawEmployeeSummary {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      employee:        RawEmployee::from_row(row)?,
      job_title:       row.get(11)?,
      department_name: row.get(12)?,
    })
  }

  pub fn into_summary(self) -> Result<EmployeeSummary> {
    Ok(EmployeeSummary {
      employee:        self.employee.into_employee()?,
      job_title:       self.job_title,
      department_name: self.department_name,
    })
  }
}

// Jobs and departments carry no encoded columns, so they decode in place.

/// Read the [`JOB_COLUMNS`] starting at column 0.
pub fn job_from_row(row: &Row<'_>) -> rusqlite::Result<Job> {
  Ok(Job {
    job_id:          row.get(0)?,
    job_code:        row.get(1)?,
    job_title:       row.get(2)?,
    job_level:       row.get(3)?,
    job_category:    row.get(4)?,
    min_salary:      row.get(5)?,
    max_salary:      row.get(6)?,
    job_description: row.get(7)?,
    status:          row.get(8)?,
    department_id:   row.get(9)?,
  })
}

pub fn job_summary_from_row(row: &Row<'_>) -> rusqlite::Result<JobSummary> {
  let assigned_count: i64 = row.get(11)?;
  Ok(JobSummary {
    job:             job_from_row(row)?,
    department_name: row.get(10)?,
    assigned_count:  assigned_count.max(0) as u64,
  })
}

/// Read the [`DEPARTMENT_COLUMNS`] starting at column 0.
pub fn department_from_row(row: &Row<'_>) -> rusqlite::Result<Department> {
  Ok(Department {
    department_id:   row.get(0)?,
    department_name: row.get(1)?,
    department_type: row.get(2)?,
    location:        row.get(3)?,
    contact_email:   row.get(4)?,
  })
}

// ─── Training ────────────────────────────────────────────────────────────────

/// Read the [`PROGRAM_COLUMNS`] starting at column 0.
pub fn program_from_row(row: &Row<'_>) -> rusqlite::Result<TrainingProgram> {
  Ok(TrainingProgram {
    program_id:      row.get(0)?,
    program_code:    row.get(1)?,
    title:           row.get(2)?,
    objectives:      row.get(3)?,
    program_type:    row.get(4)?,
    subtype:         row.get(5)?,
    delivery_method: row.get(6)?,
    approval_status: row.get(7)?,
  })
}

pub fn program_summary_from_row(row: &Row<'_>) -> rusqlite::Result<ProgramSummary> {
  let enrolled_count: i64 = row.get(8)?;
  Ok(ProgramSummary {
    program:        program_from_row(row)?,
    enrolled_count: enrolled_count.max(0) as u64,
  })
}

/// Read the [`ENROLLMENT_COLUMNS`] followed by program title, program code
/// and employee name.
pub fn enrollment_detail_from_row(row: &Row<'_>) -> rusqlite::Result<EnrollmentDetail> {
  Ok(EnrollmentDetail {
    enrollment:    Enrollment {
      enrollment_id:     row.get(0)?,
      employee_id:       row.get(1)?,
      program_id:        row.get(2)?,
      completion_status: row.get(3)?,
    },
    title:         row.get(4)?,
    program_code:  row.get(5)?,
    employee_name: row.get(6)?,
  })
}

// ─── Performance ─────────────────────────────────────────────────────────────

/// Raw values read from a `performance_cycles` row.
pub struct RawCycle {
  pub cycle_id:   i64,
  pub cycle_name: String,
  pub start_date: String,
  pub end_date:   String,
}

impl RawCycle {
  /// Read the [`CYCLE_COLUMNS`] starting at column 0.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      cycle_id:   row.get(0)?,
      cycle_name: row.get(1)?,
      start_date: row.get(2)?,
      end_date:   row.get(3)?,
    })
  }

  pub fn into_cycle(self) -> Result<PerformanceCycle> {
    Ok(PerformanceCycle {
      cycle_id:   self.cycle_id,
      cycle_name: self.cycle_name,
      start_date: decode_date(&self.start_date)?,
      end_date:   decode_date(&self.end_date)?,
    })
  }
}

/// An `appraisals` row joined with employee name, job title and cycle name.
pub struct RawAppraisalDetail {
  pub appraisal_id:      i64,
  pub assignment_id:     i64,
  pub cycle_id:          Option<i64>,
  pub appraisal_date:    Option<String>,
  pub overall_score:     Option<f64>,
  pub manager_comments:  Option<String>,
  pub hr_comments:       Option<String>,
  pub employee_comments: Option<String>,
  pub reviewer_id:       Option<String>,
  pub employee_name:     Option<String>,
  pub job_title:         Option<String>,
  pub cycle_name:        Option<String>,
}

impl RawAppraisalDetail {
  /// Read the [`APPRAISAL_COLUMNS`] followed by the three joined names.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      appraisal_id:      row.get(0)?,
      assignment_id:     row.get(1)?,
      cycle_id:          row.get(2)?,
      appraisal_date:    row.get(3)?,
      overall_score:     row.get(4)?,
      manager_comments:  row.get(5)?,
      hr_comments:       row.get(6)?,
      employee_comments: row.get(7)?,
      reviewer_id:       row.get(8)?,
      employee_name:     row.get(9)?,
      job_title:         row.get(10)?,
      cycle_name:        row.get(11)?,
    })
  }

  pub fn into_detail(self) -> Result<AppraisalDetail> {
    Ok(AppraisalDetail {
      appraisal:     Appraisal {
        appraisal_id:      self.appraisal_id,
        assignment_id:     self.assignment_id,
        cycle_id:          self.cycle_id,
        appraisal_date:    decode_opt_date(self.appraisal_date)?,
        overall_score:     self.overall_score,
        manager_comments:  self.manager_comments,
        hr_comments:       self.hr_comments,
        employee_comments: self.employee_comments,
        reviewer_id:       self.reviewer_id,
      },
      employee_name: self.employee_name,
      job_title:     self.job_title,
      cycle_name:    self.cycle_name,
    })
  }
}
