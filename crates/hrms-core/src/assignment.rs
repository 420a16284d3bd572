//! Job assignments: the relation between an employee and the job they hold.
//!
//! An assignment is created `Active` (or `Probation`) and ends `Terminated`.
//! Field names on the wire follow the dashboard's column naming
//! (`Employee_ID`, `Start_Date`, ...).

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::form;

pub type AssignmentId = i64;
pub type JobId = i64;
pub type DepartmentId = i64;

// ─── Status ──────────────────────────────────────────────────────────────────

/// The lifecycle status of an assignment.
///
/// Only `Active` carries invariant enforcement. Unrecognised values are kept
/// verbatim in [`AssignmentStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, EnumString, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssignmentStatus {
  #[default]
  Active,
  Probation,
  Terminated,
  #[strum(default)]
  Other(String),
}

impl AssignmentStatus {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Active => "Active",
      Self::Probation => "Probation",
      Self::Terminated => "Terminated",
      Self::Other(s) => s,
    }
  }

  pub fn is_active(&self) -> bool { matches!(self, Self::Active) }

  pub fn is_terminated(&self) -> bool { matches!(self, Self::Terminated) }
}

impl fmt::Display for AssignmentStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl From<String> for AssignmentStatus {
  fn from(s: String) -> Self {
    // `EnumString` with a `default` variant never fails.
    s.parse().unwrap_or(Self::Other(s))
  }
}

impl From<AssignmentStatus> for String {
  fn from(status: AssignmentStatus) -> Self {
    match status {
      AssignmentStatus::Other(s) => s,
      other => other.as_str().to_owned(),
    }
  }
}

// ─── Assignment ──────────────────────────────────────────────────────────────

/// A persisted assignment row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
  #[serde(rename = "Assignment_ID")]
  pub assignment_id:   AssignmentId,
  #[serde(rename = "Employee_ID")]
  pub employee_id:     String,
  #[serde(rename = "Job_ID")]
  pub job_id:          JobId,
  #[serde(rename = "Contract_ID")]
  pub contract_id:     Option<String>,
  #[serde(rename = "Start_Date")]
  pub start_date:      NaiveDate,
  #[serde(rename = "End_Date")]
  pub end_date:        Option<NaiveDate>,
  #[serde(rename = "Status")]
  pub status:          AssignmentStatus,
  #[serde(rename = "Assigned_Salary")]
  pub assigned_salary: Option<f64>,
}

/// Input to [`crate::store::RecordStore::insert_assignment`], with every
/// default already resolved. `assignment_id` is generated by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignment {
  pub employee_id:     String,
  pub job_id:          JobId,
  pub contract_id:     Option<String>,
  pub start_date:      NaiveDate,
  pub end_date:        Option<NaiveDate>,
  pub status:          AssignmentStatus,
  pub assigned_salary: Option<f64>,
}

// ─── Inbound bodies ──────────────────────────────────────────────────────────

/// The unvalidated body of a create request. Every field is optional here;
/// [`crate::guard::AssignmentGuard::create_assignment`] decides what is
/// required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentRequest {
  #[serde(rename = "Employee_ID", default, deserialize_with = "form::text")]
  pub employee_id:     Option<String>,
  #[serde(rename = "Job_ID", default, deserialize_with = "form::number")]
  pub job_id:          Option<JobId>,
  #[serde(rename = "Contract_ID", default, deserialize_with = "form::text")]
  pub contract_id:     Option<String>,
  #[serde(rename = "Start_Date", default, deserialize_with = "form::text")]
  pub start_date:      Option<String>,
  #[serde(rename = "End_Date", default, deserialize_with = "form::text")]
  pub end_date:        Option<String>,
  #[serde(rename = "Status", default, deserialize_with = "form::text")]
  pub status:          Option<String>,
  #[serde(rename = "Assigned_Salary", default, deserialize_with = "form::number")]
  pub assigned_salary: Option<f64>,
}

/// The body of a status update, e.g. `{"Status": "Terminated"}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusChange {
  #[serde(rename = "Status", default, deserialize_with = "form::text")]
  pub status:   Option<String>,
  /// Defaults to the date the update is applied.
  #[serde(rename = "End_Date", default, deserialize_with = "form::text")]
  pub end_date: Option<String>,
}

// ─── Read projection ─────────────────────────────────────────────────────────

/// An assignment joined with the display fields of its employee, job and
/// the job's department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentDetail {
  #[serde(flatten)]
  pub assignment:      Assignment,
  #[serde(rename = "First_Name")]
  pub first_name:      String,
  #[serde(rename = "Last_Name")]
  pub last_name:       String,
  #[serde(rename = "Job_Title")]
  pub job_title:       String,
  #[serde(rename = "Job_Code")]
  pub job_code:        String,
  #[serde(rename = "Department_Name")]
  pub department_name: Option<String>,
}
