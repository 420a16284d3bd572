//! Training programs and employee enrolments.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, form};

pub type ProgramId = i64;
pub type EnrollmentId = i64;

/// Approval state given to a program created without one.
pub const DEFAULT_APPROVAL_STATUS: &str = "Pending";

/// Completion state of a fresh enrolment.
pub const ENROLLED_STATUS: &str = "In Progress";

// ─── Programs ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingProgram {
  #[serde(rename = "Program_ID")]
  pub program_id:      ProgramId,
  #[serde(rename = "Program_Code")]
  pub program_code:    String,
  #[serde(rename = "Title")]
  pub title:           String,
  #[serde(rename = "Objectives")]
  pub objectives:      Option<String>,
  #[serde(rename = "Type")]
  pub program_type:    Option<String>,
  #[serde(rename = "Subtype")]
  pub subtype:         Option<String>,
  #[serde(rename = "Delivery_Method")]
  pub delivery_method: Option<String>,
  #[serde(rename = "Approval_Status")]
  pub approval_status: String,
}

/// Input to [`crate::store::DirectoryStore::insert_training_program`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewTrainingProgram {
  #[serde(rename = "Program_Code", default, deserialize_with = "form::text")]
  pub program_code:    Option<String>,
  #[serde(rename = "Title", default, deserialize_with = "form::text")]
  pub title:           Option<String>,
  #[serde(rename = "Objectives", default, deserialize_with = "form::text")]
  pub objectives:      Option<String>,
  #[serde(rename = "Type", default, deserialize_with = "form::text")]
  pub program_type:    Option<String>,
  #[serde(rename = "Subtype", default, deserialize_with = "form::text")]
  pub subtype:         Option<String>,
  #[serde(rename = "Delivery_Method", default, deserialize_with = "form::text")]
  pub delivery_method: Option<String>,
  #[serde(rename = "Approval_Status", default, deserialize_with = "form::text")]
  pub approval_status: Option<String>,
}

impl NewTrainingProgram {
  pub fn validate(&self) -> Result<()> {
    if self.program_code.is_none() {
      return Err(Error::MissingField("Program_Code"));
    }
    if self.title.is_none() {
      return Err(Error::MissingField("Title"));
    }
    Ok(())
  }

  /// The stored approval status; [`DEFAULT_APPROVAL_STATUS`] when unset.
  pub fn approval_status(&self) -> &str {
    self.approval_status.as_deref().unwrap_or(DEFAULT_APPROVAL_STATUS)
  }
}

/// A program with the number of employees enrolled in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSummary {
  #[serde(flatten)]
  pub program:        TrainingProgram,
  pub enrolled_count: u64,
}

// ─── Enrolments ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
  #[serde(rename = "Enrollment_ID")]
  pub enrollment_id:     EnrollmentId,
  #[serde(rename = "Employee_ID")]
  pub employee_id:       String,
  #[serde(rename = "Program_ID")]
  pub program_id:        ProgramId,
  #[serde(rename = "Completion_Status")]
  pub completion_status: String,
}

/// The body of `POST /training/enroll`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnrollmentRequest {
  #[serde(rename = "Employee_ID", default, deserialize_with = "form::text")]
  pub employee_id: Option<String>,
  #[serde(rename = "Program_ID", default, deserialize_with = "form::number")]
  pub program_id:  Option<ProgramId>,
}

impl EnrollmentRequest {
  /// Both keys are required.
  pub fn into_parts(self) -> Result<(String, ProgramId)> {
    let employee_id = self.employee_id.ok_or(Error::MissingField("Employee_ID"))?;
    let program_id = self.program_id.ok_or(Error::MissingField("Program_ID"))?;
    Ok((employee_id, program_id))
  }
}

/// An enrolment joined with its program and the employee's full name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentDetail {
  #[serde(flatten)]
  pub enrollment:    Enrollment,
  #[serde(rename = "Title")]
  pub title:         String,
  #[serde(rename = "Program_Code")]
  pub program_code:  String,
  #[serde(rename = "Employee_Name")]
  pub employee_name: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn program_defaults_to_pending() {
    let p: NewTrainingProgram = serde_json::from_str(
      r#"{"Program_Code": "SAFE-1", "Title": "Site safety", "Approval_Status": ""}"#,
    )
    .unwrap();
    p.validate().unwrap();
    assert_eq!(p.approval_status(), "Pending");

    let p: NewTrainingProgram =
      serde_json::from_str(r#"{"Program_Code": "SAFE-1", "Title": " "}"#).unwrap();
    assert!(matches!(p.validate(), Err(Error::MissingField("Title"))));
  }

  #[test]
  fn enrollment_request_needs_both_keys() {
    let req: EnrollmentRequest =
      serde_json::from_str(r#"{"Employee_ID": "E100", "Program_ID": "3"}"#).unwrap();
    assert_eq!(req.into_parts().unwrap(), ("E100".to_owned(), 3));

    let req: EnrollmentRequest = serde_json::from_str(r#"{"Employee_ID": "E100"}"#).unwrap();
    assert!(matches!(req.into_parts(), Err(Error::MissingField("Program_ID"))));
  }
}
