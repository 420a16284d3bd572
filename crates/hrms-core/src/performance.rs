//! Performance cycles and the appraisals recorded against assignments.
//!
//! An appraisal belongs to an assignment rather than to an employee, so a
//! score always refers to the job the employee held when it was given.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, assignment::AssignmentId, form};

pub type CycleId = i64;
pub type AppraisalId = i64;

/// Highest `Overall_Score` an appraisal can carry.
pub const MAX_SCORE: f64 = 5.0;

// ─── Cycles ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceCycle {
  #[serde(rename = "Cycle_ID")]
  pub cycle_id:   CycleId,
  #[serde(rename = "Cycle_Name")]
  pub cycle_name: String,
  #[serde(rename = "Start_Date")]
  pub start_date: NaiveDate,
  #[serde(rename = "End_Date")]
  pub end_date:   NaiveDate,
}

/// Input to [`crate::store::DirectoryStore::insert_performance_cycle`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPerformanceCycle {
  #[serde(rename = "Cycle_Name")]
  pub cycle_name: String,
  #[serde(rename = "Start_Date")]
  pub start_date: NaiveDate,
  #[serde(rename = "End_Date")]
  pub end_date:   NaiveDate,
}

impl NewPerformanceCycle {
  pub fn validate(&self) -> Result<()> {
    if self.cycle_name.trim().is_empty() {
      return Err(Error::MissingField("Cycle_Name"));
    }
    if self.end_date <= self.start_date {
      return Err(Error::EndNotAfterStart);
    }
    Ok(())
  }
}

// ─── Appraisals ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appraisal {
  #[serde(rename = "Appraisal_ID")]
  pub appraisal_id:      AppraisalId,
  #[serde(rename = "Assignment_ID")]
  pub assignment_id:     AssignmentId,
  #[serde(rename = "Cycle_ID")]
  pub cycle_id:          Option<CycleId>,
  #[serde(rename = "Appraisal_Date")]
  pub appraisal_date:    Option<NaiveDate>,
  #[serde(rename = "Overall_Score")]
  pub overall_score:     Option<f64>,
  #[serde(rename = "Manager_Comments")]
  pub manager_comments:  Option<String>,
  #[serde(rename = "HR_Comments")]
  pub hr_comments:       Option<String>,
  #[serde(rename = "Employee_Comments")]
  pub employee_comments: Option<String>,
  #[serde(rename = "Reviewer_ID")]
  pub reviewer_id:       Option<String>,
}

/// The body of `POST /performance/appraisals`, as the dashboard posts it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppraisalRequest {
  #[serde(rename = "Assignment_ID", default, deserialize_with = "form::number")]
  pub assignment_id:     Option<AssignmentId>,
  #[serde(rename = "Cycle_ID", default, deserialize_with = "form::number")]
  pub cycle_id:          Option<CycleId>,
  #[serde(rename = "Appraisal_Date", default, deserialize_with = "form::date")]
  pub appraisal_date:    Option<NaiveDate>,
  #[serde(rename = "Overall_Score", default, deserialize_with = "form::number")]
  pub overall_score:     Option<f64>,
  #[serde(rename = "Manager_Comments", default, deserialize_with = "form::text")]
  pub manager_comments:  Option<String>,
  #[serde(rename = "HR_Comments", default, deserialize_with = "form::text")]
  pub hr_comments:       Option<String>,
  #[serde(rename = "Employee_Comments", default, deserialize_with = "form::text")]
  pub employee_comments: Option<String>,
  #[serde(rename = "Reviewer_ID", default, deserialize_with = "form::text")]
  pub reviewer_id:       Option<String>,
}

/// A validated appraisal, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppraisal {
  pub assignment_id:     AssignmentId,
  pub cycle_id:          Option<CycleId>,
  pub appraisal_date:    Option<NaiveDate>,
  pub overall_score:     Option<f64>,
  pub manager_comments:  Option<String>,
  pub hr_comments:       Option<String>,
  pub employee_comments: Option<String>,
  pub reviewer_id:       Option<String>,
}

impl AppraisalRequest {
  pub fn into_new(self) -> Result<NewAppraisal> {
    let assignment_id = self.assignment_id.ok_or(Error::MissingField("Assignment_ID"))?;
    if let Some(score) = self.overall_score.filter(|s| !(0.0..=MAX_SCORE).contains(s)) {
      return Err(Error::ScoreOutOfRange(score));
    }
    Ok(NewAppraisal {
      assignment_id,
      cycle_id: self.cycle_id,
      appraisal_date: self.appraisal_date,
      overall_score: self.overall_score,
      manager_comments: self.manager_comments,
      hr_comments: self.hr_comments,
      employee_comments: self.employee_comments,
      reviewer_id: self.reviewer_id,
    })
  }
}

/// An appraisal with the appraised employee, their job title, and the cycle
/// name. Each is `None` when the row it comes from is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalDetail {
  #[serde(flatten)]
  pub appraisal:     Appraisal,
  #[serde(rename = "Employee_Name")]
  pub employee_name: Option<String>,
  #[serde(rename = "Job_Title")]
  pub job_title:     Option<String>,
  #[serde(rename = "Cycle_Name")]
  pub cycle_name:    Option<String>,
}
