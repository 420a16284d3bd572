//! Directory records: employees, departments and jobs.
//!
//! These are plain rows from the lifecycle guard's point of view. Updates go
//! through typed partial-update structs with a fixed field set; a key outside
//! that set is rejected at deserialisation rather than written through.
//! Nullable fields in those structs are `Option<Option<T>>`: `None` keeps the
//! stored value and `Some(None)` clears it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::IgnoredAny};

use crate::{
  Error, Result,
  assignment::{DepartmentId, JobId},
  form,
};

// ─── Salary band ─────────────────────────────────────────────────────────────

/// The inclusive range `[min, max]` a job's assigned salaries must fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryBand {
  min: f64,
  max: f64,
}

impl SalaryBand {
  pub fn new(min: f64, max: f64) -> Result<Self> {
    if min > max {
      return Err(Error::InvertedSalaryBand { min, max });
    }
    Ok(Self { min, max })
  }

  pub fn min(&self) -> f64 { self.min }

  pub fn max(&self) -> f64 { self.max }

  /// Boundary values are inside the band.
  pub fn contains(&self, salary: f64) -> bool {
    self.min <= salary && salary <= self.max
  }
}

// ─── Employee ────────────────────────────────────────────────────────────────

fn default_status() -> String { "Active".to_owned() }

/// Overwrite a nullable field when the update carries its key.
fn patch<T>(field: &mut Option<T>, value: Option<Option<T>>) {
  if let Some(v) = value {
    *field = v;
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
  /// Externally supplied identifier (e.g. a staff number).
  #[serde(rename = "Employee_ID")]
  pub employee_id:       String,
  #[serde(rename = "First_Name")]
  pub first_name:        String,
  #[serde(rename = "Middle_Name", default, deserialize_with = "form::text")]
  pub middle_name:       Option<String>,
  #[serde(rename = "Last_Name")]
  pub last_name:         String,
  #[serde(rename = "Gender", default, deserialize_with = "form::text")]
  pub gender:            Option<String>,
  #[serde(rename = "Nationality", default, deserialize_with = "form::text")]
  pub nationality:       Option<String>,
  #[serde(rename = "DOB", default, deserialize_with = "form::date")]
  pub date_of_birth:     Option<NaiveDate>,
  #[serde(rename = "Employment_Status", default = "default_status")]
  pub employment_status: String,
  #[serde(rename = "Mobile_Phone", default, deserialize_with = "form::text")]
  pub mobile_phone:      Option<String>,
  #[serde(rename = "Work_Email", default, deserialize_with = "form::text")]
  pub work_email:        Option<String>,
  #[serde(rename = "Personal_Email", default, deserialize_with = "form::text")]
  pub personal_email:    Option<String>,
}

impl Employee {
  /// Reject blank identifiers and names.
  pub fn validate(&self) -> Result<()> {
    if self.employee_id.trim().is_empty() {
      return Err(Error::MissingField("Employee_ID"));
    }
    if self.first_name.trim().is_empty() {
      return Err(Error::MissingField("First_Name"));
    }
    if self.last_name.trim().is_empty() {
      return Err(Error::MissingField("Last_Name"));
    }
    Ok(())
  }

  /// Overwrite every field present in `update`. `Employee_ID` is not
  /// updatable.
  pub fn apply(&mut self, update: EmployeeUpdate) -> Result<()> {
    if let Some(v) = update.first_name {
      self.first_name = v;
    }
    if let Some(v) = update.last_name {
      self.last_name = v;
    }
    if let Some(v) = update.employment_status {
      self.employment_status = v;
    }
    patch(&mut self.middle_name, update.middle_name);
    patch(&mut self.gender, update.gender);
    patch(&mut self.nationality, update.nationality);
    patch(&mut self.date_of_birth, update.date_of_birth);
    patch(&mut self.mobile_phone, update.mobile_phone);
    patch(&mut self.work_email, update.work_email);
    patch(&mut self.personal_email, update.personal_email);

    self.validate()
  }
}

/// Partial update for an [`Employee`]. Absent keys are left unchanged; a
/// nullable field sent as `null` or `""` is cleared.
///
/// A row from `GET /employees` can be sent back as-is: its identifier and
/// assignment columns are accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeUpdate {
  #[serde(rename = "First_Name")]
  pub first_name:        Option<String>,
  #[serde(rename = "Middle_Name", default, deserialize_with = "form::patch_text")]
  pub middle_name:       Option<Option<String>>,
  #[serde(rename = "Last_Name")]
  pub last_name:         Option<String>,
  #[serde(rename = "Gender", default, deserialize_with = "form::patch_text")]
  pub gender:            Option<Option<String>>,
  #[serde(rename = "Nationality", default, deserialize_with = "form::patch_text")]
  pub nationality:       Option<Option<String>>,
  #[serde(rename = "DOB", default, deserialize_with = "form::patch_date")]
  pub date_of_birth:     Option<Option<NaiveDate>>,
  #[serde(rename = "Employment_Status")]
  pub employment_status: Option<String>,
  #[serde(rename = "Mobile_Phone", default, deserialize_with = "form::patch_text")]
  pub mobile_phone:      Option<Option<String>>,
  #[serde(rename = "Work_Email", default, deserialize_with = "form::patch_text")]
  pub work_email:        Option<Option<String>>,
  #[serde(rename = "Personal_Email", default, deserialize_with = "form::patch_text")]
  pub personal_email:    Option<Option<String>>,

  #[serde(rename = "Employee_ID", default)]
  _employee_id:          Option<IgnoredAny>,
  #[serde(rename = "Job_Title", default)]
  _job_title:            Option<IgnoredAny>,
  #[serde(rename = "Department_Name", default)]
  _department_name:      Option<IgnoredAny>,
}

/// An employee with the title and department of their active assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
  #[serde(flatten)]
  pub employee:        Employee,
  #[serde(rename = "Job_Title")]
  pub job_title:       Option<String>,
  #[serde(rename = "Department_Name")]
  pub department_name: Option<String>,
}

// ─── Department ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
  #[serde(rename = "Department_ID")]
  pub department_id:   DepartmentId,
  #[serde(rename = "Department_Name")]
  pub department_name: String,
  #[serde(rename = "Department_Type")]
  pub department_type: Option<String>,
  #[serde(rename = "Location")]
  pub location:        Option<String>,
  #[serde(rename = "Contact_Email")]
  pub contact_email:   Option<String>,
}

impl Department {
  pub fn apply(&mut self, update: DepartmentUpdate) -> Result<()> {
    if let Some(v) = update.department_name {
      if v.trim().is_empty() {
        return Err(Error::MissingField("Department_Name"));
      }
      self.department_name = v;
    }
    patch(&mut self.department_type, update.department_type);
    patch(&mut self.location, update.location);
    patch(&mut self.contact_email, update.contact_email);
    Ok(())
  }
}

/// Input to [`crate::store::DirectoryStore::insert_department`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewDepartment {
  #[serde(rename = "Department_Name")]
  pub department_name: String,
  #[serde(rename = "Department_Type", default, deserialize_with = "form::text")]
  pub department_type: Option<String>,
  #[serde(rename = "Location", default, deserialize_with = "form::text")]
  pub location:        Option<String>,
  #[serde(rename = "Contact_Email", default, deserialize_with = "form::text")]
  pub contact_email:   Option<String>,
}

impl NewDepartment {
  pub fn validate(&self) -> Result<()> {
    if self.department_name.trim().is_empty() {
      return Err(Error::MissingField("Department_Name"));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepartmentUpdate {
  #[serde(rename = "Department_Name")]
  pub department_name: Option<String>,
  #[serde(rename = "Department_Type", default, deserialize_with = "form::patch_text")]
  pub department_type: Option<Option<String>>,
  #[serde(rename = "Location", default, deserialize_with = "form::patch_text")]
  pub location:        Option<Option<String>>,
  #[serde(rename = "Contact_Email", default, deserialize_with = "form::patch_text")]
  pub contact_email:   Option<Option<String>>,
}

// ─── Job ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
  #[serde(rename = "Job_ID")]
  pub job_id:          JobId,
  #[serde(rename = "Job_Code")]
  pub job_code:        String,
  #[serde(rename = "Job_Title")]
  pub job_title:       String,
  #[serde(rename = "Job_Level")]
  pub job_level:       Option<String>,
  #[serde(rename = "Job_Category")]
  pub job_category:    Option<String>,
  #[serde(rename = "Min_Salary")]
  pub min_salary:      f64,
  #[serde(rename = "Max_Salary")]
  pub max_salary:      f64,
  #[serde(rename = "Job_Description")]
  pub job_description: Option<String>,
  #[serde(rename = "Status")]
  pub status:          String,
  #[serde(rename = "Department_ID")]
  pub department_id:   Option<DepartmentId>,
}

impl Job {
  /// The job's current salary band.
  pub fn salary_band(&self) -> Result<SalaryBand> {
    SalaryBand::new(self.min_salary, self.max_salary)
  }

  /// Overwrite every field present in `update`, then re-check the band.
  pub fn apply(&mut self, update: JobUpdate) -> Result<()> {
    if let Some(v) = update.job_code {
      self.job_code = v;
    }
    if let Some(v) = update.job_title {
      self.job_title = v;
    }
    if let Some(v) = update.min_salary {
      self.min_salary = v;
    }
    if let Some(v) = update.max_salary {
      self.max_salary = v;
    }
    if let Some(v) = update.status {
      self.status = v;
    }
    patch(&mut self.job_level, update.job_level);
    patch(&mut self.job_category, update.job_category);
    patch(&mut self.job_description, update.job_description);
    patch(&mut self.department_id, update.department_id);

    self.salary_band().map(|_| ())
  }
}

/// Input to [`crate::store::DirectoryStore::insert_job`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewJob {
  #[serde(rename = "Job_Code")]
  pub job_code:        String,
  #[serde(rename = "Job_Title")]
  pub job_title:       String,
  #[serde(rename = "Job_Level", default, deserialize_with = "form::text")]
  pub job_level:       Option<String>,
  #[serde(rename = "Job_Category", default, deserialize_with = "form::text")]
  pub job_category:    Option<String>,
  #[serde(rename = "Min_Salary")]
  pub min_salary:      f64,
  #[serde(rename = "Max_Salary")]
  pub max_salary:      f64,
  #[serde(rename = "Job_Description", default, deserialize_with = "form::text")]
  pub job_description: Option<String>,
  #[serde(rename = "Status", default = "default_status")]
  pub status:          String,
  #[serde(rename = "Department_ID", default, deserialize_with = "form::number")]
  pub department_id:   Option<DepartmentId>,
}

impl NewJob {
  pub fn validate(&self) -> Result<()> {
    if self.job_code.trim().is_empty() {
      return Err(Error::MissingField("Job_Code"));
    }
    if self.job_title.trim().is_empty() {
      return Err(Error::MissingField("Job_Title"));
    }
    SalaryBand::new(self.min_salary, self.max_salary).map(|_| ())
  }
}

/// Partial update for a [`Job`]. `Min_Salary` and `Max_Salary` cannot be
/// cleared; the other nullable fields clear on `null` or `""`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobUpdate {
  #[serde(rename = "Job_Code")]
  pub job_code:        Option<String>,
  #[serde(rename = "Job_Title")]
  pub job_title:       Option<String>,
  #[serde(rename = "Job_Level", default, deserialize_with = "form::patch_text")]
  pub job_level:       Option<Option<String>>,
  #[serde(rename = "Job_Category", default, deserialize_with = "form::patch_text")]
  pub job_category:    Option<Option<String>>,
  #[serde(rename = "Min_Salary", default, deserialize_with = "form::number")]
  pub min_salary:      Option<f64>,
  #[serde(rename = "Max_Salary", default, deserialize_with = "form::number")]
  pub max_salary:      Option<f64>,
  #[serde(rename = "Job_Description", default, deserialize_with = "form::patch_text")]
  pub job_description: Option<Option<String>>,
  #[serde(rename = "Status")]
  pub status:          Option<String>,
  #[serde(rename = "Department_ID", default, deserialize_with = "form::patch_number")]
  pub department_id:   Option<Option<DepartmentId>>,
}

/// A job with its department name and the number of active assignments
/// currently held against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
  #[serde(flatten)]
  pub job:             Job,
  #[serde(rename = "Department_Name")]
  pub department_name: Option<String>,
  pub assigned_count:  u64,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn employee() -> Employee {
    serde_json::from_str(
      r#"{"Employee_ID": "E100", "First_Name": "Ada", "Last_Name": "Lovelace",
          "DOB": "1815-12-10", "Work_Email": "ada@example.com"}"#,
    )
    .unwrap()
  }

  fn job() -> Job {
    Job {
      job_id:          1,
      job_code:        "ENG-1".into(),
      job_title:       "Engineer".into(),
      job_level:       None,
      job_category:    None,
      min_salary:      5000.0,
      max_salary:      8000.0,
      job_description: None,
      status:          "Active".into(),
      department_id:   None,
    }
  }

  #[test]
  fn band_is_inclusive() {
    let band = SalaryBand::new(5000.0, 8000.0).unwrap();
    assert!(band.contains(5000.0));
    assert!(band.contains(8000.0));
    assert!(!band.contains(4999.99));
    assert!(!band.contains(8000.01));
  }

  #[test]
  fn inverted_band_is_rejected() {
    assert!(matches!(
      SalaryBand::new(9000.0, 8000.0),
      Err(Error::InvertedSalaryBand { .. })
    ));
    assert!(SalaryBand::new(5000.0, 5000.0).is_ok());
  }

  #[test]
  fn job_update_rechecks_band() {
    let mut j = job();
    let err = j
      .apply(JobUpdate { min_salary: Some(9000.0), ..Default::default() })
      .unwrap_err();
    assert!(matches!(err, Error::InvertedSalaryBand { .. }));

    let mut j = job();
    j.apply(JobUpdate {
      min_salary: Some(6000.0),
      job_title: Some("Senior Engineer".into()),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(j.min_salary, 6000.0);
    assert_eq!(j.max_salary, 8000.0);
    assert_eq!(j.job_title, "Senior Engineer");
  }

  #[test]
  fn update_rejects_unlisted_fields() {
    let res = serde_json::from_str::<EmployeeUpdate>(
      r#"{"First_Name": "Ada", "Salary_Grade": "G7"}"#,
    );
    assert!(res.is_err());
  }

  #[test]
  fn update_ignores_listed_row_columns() {
    let update: EmployeeUpdate = serde_json::from_str(
      r#"{"Employee_ID": "E999", "First_Name": "Ada", "Last_Name": "King",
          "Job_Title": "Engineer", "Department_Name": null, "DOB": ""}"#,
    )
    .unwrap();

    let mut e = employee();
    e.apply(update).unwrap();
    assert_eq!(e.employee_id, "E100");
    assert_eq!(e.last_name, "King");
    assert_eq!(e.date_of_birth, None);
  }

  #[test]
  fn employee_accepts_blank_form_fields() {
    let e: Employee = serde_json::from_str(
      r#"{"Employee_ID": "E300", "First_Name": "Grace", "Last_Name": "Hopper",
          "Gender": "Female", "DOB": "", "Work_Email": "", "Middle_Name": "  "}"#,
    )
    .unwrap();
    assert_eq!(e.date_of_birth, None);
    assert_eq!(e.work_email, None);
    assert_eq!(e.middle_name, None);
    assert_eq!(e.gender.as_deref(), Some("Female"));

    let res = serde_json::from_str::<Employee>(
      r#"{"Employee_ID": "E300", "First_Name": "Grace", "Last_Name": "Hopper",
          "DOB": "Dec 9"}"#,
    );
    assert!(res.is_err());
  }

  #[test]
  fn nullable_fields_can_be_cleared() {
    let mut e = employee();
    let update: EmployeeUpdate =
      serde_json::from_str(r#"{"Work_Email": null, "DOB": ""}"#).unwrap();
    e.apply(update).unwrap();
    assert_eq!(e.work_email, None);
    assert_eq!(e.date_of_birth, None);
    assert_eq!(e.first_name, "Ada");

    let mut j = job();
    j.department_id = Some(4);
    j.job_level = Some("L3".into());
    let update: JobUpdate =
      serde_json::from_str(r#"{"Department_ID": null, "Min_Salary": "5500"}"#).unwrap();
    j.apply(update).unwrap();
    assert_eq!(j.department_id, None);
    assert_eq!(j.job_level.as_deref(), Some("L3"));
    assert_eq!(j.min_salary, 5500.0);
  }

  #[test]
  fn employee_update_keeps_absent_fields() {
    let mut e: Employee = serde_json::from_str(
      r#"{"Employee_ID": "E100", "First_Name": "Ada", "Last_Name": "Lovelace",
          "Work_Email": "ada@example.com"}"#,
    )
    .unwrap();
    assert_eq!(e.employment_status, "Active");

    e.apply(EmployeeUpdate {
      mobile_phone: Some(Some("555-0100".into())),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(e.work_email.as_deref(), Some("ada@example.com"));
    assert_eq!(e.mobile_phone.as_deref(), Some("555-0100"));

    let err = e
      .apply(EmployeeUpdate { last_name: Some(" ".into()), ..Default::default() })
      .unwrap_err();
    assert!(matches!(err, Error::MissingField("Last_Name")));
  }
}
