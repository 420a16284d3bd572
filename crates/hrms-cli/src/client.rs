//! Async HTTP client wrapping the HRMS assignment endpoints.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use hrms_core::assignment::{AssignmentDetail, AssignmentId};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{Value, json};

/// Connection settings for the HRMS API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
  pub base_url: String,
}

/// The fields of a new assignment as entered on the command line.
#[derive(Debug, Clone, Default)]
pub struct NewAssignmentArgs {
  pub employee_id: String,
  pub job_id:      i64,
  pub start_date:  String,
  pub end_date:    Option<String>,
  pub status:      Option<String>,
  pub salary:      Option<f64>,
  pub contract_id: Option<String>,
}

impl NewAssignmentArgs {
  /// The JSON body accepted by `POST /api/assignments`.
  pub fn to_body(&self) -> Value {
    json!({
      "Employee_ID":     self.employee_id,
      "Job_ID":          self.job_id,
      "Start_Date":      self.start_date,
      "End_Date":        self.end_date,
      "Status":          self.status,
      "Assigned_Salary": self.salary,
      "Contract_ID":     self.contract_id,
    })
  }
}

#[derive(Deserialize)]
struct Created {
  #[serde(rename = "assignmentId")]
  assignment_id: AssignmentId,
}

/// Async HTTP client for the HRMS JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  // ── Assignments ───────────────────────────────────────────────────────────

  /// `GET /api/assignments` or `GET /api/assignments/employee/{id}`
  pub async fn list_assignments(&self, employee_id: Option<&str>) -> Result<Vec<AssignmentDetail>> {
    let path = match employee_id {
      Some(id) => format!("/assignments/employee/{id}"),
      None => "/assignments".to_owned(),
    };
    let resp = self
      .client
      .get(self.url(&path))
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;

    let resp = ensure_success(resp, &format!("GET {path}")).await?;
    resp.json().await.context("deserialising assignments")
  }

  /// `POST /api/assignments`: returns the new assignment id.
  pub async fn create_assignment(&self, args: &NewAssignmentArgs) -> Result<AssignmentId> {
    let resp = self
      .client
      .post(self.url("/assignments"))
      .json(&args.to_body())
      .send()
      .await
      .context("POST /assignments failed")?;

    let resp = ensure_success(resp, "POST /assignments").await?;
    let created: Created = resp.json().await.context("deserialising created assignment")?;
    Ok(created.assignment_id)
  }

  /// `PUT /api/assignments/{id}`
  pub async fn update_status(
    &self,
    id: AssignmentId,
    status: &str,
    end_date: Option<&str>,
  ) -> Result<()> {
    let path = format!("/assignments/{id}");
    let resp = self
      .client
      .put(self.url(&path))
      .json(&json!({ "Status": status, "End_Date": end_date }))
      .send()
      .await
      .with_context(|| format!("PUT {path} failed"))?;

    ensure_success(resp, &format!("PUT {path}")).await?;
    Ok(())
  }
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn ensure_success(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let message = resp
    .json::<Value>()
    .await
    .ok()
    .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_owned));
  match message {
    Some(message) => Err(anyhow!("{what} → {status}: {message}")),
    None => Err(anyhow!("{what} → {status}")),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_joins_api_prefix() {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:5000/".into(),
    })
    .unwrap();
    assert_eq!(client.url("/assignments"), "http://localhost:5000/api/assignments");
  }

  #[test]
  fn body_uses_wire_field_names() {
    let args = NewAssignmentArgs {
      employee_id: "E100".into(),
      job_id: 3,
      start_date: "2024-01-01".into(),
      salary: Some(60000.0),
      ..Default::default()
    };
    let body = args.to_body();
    assert_eq!(body["Employee_ID"], "E100");
    assert_eq!(body["Job_ID"], 3);
    assert_eq!(body["Assigned_Salary"], 60000.0);
    assert_eq!(body["Status"], Value::Null);
  }
}
