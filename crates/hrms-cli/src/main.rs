//! `hrms`: command-line client for HRMS job assignments.
//!
//! # Usage
//!
//! ```text
//! hrms list --employee E100
//! hrms assign --employee E100 --job 3 --start 2024-01-01 --salary 65000
//! hrms terminate 12 --end-date 2024-12-31
//! hrms --url http://hr.internal:5000 set-status 12 Probation
//! ```

mod client;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig, NewAssignmentArgs};
use hrms_core::assignment::{AssignmentDetail, AssignmentStatus};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:5000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hrms", about = "Manage HRMS job assignments")]
struct Args {
  /// Path to a TOML config file (`url = "..."`).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the HRMS server (default: http://localhost:5000).
  #[arg(long, env = "HRMS_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List assignments, newest first.
  List {
    /// Only show this employee's assignments.
    #[arg(long)]
    employee: Option<String>,
  },

  /// Assign an employee to a job.
  Assign {
    #[arg(long)]
    employee: String,
    #[arg(long)]
    job:      i64,
    /// Start date, `YYYY-MM-DD`.
    #[arg(long)]
    start:    NaiveDate,
    #[arg(long)]
    end:      Option<NaiveDate>,
    /// Defaults to `Active` on the server.
    #[arg(long)]
    status:   Option<String>,
    #[arg(long)]
    salary:   Option<f64>,
    #[arg(long)]
    contract: Option<String>,
  },

  /// Terminate an assignment.
  Terminate {
    id:       i64,
    /// Defaults to today on the server.
    #[arg(long)]
    end_date: Option<NaiveDate>,
  },

  /// Set an assignment's status.
  SetStatus {
    id:       i64,
    status:   String,
    #[arg(long)]
    end_date: Option<NaiveDate>,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

/// CLI flags (and `HRMS_URL`) override the config file, which overrides the
/// default.
fn resolve_config(flag_url: Option<String>, file_cfg: &ConfigFile) -> ApiConfig {
  ApiConfig {
    base_url: flag_url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let api_config = resolve_config(args.url, &file_cfg);
  tracing::debug!(base_url = %api_config.base_url, "using server");
  let client = ApiClient::new(api_config)?;

  match args.command {
    Command::List { employee } => {
      let rows = client.list_assignments(employee.as_deref()).await?;
      if rows.is_empty() {
        println!("no assignments");
      }
      for row in &rows {
        println!("{}", format_row(row));
      }
    }
    Command::Assign {
      employee,
      job,
      start,
      end,
      status,
      salary,
      contract,
    } => {
      let id = client
        .create_assignment(&NewAssignmentArgs {
          employee_id: employee,
          job_id:      job,
          start_date:  start.to_string(),
          end_date:    end.map(|d| d.to_string()),
          status,
          salary,
          contract_id: contract,
        })
        .await?;
      println!("Job assigned successfully (assignment {id})");
    }
    Command::Terminate { id, end_date } => {
      let end_date = end_date.map(|d| d.to_string());
      client
        .update_status(id, AssignmentStatus::Terminated.as_str(), end_date.as_deref())
        .await?;
      println!("Assignment {id} terminated");
    }
    Command::SetStatus {
      id,
      status,
      end_date,
    } => {
      let end_date = end_date.map(|d| d.to_string());
      client
        .update_status(id, &status, end_date.as_deref())
        .await?;
      println!("Assignment {id} is now {status}");
    }
  }

  Ok(())
}

/// One line per assignment: id, status, employee, job and tenure.
fn format_row(row: &AssignmentDetail) -> String {
  let a = &row.assignment;
  let end = a
    .end_date
    .map(|d| d.to_string())
    .unwrap_or_else(|| "present".into());
  let salary = a
    .assigned_salary
    .map(|s| format!("  {s:.2}"))
    .unwrap_or_default();
  let department = row
    .department_name
    .as_deref()
    .map(|d| format!(" ({d})"))
    .unwrap_or_default();
  format!(
    "#{:<5} {:<10} {} {} {}  {} [{}]{}  {} → {}{}",
    a.assignment_id,
    a.status.as_str(),
    a.employee_id,
    row.first_name,
    row.last_name,
    row.job_title,
    row.job_code,
    department,
    a.start_date,
    end,
    salary,
  )
}
