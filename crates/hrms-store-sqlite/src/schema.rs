//! SQL schema for the HRMS SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS departments (
    department_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    department_name TEXT NOT NULL,
    department_type TEXT,
    location        TEXT,
    contact_email   TEXT
);

CREATE TABLE IF NOT EXISTS employees (
    employee_id       TEXT PRIMARY KEY,   -- externally supplied
    first_name        TEXT NOT NULL,
    middle_name       TEXT,
    last_name         TEXT NOT NULL,
    gender            TEXT,
    nationality       TEXT,
    date_of_birth     TEXT,               -- YYYY-MM-DD
    employment_status TEXT NOT NULL DEFAULT 'Active',
    mobile_phone      TEXT,
    work_email        TEXT,
    personal_email    TEXT
);

CREATE TABLE IF NOT EXISTS jobs (
    job_id          INTEGER PRIMARY KEY AUTOINCREMENT,
    job_code        TEXT NOT NULL UNIQUE,
    job_title       TEXT NOT NULL,
    job_level       TEXT,
    job_category    TEXT,
    min_salary      REAL NOT NULL,
    max_salary      REAL NOT NULL,
    job_description TEXT,
    status          TEXT NOT NULL DEFAULT 'Active',
    department_id   INTEGER REFERENCES departments(department_id),
    CHECK (min_salary <= max_salary)
);

CREATE TABLE IF NOT EXISTS assignments (
    assignment_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id     TEXT    NOT NULL REFERENCES employees(employee_id),
    job_id          INTEGER NOT NULL REFERENCES jobs(job_id),
    contract_id     TEXT,
    start_date      TEXT    NOT NULL,  -- YYYY-MM-DD
    end_date        TEXT,              -- YYYY-MM-DD or NULL
    status          TEXT    NOT NULL DEFAULT 'Active',
    assigned_salary REAL
);

-- At most one Active assignment per employee. This is the only UNIQUE
-- constraint on `assignments`, so a UNIQUE failure there always means the
-- employee's active tenure is taken.
CREATE UNIQUE INDEX IF NOT EXISTS assignments_one_active_idx
    ON assignments(employee_id) WHERE status = 'Active';

CREATE INDEX IF NOT EXISTS assignments_employee_idx ON assignments(employee_id);
CREATE INDEX IF NOT EXISTS assignments_job_idx      ON assignments(job_id);
CREATE INDEX IF NOT EXISTS assignments_start_idx    ON assignments(start_date);

CREATE TABLE IF NOT EXISTS training_programs (
    program_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    program_code    TEXT NOT NULL UNIQUE,
    title           TEXT NOT NULL,
    objectives      TEXT,
    program_type    TEXT,
    subtype         TEXT,
    delivery_method TEXT,
    approval_status TEXT NOT NULL DEFAULT 'Pending'
);

CREATE TABLE IF NOT EXISTS employee_training (
    enrollment_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id       TEXT    NOT NULL REFERENCES employees(employee_id),
    program_id        INTEGER NOT NULL REFERENCES training_programs(program_id),
    completion_status TEXT    NOT NULL DEFAULT 'In Progress',
    UNIQUE (employee_id, program_id)
);

CREATE INDEX IF NOT EXISTS employee_training_program_idx ON employee_training(program_id);

CREATE TABLE IF NOT EXISTS performance_cycles (
    cycle_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    cycle_name TEXT NOT NULL,
    start_date TEXT NOT NULL,  -- YYYY-MM-DD
    end_date   TEXT NOT NULL,  -- YYYY-MM-DD
    CHECK (start_date < end_date)
);

-- Appraisals hang off an assignment, not an employee.
CREATE TABLE IF NOT EXISTS appraisals (
    appraisal_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    assignment_id     INTEGER NOT NULL REFERENCES assignments(assignment_id),
    cycle_id          INTEGER REFERENCES performance_cycles(cycle_id),
    appraisal_date    TEXT,   -- YYYY-MM-DD
    overall_score     REAL,
    manager_comments  TEXT,
    hr_comments       TEXT,
    employee_comments TEXT,
    reviewer_id       TEXT
);

CREATE INDEX IF NOT EXISTS appraisals_assignment_idx ON appraisals(assignment_id);

PRAGMA user_version = 2;
";
