//! Error type for `hrms-server`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid allowed origin {origin:?}: {source}")]
  InvalidOrigin {
    origin: String,
    #[source]
    source: axum::http::header::InvalidHeaderValue,
  },
}
