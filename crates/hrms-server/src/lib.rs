//! HTTP server wiring for the HRMS.
//!
//! Mounts the [`hrms_api`] router under `/api` and wraps it in the
//! cross-cutting layers: CORS for the browser dashboard and request tracing.

pub mod error;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, http::HeaderValue};
use hrms_core::store::DirectoryStore;
use serde::Deserialize;
use tower_http::{
  cors::{AllowOrigin, Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `HRMS_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Origins allowed to call the API from a browser. Empty allows any.
  pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:            "127.0.0.1".into(),
      port:            5000,
      store_path:      PathBuf::from("hrms.db"),
      allowed_origins: Vec::new(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application router for `store`.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Result<Router, Error>
where
  S: DirectoryStore + 'static,
{
  Ok(
    Router::new()
      .nest("/api", hrms_api::api_router(store))
      .layer(cors_layer(&config.allowed_origins)?)
      .layer(TraceLayer::new_for_http()),
  )
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer, Error> {
  let allow_origin = if origins.is_empty() {
    AllowOrigin::from(Any)
  } else {
    let values = origins
      .iter()
      .map(|origin| {
        HeaderValue::from_str(origin).map_err(|source| Error::InvalidOrigin {
          origin: origin.clone(),
          source,
        })
      })
      .collect::<Result<Vec<_>, _>>()?;
    AllowOrigin::list(values)
  };

  Ok(
    CorsLayer::new()
      .allow_origin(allow_origin)
      .allow_methods(Any)
      .allow_headers(Any),
  )
}
