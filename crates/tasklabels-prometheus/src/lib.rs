//! Prometheus metrics backend for tasklabels.
//!
//! This crate provides a [`PrometheusMetrics`] implementation of [`tasklabels_core::MetricsBackend`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tasklabels_core::LabelContext;
//! use tasklabels_model::EnvironmentDescriptor;
//! use tasklabels_prometheus::{Encoder, PrometheusMetrics, TextEncoder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let ctx = LabelContext::propagating(EnvironmentDescriptor::with_major(24))
//!     .with_metrics(Arc::new(metrics.clone()));
//!
//! ctx.with_labels_sync(&tasklabels_core::label_values!["job", "gc"], || ())?;
//!
//! let mut buffer = Vec::new();
//! TextEncoder::new().encode(&metrics.gather(), &mut buffer)?;
//! assert!(String::from_utf8(buffer)?.contains("tasklabels_scopes_entered_total"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `tasklabels_scopes_entered_total{mode}` - Counter
//! - `tasklabels_merge_failures_total` - Counter
//! - `tasklabels_unsupported_total{reason}` - Counter
//!
//! No HTTP server is included; expose [`PrometheusMetrics::gather`] through
//! whatever framework the application already runs.

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
