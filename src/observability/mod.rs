//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! store commits / source reloads produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (commit counters, visible-container gauge, commit latency)
//!
//! Consumers:
//!     → Log output (stdout, filtered by RUST_LOG or config)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; the binary installs subscriber and recorder
//! - Metric updates without an installed recorder are no-ops

pub mod logging;
pub mod metrics;
