//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Bridge and host produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (lookup outcomes, dispatch counters and latency)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the host into the dispatch failure log
//! - Metrics are cheap when no recorder is installed

pub mod logging;
pub mod metrics;
