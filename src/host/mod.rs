//! Host dispatcher subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout, trace)
//!     → admin.rs ({prefix}/routes, {prefix}/lookup, {prefix}/status)
//!     → fallback: bridge lookup(path, method)
//!         → no match: host 404
//!         → match: context.rs HostContext → DispatchEntryPoint::call
//!     → Send to client
//! ```

pub mod admin;
pub mod context;
pub mod server;

pub use context::HostContext;
pub use server::{HostServer, HostState};
