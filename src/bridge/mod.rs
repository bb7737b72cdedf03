//! Bridge subsystem.
//!
//! # Data Flow
//! ```text
//! Host dispatcher
//!     → adapter.rs lookup(path, method)
//!         → refresh (framework routes → fresh RouteTable)
//!         → RouteTable::find (normalized method)
//!     ← Lookup { entry, method, path }
//!
//! Host dispatcher (request)
//!     → dispatch.rs DispatchEntryPoint::call(ctx, request)
//!     → embedded framework handle()
//!     ← response, or fixed 500 on failure
//!
//! Direct registration:
//!     registration.rs RouteSpec::builder() … build()
//!     → adapter.rs route(spec) (shape + collision checks)
//!     → embedded framework register()
//! ```

pub mod adapter;
pub mod dispatch;
pub mod registration;

pub use adapter::{BridgeAdapter, Lookup};
pub use dispatch::{failure_response, DispatchEntryPoint, FAILURE_BODY};
pub use registration::{RegistrationError, RouteSpec, RouteSpecBuilder, RouteTarget};
