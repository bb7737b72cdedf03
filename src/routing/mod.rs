//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Embedded framework routes (method | ALL, path, handler)
//!     → bridge refresh (expand ALL per routable method)
//!     → table.rs (append declaration + compiled pattern)
//!     → pattern.rs (path pattern → anchored regex)
//!
//! Lookup (per request):
//!     (method, url)
//!     → matcher.rs (literal pass → parameter pass → wildcard pass)
//!     → Return: matched RouteDeclaration or None
//! ```
//!
//! # Design Decisions
//! - Table rebuilt on every lookup; never mutated concurrently
//! - Precedence enforced by the matcher, not by storage order
//! - Deterministic: same table and input always resolve the same route

pub mod matcher;
pub mod method;
pub mod pattern;
pub mod table;

pub use method::{DeclaredMethod, RoutableMethod, UnknownMethod};
pub use pattern::{CompiledRoute, PatternError};
pub use table::{RouteDeclaration, RouteTable};
