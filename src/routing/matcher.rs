//! Route resolution.
//!
//! # Responsibilities
//! - Resolve (method, url) to the declared route that serves it
//! - Apply precedence: literal, then parameterized, then wildcard
//!
//! # Design Decisions
//! - Three passes over registration order; storage order never decides
//!   between a literal and a wildcard
//! - Method comparison is exact; "ALL" was expanded when the table was built
//! - No match is `None`, not an error

use crate::routing::method::RoutableMethod;
use crate::routing::table::{RouteDeclaration, RouteTable};

impl RouteTable {
    /// Find the declaration serving `method` at `url`.
    pub fn find(&self, method: RoutableMethod, url: &str) -> Option<&RouteDeclaration> {
        // Literal path short-circuits all pattern matching
        if let Some((decl, _)) = self
            .entries
            .iter()
            .find(|(decl, _)| decl.method == method && decl.path == url)
        {
            return Some(decl);
        }

        let pass = |wildcard: bool| {
            self.entries
                .iter()
                .filter(|(_, compiled)| compiled.is_wildcard() == wildcard)
                .find(|(decl, compiled)| decl.method == method && compiled.matches(url))
                .map(|(decl, _)| decl)
        };

        pass(false).or_else(|| pass(true))
    }
}
