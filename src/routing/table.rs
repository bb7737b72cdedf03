//! Route table storage.
//!
//! # Responsibilities
//! - Store declared routes with their compiled patterns
//! - Preserve registration order
//!
//! # Design Decisions
//! - Append-only: no removal; owners discard and rebuild
//! - Not sorted by specificity; precedence is the matcher's job

use serde::Serialize;

use crate::framework::HandlerRef;
use crate::routing::method::RoutableMethod;
use crate::routing::pattern::{CompiledRoute, PatternError};

/// A route as declared by the embedded framework, with "ALL" already expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDeclaration {
    pub path: String,
    pub method: RoutableMethod,
    pub handler: HandlerRef,
}

impl RouteDeclaration {
    pub fn new(path: impl Into<String>, method: RoutableMethod, handler: HandlerRef) -> Self {
        Self {
            path: path.into(),
            method,
            handler,
        }
    }
}

/// Ordered collection of declarations and their compiled matchers.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    pub(crate) entries: Vec<(RouteDeclaration, CompiledRoute)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the declaration's path and append it.
    pub fn add(&mut self, declaration: RouteDeclaration) -> Result<(), PatternError> {
        let compiled = CompiledRoute::compile(&declaration.path)?;
        self.entries.push((declaration, compiled));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(RouteDeclaration, CompiledRoute)> {
        self.entries.iter()
    }

    /// Declarations in registration order.
    pub fn declarations(&self) -> Vec<RouteDeclaration> {
        self.entries.iter().map(|(d, _)| d.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_order() {
        let mut table = RouteTable::new();
        assert!(table.is_empty());

        table
            .add(RouteDeclaration::new("/b", RoutableMethod::Get, HandlerRef::Placeholder))
            .unwrap();
        table
            .add(RouteDeclaration::new("/a/*", RoutableMethod::Post, HandlerRef::Placeholder))
            .unwrap();

        let paths: Vec<_> = table.declarations().into_iter().map(|d| d.path).collect();
        assert_eq!(paths, vec!["/b", "/a/*"]);
        assert_eq!(table.len(), 2);

        let (_, compiled) = table.iter().nth(1).unwrap();
        assert!(compiled.is_wildcard());
    }

    #[test]
    fn test_add_rejects_uncompilable_pattern() {
        let mut table = RouteTable::new();
        let result = table.add(RouteDeclaration::new(
            "/bad[",
            RoutableMethod::Get,
            HandlerRef::Placeholder,
        ));
        assert!(result.is_err());
        assert!(table.is_empty());
    }
}
