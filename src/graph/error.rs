use std::fmt;

use crate::model::DependencyId;

/// Validation failures of the provider graph. All are fatal; the first one
/// found surfaces to the caller and no output is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A referenced provider id is not provided by any module
    MissingDependencies { missing: Vec<DependencyId> },

    /// Two providers share an id
    DuplicateDependencies { duplicates: Vec<DependencyId> },

    /// DFS encountered a node already on the visiting stack
    CircularDependency {
        node: DependencyId,
        edges: Vec<DependencyId>,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::MissingDependencies { missing } => {
                write!(f, "Missing dependencies: {}", join(missing, ", "))
            }
            ResolveError::DuplicateDependencies { duplicates } => {
                write!(f, "Duplicate dependencies found: {}", join(duplicates, ", "))
            }
            ResolveError::CircularDependency { node, edges } => {
                write!(
                    f,
                    "Circular dependency detected at '{}' with one of its dependencies: {}",
                    node,
                    join(edges, " -> ")
                )
            }
        }
    }
}

impl std::error::Error for ResolveError {}

fn join(ids: &[DependencyId], separator: &str) -> String {
    ids.iter()
        .map(DependencyId::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}
