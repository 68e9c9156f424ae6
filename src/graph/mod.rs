//! Provider graph: validation and registration ordering.

mod error;

pub use error::ResolveError;

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::{DependencyId, Module, Provider};

/// Directed graph over provider ids, with edges pointing at the providers a
/// node must be registered after.
#[derive(Debug, Default)]
pub struct ProviderGraph {
    /// Adjacency list: provider id -> non-defaulted parameter ids
    edges: FxHashMap<DependencyId, Vec<DependencyId>>,
    /// Every declared provider id, duplicates included, in declaration order
    declared: Vec<DependencyId>,
}

impl ProviderGraph {
    /// Build the graph from the union of all modules' providers.
    pub fn from_modules<'a>(modules: impl IntoIterator<Item = &'a Module>) -> Self {
        let mut graph = Self::default();
        for module in modules {
            for provider in &module.providers {
                graph.add_provider(provider);
            }
        }
        graph
    }

    pub fn add_provider(&mut self, provider: &Provider) {
        let id = provider.id();
        self.declared.push(id.clone());
        // Last writer wins in the map; `declared` keeps the full list so
        // duplicate detection still sees every declaration
        self.edges.insert(id, provider.dependency_edges());
    }

    /// Validate the graph and return the registration order.
    ///
    /// Shape errors come first: every referenced id must be provided. Then
    /// uniqueness: no id may be declared twice. Cycles are detected during
    /// the sort itself.
    pub fn resolve(&self) -> Result<Vec<DependencyId>, ResolveError> {
        self.check_missing()?;
        self.check_duplicates()?;
        self.topological_sort()
    }

    fn check_missing(&self) -> Result<(), ResolveError> {
        let mut missing: Vec<DependencyId> = self
            .edges
            .values()
            .flatten()
            .filter(|reference| !self.edges.contains_key(*reference))
            .cloned()
            .collect();
        missing.sort();
        missing.dedup();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ResolveError::MissingDependencies { missing })
        }
    }

    fn check_duplicates(&self) -> Result<(), ResolveError> {
        let mut seen = FxHashSet::default();
        let mut duplicates = IndexSet::new();
        for id in &self.declared {
            if !seen.insert(id) {
                duplicates.insert(id.clone());
            }
        }

        if duplicates.is_empty() {
            Ok(())
        } else {
            Err(ResolveError::DuplicateDependencies {
                duplicates: duplicates.into_iter().collect(),
            })
        }
    }

    /// Depth-first post-order sort. Keys are visited in sorted id order so
    /// the output is reproducible for a given input; edges are followed in
    /// declared parameter order.
    fn topological_sort(&self) -> Result<Vec<DependencyId>, ResolveError> {
        let mut keys: Vec<&DependencyId> = self.edges.keys().collect();
        keys.sort();

        let mut sorted = Vec::with_capacity(keys.len());
        let mut visited = FxHashSet::default();
        let mut on_stack = FxHashSet::default();

        for key in keys {
            self.visit(key, &mut visited, &mut on_stack, &mut sorted)?;
        }

        Ok(sorted)
    }

    fn visit(
        &self,
        node: &DependencyId,
        visited: &mut FxHashSet<DependencyId>,
        on_stack: &mut FxHashSet<DependencyId>,
        sorted: &mut Vec<DependencyId>,
    ) -> Result<(), ResolveError> {
        if on_stack.contains(node) {
            return Err(ResolveError::CircularDependency {
                node: node.clone(),
                edges: self.edges_of(node).to_vec(),
            });
        }
        if visited.contains(node) {
            return Ok(());
        }

        on_stack.insert(node.clone());
        for edge in self.edges_of(node) {
            self.visit(edge, visited, on_stack, sorted)?;
        }
        on_stack.remove(node);

        visited.insert(node.clone());
        sorted.push(node.clone());
        Ok(())
    }

    fn edges_of(&self, node: &DependencyId) -> &[DependencyId] {
        self.edges.get(node).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Parameter, Provider, ProviderForm};

    fn provider(name: Option<&str>, ty: &str, deps: &[&str]) -> Provider {
        Provider {
            form: if deps.is_empty() {
                ProviderForm::Property
            } else {
                ProviderForm::Function
            },
            name: name.map(str::to_string),
            return_type: ty.to_string(),
            body: format!("provide{}", ty),
            parameters: deps
                .iter()
                .map(|dep| Parameter {
                    ty: dep.to_string(),
                    label: "_".to_string(),
                    default_value: None,
                    referenced_name: None,
                })
                .collect(),
        }
    }

    fn graph_of(providers: &[Provider]) -> ProviderGraph {
        let mut graph = ProviderGraph::default();
        for p in providers {
            graph.add_provider(p);
        }
        graph
    }

    fn position(order: &[DependencyId], id: &str) -> usize {
        order
            .iter()
            .position(|o| o.as_str() == id)
            .unwrap_or_else(|| panic!("{} not in order", id))
    }

    #[test]
    fn test_linear_chain_orders_dependencies_first() {
        let graph = graph_of(&[
            provider(None, "A", &["B"]),
            provider(None, "B", &["C"]),
            provider(None, "C", &[]),
        ]);
        let order = graph.resolve().unwrap();
        assert_eq!(
            order.iter().map(|id| id.as_str()).collect::<Vec<_>>(),
            vec!["_:C", "_:B", "_:A"]
        );
    }

    #[test]
    fn test_diamond_orders_shared_dependency_first() {
        let graph = graph_of(&[
            provider(None, "A", &["B", "C"]),
            provider(None, "B", &["D"]),
            provider(None, "C", &["D"]),
            provider(None, "D", &[]),
        ]);
        let order = graph.resolve().unwrap();
        assert_eq!(order.len(), 4);
        assert!(position(&order, "_:D") < position(&order, "_:B"));
        assert!(position(&order, "_:D") < position(&order, "_:C"));
        assert!(position(&order, "_:B") < position(&order, "_:A"));
        assert!(position(&order, "_:C") < position(&order, "_:A"));
    }

    #[test]
    fn test_missing_dependencies_reported_as_a_set() {
        let graph = graph_of(&[
            provider(None, "A", &["B"]),
            provider(None, "B", &["C", "E"]),
            provider(None, "C", &["D"]),
        ]);
        let error = graph.resolve().unwrap_err();
        let ResolveError::MissingDependencies { missing } = error else {
            panic!("expected missing dependencies, got {:?}", error);
        };
        assert_eq!(
            missing.iter().map(|id| id.as_str()).collect::<Vec<_>>(),
            vec!["_:D", "_:E"]
        );
    }

    #[test]
    fn test_missing_is_reported_before_duplicates() {
        // _:A is declared twice AND references an unprovided id
        let graph = graph_of(&[
            provider(None, "A", &["Ghost"]),
            provider(None, "A", &[]),
        ]);
        let error = graph.resolve().unwrap_err();
        assert!(matches!(error, ResolveError::MissingDependencies { .. }));
    }

    #[test]
    fn test_duplicate_ids_reported_in_declaration_order() {
        let graph = graph_of(&[
            provider(None, "B", &[]),
            provider(None, "A", &[]),
            provider(None, "B", &[]),
            provider(None, "A", &[]),
        ]);
        let error = graph.resolve().unwrap_err();
        let ResolveError::DuplicateDependencies { duplicates } = error else {
            panic!("expected duplicates, got {:?}", error);
        };
        assert_eq!(
            duplicates.iter().map(|id| id.as_str()).collect::<Vec<_>>(),
            vec!["_:B", "_:A"]
        );
    }

    #[test]
    fn test_named_providers_of_same_type_do_not_collide() {
        let graph = graph_of(&[
            provider(Some("Production"), "APIClient", &[]),
            provider(Some("Staging"), "APIClient", &[]),
        ]);
        let order = graph.resolve().unwrap();
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn test_cycle_is_detected_at_the_first_sorted_node() {
        let graph = graph_of(&[
            provider(None, "A", &["B"]),
            provider(None, "B", &["C"]),
            provider(None, "C", &["A"]),
        ]);
        let error = graph.resolve().unwrap_err();
        let ResolveError::CircularDependency { node, edges } = error else {
            panic!("expected cycle, got {:?}", error);
        };
        assert_eq!(node.as_str(), "_:A");
        assert_eq!(edges[0].as_str(), "_:B");
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let graph = graph_of(&[provider(None, "A", &["A"])]);
        let error = graph.resolve().unwrap_err();
        assert!(matches!(error, ResolveError::CircularDependency { .. }));
    }

    #[test]
    fn test_resolution_is_deterministic_for_independent_providers() {
        let graph = graph_of(&[
            provider(None, "C", &[]),
            provider(None, "A", &[]),
            provider(None, "B", &[]),
        ]);
        let first = graph.resolve().unwrap();
        let second = graph.resolve().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|id| id.as_str()).collect::<Vec<_>>(),
            vec!["_:A", "_:B", "_:C"]
        );
    }
}
