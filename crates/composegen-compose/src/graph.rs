//! Service startup ordering over `depends_on` edges.

use std::collections::{BTreeMap, HashMap};

use composegen_common::error::{ComposeGenError, Result};
use petgraph::graph::NodeIndex;

use crate::model::Service;

/// A dependency graph of services.
#[derive(Debug)]
pub struct DependencyGraph {
    /// Internal petgraph representation.
    graph: petgraph::Graph<String, ()>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: petgraph::Graph::new(),
        }
    }

    /// Builds the graph of a service mapping. Edges to services outside
    /// the mapping are ignored.
    #[must_use]
    pub fn from_services(services: &BTreeMap<String, Service>) -> Self {
        let mut graph = Self::new();
        let nodes: HashMap<&str, NodeIndex> = services
            .keys()
            .map(|name| (name.as_str(), graph.add_service(name.as_str())))
            .collect();
        for (name, service) in services {
            for dep in service.dependency_names() {
                if let (Some(&dependent), Some(&dependency)) = (nodes.get(name.as_str()), nodes.get(dep)) {
                    graph.add_dependency(dependent, dependency);
                }
            }
        }
        graph
    }

    /// Adds a service node to the graph.
    pub fn add_service(&mut self, name: impl Into<String>) -> NodeIndex {
        self.graph.add_node(name.into())
    }

    /// Adds a dependency edge: `dependent` depends on `dependency`.
    ///
    /// The graph edge points from `dependency` to `dependent`
    /// so that topological sort yields dependencies first.
    pub fn add_dependency(&mut self, dependent: NodeIndex, dependency: NodeIndex) {
        let _ = self.graph.add_edge(dependency, dependent, ());
    }

    /// Returns a startup ordering in which dependencies come first.
    ///
    /// # Errors
    ///
    /// Returns an error naming the services on a cycle.
    pub fn startup_order(&self) -> Result<Vec<String>> {
        match petgraph::algo::toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .iter()
                .filter_map(|&idx| self.graph.node_weight(idx).cloned())
                .collect()),
            Err(_cycle) => Err(ComposeGenError::CyclicDependency {
                services: self.cycle_members(),
            }),
        }
    }

    fn cycle_members(&self) -> Vec<String> {
        let mut members: Vec<String> = petgraph::algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || scc.iter().any(|&idx| self.graph.contains_edge(idx, idx))
            })
            .flatten()
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect();
        members.sort();
        members
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
