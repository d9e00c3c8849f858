use crate::error::{Result, StoreError};
use crate::store::GraphStore;
use impact_model::{Edge, EdgeKind, Node, NodeKind};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

/// In-memory graph store
///
/// Backed by a petgraph directed graph with an identity index for fast
/// lookup; edge weights carry the relationship kind.
pub struct MemoryGraphStore {
    graph: DiGraph<Node, EdgeKind>,
    identity_index: HashMap<String, NodeIndex>,
}

/// A node reached by an impact query, with its hop distance
#[derive(Debug, Clone, Serialize)]
pub struct ImpactedNode {
    pub identity: String,
    pub kind: NodeKind,
    pub distance: usize,
}

impl MemoryGraphStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            identity_index: HashMap::new(),
        }
    }

    /// Find a node's index by identity
    #[must_use]
    pub fn find(&self, identity: &str) -> Option<NodeIndex> {
        self.identity_index.get(identity).copied()
    }

    /// Get node data by index
    #[must_use]
    pub fn node(&self, idx: NodeIndex) -> Option<&Node> {
        self.graph.node_weight(idx)
    }

    /// Forward impact: everything reachable from the node via outgoing
    /// `Calls` edges within `max_hops`
    pub fn callees_within(&self, identity: &str, max_hops: usize) -> Result<Vec<ImpactedNode>> {
        self.reach(identity, max_hops, Direction::Outgoing)
    }

    /// Reverse impact: everything that reaches the node via incoming
    /// `Calls` edges within `max_hops`, i.e. what breaks if it changes
    pub fn callers_within(&self, identity: &str, max_hops: usize) -> Result<Vec<ImpactedNode>> {
        self.reach(identity, max_hops, Direction::Incoming)
    }

    /// Breadth-first reachability over `Calls` edges only, bounded by hop
    /// count. Results are sorted by (distance, identity) for stable output.
    fn reach(
        &self,
        identity: &str,
        max_hops: usize,
        direction: Direction,
    ) -> Result<Vec<ImpactedNode>> {
        let start = self
            .find(identity)
            .ok_or_else(|| StoreError::NodeNotFound(identity.to_string()))?;

        let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
        let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::from([(start, 0)]);
        let mut reached = Vec::new();

        while let Some((current, distance)) = queue.pop_front() {
            if distance >= max_hops {
                continue;
            }
            for edge in self.graph.edges_directed(current, direction) {
                if *edge.weight() != EdgeKind::Calls {
                    continue;
                }
                let next = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                if !visited.insert(next) {
                    continue;
                }
                if let Some(node) = self.graph.node_weight(next) {
                    reached.push(ImpactedNode {
                        identity: node.identity.clone(),
                        kind: node.kind,
                        distance: distance + 1,
                    });
                }
                queue.push_back((next, distance + 1));
            }
        }

        reached.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| a.identity.cmp(&b.identity))
        });
        Ok(reached)
    }
}

impl Default for MemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for MemoryGraphStore {
    fn upsert_node(&mut self, node: &Node) -> Result<()> {
        match self.identity_index.get(&node.identity) {
            Some(&idx) => {
                let existing = &mut self.graph[idx];
                if existing.kind != node.kind {
                    return Err(StoreError::KindMismatch {
                        identity: node.identity.clone(),
                        stored: existing.kind,
                        incoming: node.kind,
                    });
                }
                // Re-submission updates properties instead of duplicating
                existing.declared_at = node.declared_at.clone();
                existing.metadata = node.metadata.clone();
                Ok(())
            }
            None => {
                let idx = self.graph.add_node(node.clone());
                self.identity_index.insert(node.identity.clone(), idx);
                Ok(())
            }
        }
    }

    fn upsert_edge(&mut self, edge: &Edge) -> Result<()> {
        let source = self
            .find(&edge.source)
            .ok_or_else(|| StoreError::MissingEndpoint(edge.source.clone()))?;
        let target = self
            .find(&edge.target)
            .ok_or_else(|| StoreError::MissingEndpoint(edge.target.clone()))?;

        let exists = self
            .graph
            .edges_connecting(source, target)
            .any(|existing| *existing.weight() == edge.kind);
        if !exists {
            self.graph.add_edge(source, target, edge.kind);
        }
        Ok(())
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
