use crate::error::Result;
use impact_model::{Edge, Node, SourceLocation};

/// Persistence boundary for assembled graphs
///
/// Node upserts create-or-match by `(kind, identity)` and update metadata
/// in place; edge upserts create-or-match by `(kind, source, target)` and
/// require both endpoints to exist already.
pub trait GraphStore {
    fn upsert_node(&mut self, node: &Node) -> Result<()>;

    fn upsert_edge(&mut self, edge: &Edge) -> Result<()>;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;
}

/// One item the store refused, with enough context to retry or skip
#[derive(Debug, Clone)]
pub struct RejectedItem {
    /// Identity of the offending node, or the edge's source identity
    pub identity: String,

    /// Where the fact was observed in source
    pub site: SourceLocation,

    /// The store's reason
    pub error: String,
}

/// Outcome of loading a whole graph across the boundary
#[derive(Debug, Default)]
pub struct LoadReport {
    pub nodes_loaded: usize,
    pub edges_loaded: usize,
    pub rejected: Vec<RejectedItem>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Load nodes first, then edges, continuing past per-item failures.
///
/// Import edges to bare module identities are expected rejections: the
/// store requires both endpoints, and modules outside the corpus never
/// became nodes.
pub fn load_graph<S: GraphStore>(store: &mut S, nodes: &[Node], edges: &[Edge]) -> LoadReport {
    let mut report = LoadReport::default();

    for node in nodes {
        match store.upsert_node(node) {
            Ok(()) => report.nodes_loaded += 1,
            Err(e) => {
                log::warn!("Rejected node '{}': {e}", node.identity);
                report.rejected.push(RejectedItem {
                    identity: node.identity.clone(),
                    site: node.declared_at.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    for edge in edges {
        match store.upsert_edge(edge) {
            Ok(()) => report.edges_loaded += 1,
            Err(e) => {
                log::debug!(
                    "Rejected {} edge {} -> {}: {e}",
                    edge.kind.as_str(),
                    edge.source,
                    edge.target
                );
                report.rejected.push(RejectedItem {
                    identity: edge.source.clone(),
                    site: edge.site.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report
}
