use crate::config::AnalyzerConfig;
use crate::stats::AnalysisStats;
use crate::visitor::FileFacts;
use impact_model::{Edge, EdgeKind, Node};
use serde::{Deserialize, Serialize};
use std::collections::{hash_map::Entry, HashMap, HashSet};

/// Final, deduplicated node/edge set plus run statistics
///
/// Nodes and edges are sorted by identity so identical input yields
/// identical output, independent of file traversal order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembledGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub stats: AnalysisStats,
}

/// Merges per-file facts into the final graph
///
/// Runs once, after every file's facts are collected: edge retention
/// depends on the complete node set, so assembly must not start earlier.
pub struct GraphAssembler<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> GraphAssembler<'a> {
    #[must_use]
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn assemble(&self, facts: Vec<FileFacts>, mut stats: AnalysisStats) -> AssembledGraph {
        let mut raw_edges = Vec::new();
        let mut nodes: HashMap<String, Node> = HashMap::new();

        // Merge nodes by identity: last write wins on metadata, a kind
        // disagreement is a data-integrity warning, not an error
        for file_facts in facts {
            for node in file_facts.nodes {
                match nodes.entry(node.identity.clone()) {
                    Entry::Occupied(mut slot) => {
                        if slot.get().kind != node.kind {
                            log::warn!(
                                "Node kind conflict for '{}': {} vs {}, keeping the latter",
                                node.identity,
                                slot.get().kind.as_str(),
                                node.kind.as_str()
                            );
                            stats.kind_conflicts += 1;
                        }
                        slot.insert(node);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(node);
                    }
                }
            }
            raw_edges.extend(file_facts.edges);
        }

        // Filter and deduplicate edges against the global node set
        let mut seen: HashSet<(String, String, EdgeKind)> = HashSet::new();
        let mut edges = Vec::new();
        for edge in raw_edges {
            // Exclusion applies even to known-node targets: common names
            // are corpus-external noise by policy
            if self.config.is_excluded(&edge.target) {
                stats.excluded_edges += 1;
                continue;
            }
            if !nodes.contains_key(&edge.source) {
                stats.dropped_edges += 1;
                continue;
            }
            // Imports may target a module identity that is not a node;
            // every other kind must land on a known node
            if edge.kind != EdgeKind::Imports && !nodes.contains_key(&edge.target) {
                stats.dropped_edges += 1;
                continue;
            }
            if seen.insert((edge.source.clone(), edge.target.clone(), edge.kind)) {
                edges.push(edge);
            }
        }

        let mut nodes: Vec<Node> = nodes.into_values().collect();
        nodes.sort_by(|a, b| a.identity.cmp(&b.identity));
        edges.sort_by(|a, b| a.dedup_key().cmp(&b.dedup_key()));

        stats.nodes = nodes.len();
        stats.edges = edges.len();
        log::info!(
            "Assembled graph: {} nodes, {} edges ({} unresolved, {} excluded)",
            stats.nodes,
            stats.edges,
            stats.dropped_edges,
            stats.excluded_edges
        );

        AssembledGraph {
            nodes,
            edges,
            stats,
        }
    }
}
