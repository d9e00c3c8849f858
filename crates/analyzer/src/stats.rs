use serde::{Deserialize, Serialize};

/// Statistics about an analysis run
///
/// Unresolvable targets and per-file parse failures are never fatal;
/// they degrade into the counts reported here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Files traversed successfully
    pub files: usize,

    /// Nodes in the assembled graph
    pub nodes: usize,

    /// Edges retained after filtering
    pub edges: usize,

    /// Edges dropped because the target matched no known node
    pub dropped_edges: usize,

    /// Edges dropped by the exclusion sets (standard modules, common names)
    pub excluded_edges: usize,

    /// Node identities observed with more than one kind
    pub kind_conflicts: usize,

    /// Per-file failures: (file, error)
    pub failures: Vec<(String, String)>,
}

impl AnalysisStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self) {
        self.files += 1;
    }

    pub fn add_failure(&mut self, file: impl Into<String>, error: impl Into<String>) {
        self.failures.push((file.into(), error.into()));
    }
}
