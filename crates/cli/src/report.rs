use impact_store::ImpactedNode;
use serde::Serialize;

/// JSON payload for `impact query`
#[derive(Debug, Serialize)]
pub struct ImpactReport {
    /// Identity the query started from
    pub symbol: String,

    /// Maximum hop count used
    pub depth: usize,

    /// What breaks if the symbol changes (reverse call reachability)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callers: Option<Vec<ImpactedNode>>,

    /// What the symbol depends on (forward call reachability)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callees: Option<Vec<ImpactedNode>>,
}
