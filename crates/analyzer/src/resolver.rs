use crate::imports::ImportTable;
use impact_model::Resolution;

/// Resolves raw reference names against one file's import table
///
/// Resolution only ever uses per-file import knowledge. Matching a target
/// against the full node set requires every file's facts and therefore
/// happens during assembly, not here.
pub struct NameResolver<'a> {
    imports: &'a ImportTable,
}

impl<'a> NameResolver<'a> {
    #[must_use]
    pub fn new(imports: &'a ImportTable) -> Self {
        Self { imports }
    }

    /// Resolve a raw name.
    ///
    /// The most specific import candidate wins: most dotted segments
    /// first, length as the tiebreak. Names without any candidate stay
    /// unresolved and are settled (or dropped) during assembly.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Resolution {
        self.imports
            .candidates(raw)
            .iter()
            .max_by_key(|candidate| (candidate.matches('.').count(), candidate.len()))
            .map(|best| Resolution::Qualified(best.clone()))
            .unwrap_or_else(|| Resolution::Unresolved(raw.to_string()))
    }

    /// All target forms a call edge should be emitted for: the preferred
    /// qualified form first, the raw short name as fallback when they
    /// differ. Downstream matching keeps whichever form names a real node.
    #[must_use]
    pub fn candidate_targets(&self, raw: &str) -> Vec<String> {
        match self.resolve(raw) {
            Resolution::Qualified(qualified) if qualified != raw => {
                vec![qualified, raw.to_string()]
            }
            resolution => vec![resolution.into_target()],
        }
    }
}
