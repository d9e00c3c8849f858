use std::collections::HashMap;

/// Per-file mapping from local alias to candidate fully-qualified names
///
/// `from models import Base as B` binds both `B` and the bare `Base` to
/// `models.Base`, because call sites frequently reference the short name
/// only. Keeping every candidate in an explicit set makes the long/short
/// ambiguity a first-class data structure instead of a dictionary
/// overwrite side effect; the occasional false-positive match is an
/// accepted precision/recall tradeoff.
///
/// Built once while traversing a file, consulted read-only by the
/// resolver, and discarded with the file's walk.
#[derive(Debug, Default)]
pub struct ImportTable {
    bindings: HashMap<String, Vec<String>>,
}

impl ImportTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a local alias to a fully-qualified source.
    ///
    /// Repeated bindings of the same alias accumulate; an exact duplicate
    /// candidate is kept once.
    pub fn bind(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        let target = target.into();
        let candidates = self.bindings.entry(alias.into()).or_default();
        if !candidates.contains(&target) {
            candidates.push(target);
        }
    }

    /// Candidate fully-qualified names for a local alias, in binding order
    #[must_use]
    pub fn candidates(&self, alias: &str) -> &[String] {
        self.bindings.get(alias).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.bindings.contains_key(alias)
    }

    /// Number of distinct aliases bound
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
