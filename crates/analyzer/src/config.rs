use std::collections::HashSet;

/// Python standard-library modules treated as outside the analyzed corpus
const DEFAULT_EXCLUDED_MODULES: &[&str] = &[
    "abc",
    "argparse",
    "asyncio",
    "base64",
    "collections",
    "contextlib",
    "copy",
    "csv",
    "dataclasses",
    "datetime",
    "enum",
    "functools",
    "hashlib",
    "io",
    "itertools",
    "json",
    "logging",
    "math",
    "os",
    "pathlib",
    "pickle",
    "random",
    "re",
    "shutil",
    "socket",
    "string",
    "subprocess",
    "sys",
    "tempfile",
    "threading",
    "time",
    "traceback",
    "typing",
    "unittest",
    "urllib",
    "uuid",
];

/// Call-target names too common to carry dependency signal: collection
/// and string methods plus builtins that show up in virtually every file
const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    "abs",
    "add",
    "append",
    "clear",
    "dict",
    "endswith",
    "enumerate",
    "extend",
    "filter",
    "float",
    "format",
    "get",
    "getattr",
    "hasattr",
    "insert",
    "int",
    "isinstance",
    "items",
    "join",
    "keys",
    "len",
    "list",
    "lower",
    "map",
    "max",
    "min",
    "open",
    "pop",
    "print",
    "range",
    "remove",
    "replace",
    "reverse",
    "set",
    "setattr",
    "sort",
    "sorted",
    "split",
    "startswith",
    "str",
    "strip",
    "sum",
    "super",
    "tuple",
    "type",
    "update",
    "upper",
    "values",
    "zip",
];

/// Configuration for graph assembly filtering
///
/// The exclusion sets mark call/import targets that live outside the
/// analyzed corpus: standard-library modules (matched on the leading path
/// segment) and method names so common that an edge to them carries no
/// signal. Both sets are configuration input, not engine logic.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Module names treated as external
    pub excluded_modules: HashSet<String>,

    /// Bare call-target names treated as external
    pub excluded_names: HashSet<String>,

    /// Minimum file count before per-file analysis fans out in parallel
    pub parallel_threshold: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            excluded_modules: DEFAULT_EXCLUDED_MODULES
                .iter()
                .map(ToString::to_string)
                .collect(),
            excluded_names: DEFAULT_EXCLUDED_NAMES
                .iter()
                .map(ToString::to_string)
                .collect(),
            parallel_threshold: 10,
        }
    }
}

impl AnalyzerConfig {
    /// Config with empty exclusion sets: keep every resolvable edge
    #[must_use]
    pub fn keep_all() -> Self {
        Self {
            excluded_modules: HashSet::new(),
            excluded_names: HashSet::new(),
            ..Self::default()
        }
    }

    /// Builder: add a module to the exclusion set
    #[must_use]
    pub fn exclude_module(mut self, module: impl Into<String>) -> Self {
        self.excluded_modules.insert(module.into());
        self
    }

    /// Builder: add a call-target name to the exclusion set
    #[must_use]
    pub fn exclude_name(mut self, name: impl Into<String>) -> Self {
        self.excluded_names.insert(name.into());
        self
    }

    /// Check whether an edge target is excluded as external.
    ///
    /// Dotted targets match on their leading segment, so `json.dumps`
    /// is excluded whenever `json` is.
    #[must_use]
    pub fn is_excluded(&self, target: &str) -> bool {
        let head = target.split('.').next().unwrap_or(target);
        self.excluded_modules.contains(head) || self.excluded_names.contains(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_targets_match_on_leading_segment() {
        let config = AnalyzerConfig::default();
        assert!(config.is_excluded("json"));
        assert!(config.is_excluded("json.dumps"));
        assert!(config.is_excluded("os.path.join"));
        assert!(!config.is_excluded("myapp.helpers"));
    }

    #[test]
    fn common_names_are_excluded_bare_only() {
        let config = AnalyzerConfig::default();
        assert!(config.is_excluded("append"));
        assert!(!config.is_excluded("Queue.append"));
    }

    #[test]
    fn keep_all_retains_everything() {
        let config = AnalyzerConfig::keep_all();
        assert!(!config.is_excluded("json.dumps"));
        assert!(!config.is_excluded("append"));
    }

    #[test]
    fn builder_extends_the_defaults() {
        let config = AnalyzerConfig::default()
            .exclude_module("django")
            .exclude_name("fetch");
        assert!(config.is_excluded("django.db"));
        assert!(config.is_excluded("fetch"));
    }
}
