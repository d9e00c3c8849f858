use crate::assembler::{AssembledGraph, GraphAssembler};
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::stats::AnalysisStats;
use crate::visitor::{FileFacts, FileVisitor};
use impact_model::SourceFile;
use rayon::prelude::*;
use tree_sitter::Parser;

/// Top-level code graph construction engine
///
/// Per-file traversal fans out over independent workers; assembly waits
/// for all of them, since edge validity depends on the global node set.
pub struct CodeAnalyzer {
    config: AnalyzerConfig,
}

impl CodeAnalyzer {
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(AnalyzerConfig::default())
    }

    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one file's source and return its raw facts.
    ///
    /// A file with syntax errors is a per-file failure: the caller skips
    /// it and the rest of the run continues.
    pub fn analyze_file(&self, file: &SourceFile) -> Result<FileFacts> {
        let mut parser = Parser::new();
        let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        parser
            .set_language(&language)
            .map_err(|e| AnalyzerError::tree_sitter(format!("failed to set language: {e}")))?;

        let tree = parser
            .parse(&file.content, None)
            .ok_or_else(|| AnalyzerError::parse(&file.path, "parser produced no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(AnalyzerError::parse(&file.path, "syntax error"));
        }

        FileVisitor::new(&file.path, &file.content).run(root)
    }

    /// Analyze all files and assemble the final graph.
    ///
    /// Files are independent: each worker owns its parser, scope stack,
    /// import table, and private fact list, so no locking is needed until
    /// the assembly barrier. Small inputs stay sequential; thread fan-out
    /// costs more than it buys there.
    pub fn analyze(&self, files: &[SourceFile]) -> AssembledGraph {
        let results: Vec<(&str, Result<FileFacts>)> =
            if files.len() >= self.config.parallel_threshold {
                files
                    .par_iter()
                    .map(|file| (file.path.as_str(), self.analyze_file(file)))
                    .collect()
            } else {
                files
                    .iter()
                    .map(|file| (file.path.as_str(), self.analyze_file(file)))
                    .collect()
            };

        let mut stats = AnalysisStats::new();
        let mut collected = Vec::with_capacity(results.len());
        for (path, result) in results {
            match result {
                Ok(facts) => {
                    stats.add_file();
                    collected.push(facts);
                }
                Err(e) => {
                    log::warn!("Skipping {path}: {e}");
                    stats.add_failure(path, e.to_string());
                }
            }
        }

        GraphAssembler::new(&self.config).assemble(collected, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_bad_file_never_aborts_the_run() {
        let files = vec![
            SourceFile::new("good.py", "def fine():\n    pass\n"),
            SourceFile::new("bad.py", "def broken(:\n"),
        ];

        let graph = CodeAnalyzer::with_defaults().analyze(&files);

        assert_eq!(graph.stats.files, 1);
        assert_eq!(graph.stats.failures.len(), 1);
        assert_eq!(graph.stats.failures[0].0, "bad.py");
        assert!(graph.nodes.iter().any(|n| n.identity == "fine"));
    }

    #[test]
    fn empty_input_yields_empty_graph() {
        let graph = CodeAnalyzer::with_defaults().analyze(&[]);
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }
}
