use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of structural entity in the dependency graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    File,
    Class,
    Function,
    Method,
}

impl NodeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Class => "class",
            NodeKind::Function => "function",
            NodeKind::Method => "method",
        }
    }
}

/// Kind of relationship between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Source calls target (function/method call)
    Calls,

    /// Source file imports target module or symbol
    Imports,

    /// Source class inherits from target
    Inherits,
}

impl EdgeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Calls => "calls",
            EdgeKind::Imports => "imports",
            EdgeKind::Inherits => "inherits",
        }
    }
}

/// Where a node or edge fact was observed in source
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Source file path
    pub file_path: String,

    /// Line number (1-indexed)
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }
}

/// A structural entity in the dependency graph
///
/// The identity is the fully qualified name and serves as the unique key:
/// two facts with the same identity and kind merge into one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Fully qualified name, e.g. `"UserService.create_user"`
    pub identity: String,

    /// Entity kind
    pub kind: NodeKind,

    /// Declaration site
    pub declared_at: SourceLocation,

    /// Kind-specific metadata (parameter list, base classes, ...)
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Node {
    pub fn new(identity: impl Into<String>, kind: NodeKind, declared_at: SourceLocation) -> Self {
        Self {
            identity: identity.into(),
            kind,
            declared_at,
            metadata: HashMap::new(),
        }
    }

    /// Builder: attach a metadata entry
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A directed, typed relationship fact between two identities
///
/// The source always names an emitted node; the target may still be
/// unresolved when the fact is emitted and is settled during assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Identity of the originating node
    pub source: String,

    /// Identity of the referenced node (or module, for imports)
    pub target: String,

    /// Relationship kind
    pub kind: EdgeKind,

    /// Reference site
    pub site: SourceLocation,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: EdgeKind,
        site: SourceLocation,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            site,
        }
    }

    /// Key used to collapse duplicate edges
    #[must_use]
    pub fn dedup_key(&self) -> (&str, &str, EdgeKind) {
        (self.source.as_str(), self.target.as_str(), self.kind)
    }
}

/// Outcome of resolving a raw reference through a file's import table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The name matched an import; carries the qualified identity
    Qualified(String),

    /// No import matched; carries the raw name for later structural
    /// matching against the full node set
    Unresolved(String),
}

impl Resolution {
    /// Unwrap into the target string used on an edge
    #[must_use]
    pub fn into_target(self) -> String {
        match self {
            Resolution::Qualified(name) | Resolution::Unresolved(name) => name,
        }
    }

    #[must_use]
    pub const fn is_qualified(&self) -> bool {
        matches!(self, Resolution::Qualified(_))
    }
}

/// A source file with its contents already materialized in memory
///
/// Discovery loads file contents before analysis starts; nothing inside
/// the engine blocks on I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the analyzed root; doubles as the file node identity
    pub path: String,

    /// Full file contents
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}
