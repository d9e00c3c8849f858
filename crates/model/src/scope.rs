/// One enclosing definition on the traversal's scope stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeFrame {
    /// An enclosing `class` body; holds the class's qualified identity
    Class(String),

    /// An enclosing function body; holds the function's qualified identity
    Function(String),
}

/// Stack of enclosing class/function frames for one file's traversal
///
/// Owned by a single file walk and never shared across files. Frames are
/// pushed when the walk enters a class or function body and popped on
/// exit; qualified identities are a pure function of the stack plus a
/// local name.
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Qualify a function or method name against the innermost frame.
    ///
    /// Module scope yields the bare name, a class frame yields
    /// `Class.name`, and a function frame yields `outer.name`. Nesting
    /// is recursive: the enclosing identity is itself already qualified.
    #[must_use]
    pub fn qualify(&self, local: &str) -> String {
        match self.frames.last() {
            Some(ScopeFrame::Class(class)) => format!("{class}.{local}"),
            Some(ScopeFrame::Function(function)) => format!("{function}.{local}"),
            None => local.to_string(),
        }
    }

    /// Qualify a class name.
    ///
    /// Classes dotted-nest under enclosing classes (`Outer.Inner`) but
    /// stay bare under enclosing functions.
    #[must_use]
    pub fn qualify_class(&self, local: &str) -> String {
        self.enclosing_class()
            .map(|class| format!("{class}.{local}"))
            .unwrap_or_else(|| local.to_string())
    }

    /// Innermost enclosing class identity, skipping function frames
    #[must_use]
    pub fn enclosing_class(&self) -> Option<&str> {
        self.frames.iter().rev().find_map(|frame| match frame {
            ScopeFrame::Class(class) => Some(class.as_str()),
            ScopeFrame::Function(_) => None,
        })
    }

    /// Innermost enclosing function or method identity, if any.
    ///
    /// This is the caller a reference site is attributed to; class frames
    /// are skipped because a class body is not a callable context.
    #[must_use]
    pub fn enclosing_function(&self) -> Option<&str> {
        self.frames.iter().rev().find_map(|frame| match frame {
            ScopeFrame::Function(function) => Some(function.as_str()),
            ScopeFrame::Class(_) => None,
        })
    }

    /// True when the innermost frame is a class body, i.e. a definition
    /// seen here is a method
    #[must_use]
    pub fn in_class_body(&self) -> bool {
        matches!(self.frames.last(), Some(ScopeFrame::Class(_)))
    }

    pub fn push_class(&mut self, qualified: impl Into<String>) {
        self.frames.push(ScopeFrame::Class(qualified.into()));
    }

    pub fn push_function(&mut self, qualified: impl Into<String>) {
        self.frames.push(ScopeFrame::Function(qualified.into()));
    }

    pub fn pop(&mut self) -> Option<ScopeFrame> {
        self.frames.pop()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
