use crate::error::{AnalyzerError, Result};
use crate::imports::ImportTable;
use crate::resolver::NameResolver;
use impact_model::{Edge, EdgeKind, Node, NodeKind, ScopeStack, SourceLocation};
use tree_sitter::Node as SyntaxNode;

/// Raw node and edge facts extracted from a single file
///
/// Facts are private to the file that produced them until the assembly
/// barrier; nothing here is deduplicated or filtered yet.
#[derive(Debug, Default)]
pub struct FileFacts {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Context-tracking walker for one Python source file
///
/// A single depth-first pass over the tree-sitter CST, dispatching on
/// node kind. Carries the scope stack and the file's import table;
/// emits raw facts for later assembly. Scope frames are pushed entering
/// a class or function body and popped unconditionally after the subtree
/// walk: the walk itself never returns early, so a leaked frame cannot
/// happen on any exit path.
pub struct FileVisitor<'a> {
    file_path: &'a str,
    source: &'a str,
    scope: ScopeStack,
    imports: ImportTable,
    facts: FileFacts,
}

impl<'a> FileVisitor<'a> {
    #[must_use]
    pub fn new(file_path: &'a str, source: &'a str) -> Self {
        Self {
            file_path,
            source,
            scope: ScopeStack::new(),
            imports: ImportTable::new(),
            facts: FileFacts::default(),
        }
    }

    /// Walk the parsed tree and return the extracted facts.
    ///
    /// The file itself becomes a `File` node up front; module-level calls
    /// are attributed to it. A scope stack left unbalanced after the walk
    /// would silently corrupt every later qualified name, so it is an
    /// internal-invariant error, fatal to this file only.
    pub fn run(mut self, root: SyntaxNode) -> Result<FileFacts> {
        let file_node = Node::new(
            self.file_path,
            NodeKind::File,
            SourceLocation::new(self.file_path, 1),
        )
        .with_metadata("language", "python");
        self.facts.nodes.push(file_node);

        self.walk(root);

        if !self.scope.is_empty() {
            return Err(AnalyzerError::scope_imbalance(
                self.file_path,
                self.scope.depth(),
            ));
        }
        Ok(self.facts)
    }

    fn walk(&mut self, node: SyntaxNode) {
        match node.kind() {
            "class_definition" => self.visit_class(node),
            "function_definition" => self.visit_function(node),
            "call" => self.visit_call(node),
            "import_statement" => self.visit_import(node),
            "import_from_statement" => self.visit_import_from(node),
            // Everything else (decorated_definition included) is
            // transparent: recurse looking for the kinds above
            _ => self.walk_children(node),
        }
    }

    fn walk_children(&mut self, node: SyntaxNode) {
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        for child in children {
            self.walk(child);
        }
    }

    /// Class definition: node, inheritance edges, then the body under a
    /// class frame. Identity is computed against the pre-entry scope
    /// (classes are named at their own level).
    fn visit_class(&mut self, node: SyntaxNode) {
        let Some(name) = self.field_text(node, "name") else {
            return self.walk_children(node);
        };
        let identity = self.scope.qualify_class(&name);
        let site = self.site_of(node);

        let bases = self.class_bases(node);
        let mut class_node = Node::new(identity.clone(), NodeKind::Class, site.clone());
        if !bases.is_empty() {
            class_node = class_node.with_metadata("bases", bases.join(", "));
        }
        self.facts.nodes.push(class_node);

        // One Inherits edge per declared base, resolved through the
        // import table; unresolved bases keep their raw name
        for base in &bases {
            let target = NameResolver::new(&self.imports).resolve(base).into_target();
            self.facts.edges.push(Edge::new(
                identity.clone(),
                target,
                EdgeKind::Inherits,
                site.clone(),
            ));
        }

        self.scope.push_class(identity);
        if let Some(body) = node.child_by_field_name("body") {
            self.walk_children(body);
        }
        self.scope.pop();
    }

    /// Function definition: `Method` when declared directly in a class
    /// body, `Function` otherwise; identity from the current scope so a
    /// method picks up its class and a nested function its outer function.
    fn visit_function(&mut self, node: SyntaxNode) {
        let Some(name) = self.field_text(node, "name") else {
            return self.walk_children(node);
        };
        let identity = self.scope.qualify(&name);
        let kind = if self.scope.in_class_body() {
            NodeKind::Method
        } else {
            NodeKind::Function
        };

        let params = self.parameter_names(node);
        let mut fn_node = Node::new(identity.clone(), kind, self.site_of(node));
        if !params.is_empty() {
            fn_node = fn_node.with_metadata("params", params.join(", "));
        }
        self.facts.nodes.push(fn_node);

        self.scope.push_function(identity);
        if let Some(body) = node.child_by_field_name("body") {
            self.walk_children(body);
        }
        self.scope.pop();
    }

    /// Call expression. The caller is the innermost active function
    /// frame, else the file's `File` node. Bare callees go through the
    /// import table; attribute callees keep only the trailing name, since
    /// receiver types are not inferred and same-named methods of
    /// different classes collapse onto one candidate target.
    fn visit_call(&mut self, node: SyntaxNode) {
        let site = self.site_of(node);
        let caller = self
            .scope
            .enclosing_function()
            .unwrap_or(self.file_path)
            .to_string();

        if let Some(callee) = node.child_by_field_name("function") {
            match callee.kind() {
                "identifier" => {
                    let raw = self.text(callee).to_string();
                    let targets = NameResolver::new(&self.imports).candidate_targets(&raw);
                    for target in targets {
                        self.facts.edges.push(Edge::new(
                            caller.clone(),
                            target,
                            EdgeKind::Calls,
                            site.clone(),
                        ));
                    }
                }
                "attribute" => {
                    if let Some(method) = self.field_text(callee, "attribute") {
                        self.facts.edges.push(Edge::new(
                            caller.clone(),
                            method,
                            EdgeKind::Calls,
                            site.clone(),
                        ));
                    }
                }
                // Chained or subscripted callees carry no stable name
                _ => {}
            }
        }

        // Arguments and receivers may contain nested calls
        self.walk_children(node);
    }

    /// `import a.b [as c]`: bind the alias (default: last path segment)
    /// to the full module path and emit an Imports edge to the module.
    fn visit_import(&mut self, node: SyntaxNode) {
        let site = self.site_of(node);
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "dotted_name" => {
                    let module = self.text(child).to_string();
                    let alias = module.rsplit('.').next().unwrap_or(&module).to_string();
                    self.imports.bind(alias, module.clone());
                    self.emit_import(module, &site);
                }
                "aliased_import" => {
                    let (Some(module), Some(alias)) = (
                        self.field_text(child, "name"),
                        self.field_text(child, "alias"),
                    ) else {
                        continue;
                    };
                    self.imports.bind(alias, module.clone());
                    self.emit_import(module, &site);
                }
                _ => {}
            }
        }
    }

    /// `from m import n [as a]`: bind the alias AND the bare imported
    /// name to `m.n`, and emit Imports edges for both forms so downstream
    /// consumers can match whichever one a caller used.
    fn visit_import_from(&mut self, node: SyntaxNode) {
        let site = self.site_of(node);
        let Some(module) = self.field_text(node, "module_name") else {
            return;
        };

        let mut cursor = node.walk();
        let names: Vec<_> = node.children_by_field_name("name", &mut cursor).collect();
        if names.is_empty() {
            // `from m import *` binds nothing but the module edge remains
            self.emit_import(module, &site);
            return;
        }

        for name_node in names {
            let (imported, alias) = match name_node.kind() {
                "dotted_name" => {
                    let imported = self.text(name_node).to_string();
                    (imported.clone(), imported)
                }
                "aliased_import" => {
                    let (Some(imported), Some(alias)) = (
                        self.field_text(name_node, "name"),
                        self.field_text(name_node, "alias"),
                    ) else {
                        continue;
                    };
                    (imported, alias)
                }
                _ => continue,
            };

            let qualified = format!("{module}.{imported}");
            self.imports.bind(alias, qualified.clone());
            if let Some(short) = imported.rsplit('.').next() {
                self.imports.bind(short, qualified.clone());
            }

            self.emit_import(qualified, &site);
            self.emit_import(imported, &site);
        }
    }

    fn emit_import(&mut self, target: String, site: &SourceLocation) {
        self.facts.edges.push(Edge::new(
            self.file_path,
            target,
            EdgeKind::Imports,
            site.clone(),
        ));
    }

    /// Declared base classes: plain identifiers and dotted attributes.
    /// Keyword arguments (metaclass=...) are not bases.
    fn class_bases(&self, node: SyntaxNode) -> Vec<String> {
        let Some(args) = node.child_by_field_name("superclasses") else {
            return Vec::new();
        };
        let mut bases = Vec::new();
        let mut cursor = args.walk();
        for child in args.children(&mut cursor) {
            if matches!(child.kind(), "identifier" | "attribute") {
                bases.push(self.text(child).to_string());
            }
        }
        bases
    }

    /// Declared parameter names, annotation- and default-stripped
    fn parameter_names(&self, node: SyntaxNode) -> Vec<String> {
        let Some(params) = node.child_by_field_name("parameters") else {
            return Vec::new();
        };
        let mut names = Vec::new();
        let mut cursor = params.walk();
        for child in params.children(&mut cursor) {
            let name = match child.kind() {
                "identifier" => Some(self.text(child).to_string()),
                "default_parameter" | "typed_default_parameter" => self
                    .field_text(child, "name"),
                "typed_parameter" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                    self.first_identifier(child)
                }
                _ => None,
            };
            if let Some(name) = name {
                names.push(name);
            }
        }
        names
    }

    fn first_identifier(&self, node: SyntaxNode) -> Option<String> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "identifier" {
                return Some(self.text(child).to_string());
            }
        }
        None
    }

    fn site_of(&self, node: SyntaxNode) -> SourceLocation {
        SourceLocation::new(self.file_path, node.start_position().row + 1)
    }

    fn text(&self, node: SyntaxNode) -> &str {
        &self.source[node.start_byte()..node.end_byte()]
    }

    fn field_text(&self, node: SyntaxNode, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .map(|child| self.text(child).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tree_sitter::Parser;

    fn facts(source: &str) -> FileFacts {
        let mut parser = Parser::new();
        let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        parser.set_language(&language).expect("load python grammar");
        let tree = parser.parse(source, None).expect("parse");
        FileVisitor::new("test.py", source)
            .run(tree.root_node())
            .expect("walk")
    }

    fn node_identities(facts: &FileFacts, kind: NodeKind) -> Vec<&str> {
        facts
            .nodes
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.identity.as_str())
            .collect()
    }

    #[test]
    fn every_file_gets_a_file_node() {
        let facts = facts("x = 1\n");
        assert_eq!(node_identities(&facts, NodeKind::File), ["test.py"]);
    }

    #[test]
    fn methods_qualify_under_their_class() {
        let facts = facts("class Foo:\n    def bar(self):\n        pass\n");

        assert_eq!(node_identities(&facts, NodeKind::Class), ["Foo"]);
        assert_eq!(node_identities(&facts, NodeKind::Method), ["Foo.bar"]);
        assert!(facts.edges.is_empty());
    }

    #[test]
    fn nested_functions_qualify_under_their_outer() {
        let facts = facts("def outer():\n    def inner():\n        pass\n");

        assert_eq!(
            node_identities(&facts, NodeKind::Function),
            ["outer", "outer.inner"]
        );
    }

    #[test]
    fn method_params_are_recorded() {
        let facts = facts("class A:\n    def f(self, x, y=1, *args, **kw):\n        pass\n");

        let method = facts.nodes.iter().find(|n| n.identity == "A.f").unwrap();
        assert_eq!(
            method.metadata.get("params").map(String::as_str),
            Some("self, x, y, args, kw")
        );
    }

    #[test]
    fn module_level_calls_attach_to_the_file_node() {
        let facts = facts("def setup():\n    pass\n\nsetup()\n");

        let call = facts
            .edges
            .iter()
            .find(|e| e.kind == EdgeKind::Calls)
            .unwrap();
        assert_eq!(call.source, "test.py");
        assert_eq!(call.target, "setup");
    }

    #[test]
    fn imported_call_emits_qualified_and_short_targets() {
        let facts = facts("from utils import helper\n\ndef caller():\n    helper()\n");

        let targets: Vec<&str> = facts
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Calls && e.source == "caller")
            .map(|e| e.target.as_str())
            .collect();
        assert_eq!(targets, ["utils.helper", "helper"]);
    }

    #[test]
    fn attribute_calls_keep_only_the_trailing_name() {
        let facts = facts("def f(obj):\n    obj.save()\n");

        let call = facts
            .edges
            .iter()
            .find(|e| e.kind == EdgeKind::Calls)
            .unwrap();
        assert_eq!(call.target, "save");
    }

    #[test]
    fn plain_import_binds_last_segment_and_emits_edge() {
        let facts = facts("import os.path\n");

        let import = facts
            .edges
            .iter()
            .find(|e| e.kind == EdgeKind::Imports)
            .unwrap();
        assert_eq!(import.source, "test.py");
        assert_eq!(import.target, "os.path");
    }

    #[test]
    fn from_import_emits_both_target_forms() {
        let facts = facts("from a import helper\n");

        let targets: Vec<&str> = facts
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Imports)
            .map(|e| e.target.as_str())
            .collect();
        assert_eq!(targets, ["a.helper", "helper"]);
    }

    #[test]
    fn aliased_from_import_binds_alias_and_original() {
        let facts = facts("from models import Base as B\n\nclass Child(B):\n    pass\n");

        let inherits = facts
            .edges
            .iter()
            .find(|e| e.kind == EdgeKind::Inherits)
            .unwrap();
        assert_eq!(inherits.source, "Child");
        assert_eq!(inherits.target, "models.Base");
    }

    #[test]
    fn one_inherits_edge_per_declared_base() {
        let facts = facts("class C(A, B, metaclass=Meta):\n    pass\n");

        let bases: Vec<&str> = facts
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Inherits)
            .map(|e| e.target.as_str())
            .collect();
        assert_eq!(bases, ["A", "B"]);

        let class = facts.nodes.iter().find(|n| n.identity == "C").unwrap();
        assert_eq!(class.metadata.get("bases").map(String::as_str), Some("A, B"));
    }

    #[test]
    fn decorated_definitions_are_transparent() {
        let facts = facts("@register\nclass Plugin:\n    @property\n    def name(self):\n        pass\n");

        assert_eq!(node_identities(&facts, NodeKind::Class), ["Plugin"]);
        assert_eq!(node_identities(&facts, NodeKind::Method), ["Plugin.name"]);
    }

    #[test]
    fn calls_nested_in_arguments_are_found() {
        let facts = facts("def f():\n    outer(inner())\n");

        let targets: Vec<&str> = facts
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Calls)
            .map(|e| e.target.as_str())
            .collect();
        assert!(targets.contains(&"outer"));
        assert!(targets.contains(&"inner"));
    }

    #[test]
    fn nested_classes_dot_nest_under_classes() {
        let facts = facts("class Outer:\n    class Inner:\n        def m(self):\n            pass\n");

        assert_eq!(node_identities(&facts, NodeKind::Class), ["Outer", "Outer.Inner"]);
        assert_eq!(node_identities(&facts, NodeKind::Method), ["Outer.Inner.m"]);
    }
}
