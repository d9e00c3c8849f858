use impact_analyzer::{AnalyzerConfig, CodeAnalyzer, SourceFile};
use impact_model::{EdgeKind, NodeKind};
use pretty_assertions::assert_eq;

fn analyze(files: &[(&str, &str)]) -> impact_analyzer::AssembledGraph {
    let sources: Vec<SourceFile> = files
        .iter()
        .map(|(path, content)| SourceFile::new(*path, *content))
        .collect();
    CodeAnalyzer::with_defaults().analyze(&sources)
}

fn identities(graph: &impact_analyzer::AssembledGraph, kind: NodeKind) -> Vec<&str> {
    graph
        .nodes
        .iter()
        .filter(|n| n.kind == kind)
        .map(|n| n.identity.as_str())
        .collect()
}

fn edges(graph: &impact_analyzer::AssembledGraph, kind: EdgeKind) -> Vec<(&str, &str)> {
    graph
        .edges
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect()
}

#[test]
fn class_with_method_yields_class_and_method_nodes() {
    let graph = analyze(&[("svc.py", "class Foo:\n    def bar(self):\n        pass\n")]);

    assert_eq!(identities(&graph, NodeKind::Class), ["Foo"]);
    assert_eq!(identities(&graph, NodeKind::Method), ["Foo.bar"]);
    assert!(graph.edges.is_empty());
}

#[test]
fn cross_file_import_and_call_resolve_to_the_defined_helper() {
    let graph = analyze(&[
        ("a.py", "def helper():\n    pass\n"),
        (
            "b.py",
            "from a import helper\n\ndef caller():\n    helper()\n",
        ),
    ]);

    assert!(identities(&graph, NodeKind::Function).contains(&"helper"));
    assert!(identities(&graph, NodeKind::Function).contains(&"caller"));

    let imports = edges(&graph, EdgeKind::Imports);
    assert!(imports.contains(&("b.py", "a.helper")));

    let calls = edges(&graph, EdgeKind::Calls);
    assert_eq!(calls, [("caller", "helper")]);
}

#[test]
fn same_file_inheritance_produces_an_inherits_edge() {
    let graph = analyze(&[(
        "m.py",
        "class Parent:\n    pass\n\nclass Child(Parent):\n    pass\n",
    )]);

    assert_eq!(edges(&graph, EdgeKind::Inherits), [("Child", "Parent")]);
}

#[test]
fn calls_into_excluded_standard_modules_are_filtered() {
    let file = "import json\n\ndef dump(x):\n    return json.dumps(x)\n";

    // The traversal itself emits the raw fact...
    let analyzer = CodeAnalyzer::with_defaults();
    let facts = analyzer
        .analyze_file(&SourceFile::new("d.py", file))
        .unwrap();
    assert!(facts
        .edges
        .iter()
        .any(|e| e.kind == EdgeKind::Calls && e.target == "dumps"));

    // ...and filtering removes both the call and the module import
    let graph = analyze(&[("d.py", file)]);
    assert!(edges(&graph, EdgeKind::Calls).is_empty());
    assert!(edges(&graph, EdgeKind::Imports).is_empty());
    assert!(graph.stats.excluded_edges > 0);
}

#[test]
fn ambiguous_method_call_stays_unqualified() {
    let graph = analyze(&[
        ("a.py", "class A:\n    def run(self):\n        pass\n"),
        ("b.py", "class B:\n    def run(self):\n        pass\n"),
        ("c.py", "def trigger(obj):\n    obj.run()\n"),
    ]);

    // Without receiver types the raw target is the bare method name; it
    // matches neither A.run nor B.run, so no Calls edge survives. The
    // ambiguity is documented behavior, not a resolution to either class
    let facts = CodeAnalyzer::with_defaults()
        .analyze_file(&SourceFile::new("c.py", "def trigger(obj):\n    obj.run()\n"))
        .unwrap();
    let raw: Vec<&str> = facts
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::Calls)
        .map(|e| e.target.as_str())
        .collect();
    assert_eq!(raw, ["run"]);

    assert!(edges(&graph, EdgeKind::Calls).is_empty());
}

#[test]
fn every_definition_produces_exactly_one_node_in_its_file() {
    let graph = analyze(&[
        (
            "one.py",
            "def top():\n    def nested():\n        pass\n\nclass C:\n    def m(self):\n        pass\n",
        ),
        ("two.py", "def top_two():\n    pass\n"),
    ]);

    let mut seen = std::collections::HashSet::new();
    for node in &graph.nodes {
        assert!(seen.insert(&node.identity), "duplicate {}", node.identity);
    }

    let one_defs: Vec<&str> = graph
        .nodes
        .iter()
        .filter(|n| n.kind != NodeKind::File && n.declared_at.file_path == "one.py")
        .map(|n| n.identity.as_str())
        .collect();
    assert_eq!(one_defs.len(), 4);
}

#[test]
fn class_with_n_bases_emits_n_inherits_edges() {
    let graph = analyze(&[(
        "m.py",
        "class A:\n    pass\n\nclass B:\n    pass\n\nclass C(A, B):\n    pass\n",
    )]);

    let inherits = edges(&graph, EdgeKind::Inherits);
    assert_eq!(inherits, [("C", "A"), ("C", "B")]);
}

#[test]
fn rerunning_on_unchanged_input_is_identical() {
    let files = [
        ("a.py", "def helper():\n    pass\n"),
        (
            "b.py",
            "from a import helper\n\nclass Svc:\n    def go(self):\n        helper()\n",
        ),
    ];

    let first = analyze(&files);
    let second = analyze(&files);

    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.edges, second.edges);
}

#[test]
fn no_retained_edge_dangles() {
    let graph = analyze(&[
        ("a.py", "import a.helpers\n\ndef f():\n    g()\n    missing()\n"),
        ("b.py", "def g():\n    pass\n"),
    ]);

    let known: std::collections::HashSet<&str> =
        graph.nodes.iter().map(|n| n.identity.as_str()).collect();

    for edge in &graph.edges {
        assert!(known.contains(edge.source.as_str()));
        if edge.kind != EdgeKind::Imports {
            assert!(
                known.contains(edge.target.as_str()),
                "dangling target {}",
                edge.target
            );
        }
    }
}

#[test]
fn module_level_calls_attach_to_the_file_node() {
    let graph = analyze(&[("app.py", "def main():\n    pass\n\nmain()\n")]);

    assert_eq!(edges(&graph, EdgeKind::Calls), [("app.py", "main")]);
}

#[test]
fn exclusion_sets_are_configuration_not_engine_logic() {
    let files = [(
        "a.py",
        "def fetch():\n    pass\n\ndef caller():\n    fetch()\n",
    )];
    let sources: Vec<SourceFile> = files
        .iter()
        .map(|(p, c)| SourceFile::new(*p, *c))
        .collect();

    let default_graph = CodeAnalyzer::with_defaults().analyze(&sources);
    assert_eq!(edges(&default_graph, EdgeKind::Calls), [("caller", "fetch")]);

    let strict = CodeAnalyzer::new(AnalyzerConfig::default().exclude_name("fetch"));
    let strict_graph = strict.analyze(&sources);
    assert!(edges(&strict_graph, EdgeKind::Calls).is_empty());
}

#[test]
fn methods_of_the_same_class_call_each_other_by_attribute_name_only() {
    // self.save() resolves to the bare trailing name; the qualified
    // method node is Repo.save, so the candidate edge is dropped
    let graph = analyze(&[(
        "r.py",
        "class Repo:\n    def save(self):\n        pass\n\n    def flush(self):\n        self.save()\n",
    )]);

    assert!(edges(&graph, EdgeKind::Calls).is_empty());
    assert!(graph.stats.dropped_edges > 0);
}
