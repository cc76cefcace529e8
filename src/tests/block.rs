use super::FileTree;
use crate::config::Config;
use crate::error::Error;
use crate::formats::javascript::JavaScriptFormat;
use crate::formats::markdown::MarkdownFormat;
use crate::formats::{self, Format};
use crate::syntax::{Point, TextRange};

fn parse_js(source: &str) -> FileTree {
    FileTree::parse(source, &JavaScriptFormat, &Config::default()).unwrap()
}

/// JavaScript whose top level is the first object literal.
struct ObjectTopFormat;

impl Format for ObjectTopFormat {
    fn name(&self) -> &'static str {
        "object-top"
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_javascript::LANGUAGE.into()
    }

    fn file_extensions(&self) -> &[&'static str] {
        &[]
    }

    fn top_level_kind(&self) -> Option<&'static str> {
        Some("object")
    }
}

struct BrokenQueryFormat;

impl Format for BrokenQueryFormat {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_javascript::LANGUAGE.into()
    }

    fn file_extensions(&self) -> &[&'static str] {
        &[]
    }

    fn block_query(&self) -> &'static str {
        "(no_such_node) @block"
    }
}

#[test]
fn test_top_level_blocks_skip_comments() {
    let source = "let a = 1;\nlet b = 2;\n// note\nfoo(a, b);\n";
    let tree = parse_js(source);

    let kinds: Vec<_> = tree.blocks().iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec!["lexical_declaration", "lexical_declaration", "expression_statement"]
    );
    assert_eq!(tree.text(tree.blocks()[0].range), "let a = 1;");
    assert_eq!(tree.text(tree.blocks()[2].range), "foo(a, b);");
}

#[test]
fn test_blocks_are_disjoint_and_ordered() {
    let source = "import { a } from 'a';\n\nfunction f(x) {\n  return x;\n}\n\nclass C {}\nf(a); /* tail */ f(a);\n";
    let tree = parse_js(source);

    assert_eq!(tree.blocks().len(), 5);
    for pair in tree.blocks().windows(2) {
        assert!(
            pair[0].range.end <= pair[1].range.start,
            "{:?} overlaps {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_empty_document_has_no_blocks() {
    let tree = parse_js("");
    assert!(tree.blocks().is_empty());

    let tree = parse_js("// only a comment\n");
    assert!(tree.blocks().is_empty());
}

#[test]
fn test_blocks_of_nested_node() {
    let tree = parse_js("foo(a, b, c);");
    let statement = tree.blocks()[0].node;
    let call = tree.blocks_of(statement)[0];
    assert_eq!(call.kind, "call_expression");

    let call_children = tree.blocks_of(call.node);
    assert_eq!(call_children.len(), 2, "callee and arguments");

    let arguments = tree.blocks_of(call_children[1].node);
    let texts: Vec<_> = arguments.iter().map(|b| tree.text(b.range)).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[test]
fn test_top_level_kind_designates_container() {
    let tree = FileTree::parse("x = { a: 1, b: 2 };", &ObjectTopFormat, &Config::default()).unwrap();

    assert_eq!(tree.syntax().kind(tree.container()), "object");
    let texts: Vec<_> = tree.blocks().iter().map(|b| tree.text(b.range)).collect();
    assert_eq!(texts, vec!["a: 1", "b: 2"]);
    assert!(!tree.is_within_container(tree.syntax().root()));
}

#[test]
fn test_top_level_kind_falls_back_to_root() {
    let tree = FileTree::parse("let a = 1;", &ObjectTopFormat, &Config::default()).unwrap();
    assert_eq!(tree.container(), tree.syntax().root());
    assert_eq!(tree.blocks().len(), 1);
}

#[test]
fn test_extra_trivia_kinds_from_config() {
    let config = Config {
        extra_trivia_kinds: vec!["empty_statement".to_string()],
        ..Config::default()
    };
    let tree = FileTree::parse("a;\n;\nb;\n", &JavaScriptFormat, &config).unwrap();
    assert_eq!(tree.blocks().len(), 2);
}

#[test]
fn test_block_query_marks_worthy_nodes() {
    let source = "# Title\n\nSome text here.\n";
    let tree = FileTree::parse(source, &MarkdownFormat, &Config::default()).unwrap();

    let section = tree.blocks()[0];
    assert_eq!(section.kind, "section");
    assert!(tree.is_block_worthy(section.node));

    let paragraph = tree
        .blocks_of(section.node)
        .into_iter()
        .find(|b| b.kind == "paragraph")
        .unwrap();
    assert!(tree.is_block_worthy(paragraph.node));

    let inline = tree
        .blocks_of(paragraph.node)
        .into_iter()
        .find(|b| b.kind == "inline")
        .unwrap();
    assert!(tree.is_block_candidate(inline.node));
    assert!(!tree.is_block_worthy(inline.node));
}

#[test]
fn test_invalid_block_query_is_reported() {
    let result = FileTree::parse("let a = 1;", &BrokenQueryFormat, &Config::default());
    assert!(matches!(result, Err(Error::InvalidQuery { .. })));
}

#[test]
fn test_snapshots_are_distinct() {
    let first = parse_js("a;");
    let second = parse_js("a;");
    assert_ne!(first.snapshot(), second.snapshot());
}

#[test]
fn test_point_conversion() {
    let tree = parse_js("let a = 1;\nlet b = 2;\n");
    assert_eq!(tree.point_at(15), Point::new(1, 4));
    assert_eq!(tree.offset_at(Point::new(1, 4)), Some(15));
    assert_eq!(tree.text(TextRange::new(15, 16)), "b");
}

#[test]
fn test_lookup_formats() {
    assert_eq!(formats::lookup("js").unwrap().name(), "javascript");
    assert_eq!(formats::lookup(".HTML").unwrap().name(), "html");
    assert_eq!(formats::lookup("markdown").unwrap().name(), "markdown");
    assert!(matches!(
        formats::lookup("cobol"),
        Err(Error::LanguageNotFound(name)) if name == "cobol"
    ));
}
