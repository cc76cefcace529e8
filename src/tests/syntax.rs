use super::{LineIndex, Point, SyntaxTree, TextRange};
use tree_sitter::Parser;

fn parse_js(source: &str) -> SyntaxTree {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .unwrap();
    let tree = parser.parse(source, None).unwrap();
    SyntaxTree::from_tree_sitter(&tree)
}

#[test]
fn test_arena_mirrors_tree_shape() {
    let syntax = parse_js("let a = 1;\nfoo(a);\n");
    let root = syntax.root();

    assert_eq!(syntax.kind(root), "program");
    assert!(syntax.parent(root).is_none());

    let statements: Vec<_> = syntax.named_children(root).collect();
    assert_eq!(statements.len(), 2);
    assert_eq!(syntax.kind(statements[0]), "lexical_declaration");
    assert_eq!(syntax.kind(statements[1]), "expression_statement");

    for statement in statements {
        assert_eq!(syntax.parent(statement), Some(root));
    }
}

#[test]
fn test_children_are_contained_and_ordered() {
    let syntax = parse_js("const x = { foo: (bar), baz: [1, 2] };");

    let mut stack = vec![syntax.root()];
    while let Some(node) = stack.pop() {
        let range = syntax.range(node);
        let children = syntax.children(node);
        for child in children {
            assert!(
                range.contains_range(syntax.range(*child)),
                "{} should contain its child {}",
                syntax.kind(node),
                syntax.kind(*child)
            );
            assert_eq!(syntax.parent(*child), Some(node));
        }
        for pair in children.windows(2) {
            assert!(syntax.range(pair[0]).end <= syntax.range(pair[1]).start);
        }
        stack.extend(children.iter().copied());
    }
}

#[test]
fn test_first_and_last_child_include_anonymous_tokens() {
    let syntax = parse_js("(a);");
    let statement = syntax.first_child(syntax.root()).unwrap();
    let parenthesized = syntax.first_child(statement).unwrap();

    assert_eq!(syntax.kind(parenthesized), "parenthesized_expression");
    let open = syntax.first_child(parenthesized).unwrap();
    let close = syntax.last_child(parenthesized).unwrap();
    assert_eq!(syntax.kind(open), "(");
    assert_eq!(syntax.kind(close), ")");
    assert!(!syntax.is_named(open));
}

#[test]
fn test_descendant_at_finds_deepest_node() {
    let syntax = parse_js("foo(bar);");
    let node = syntax.descendant_at(5);
    assert_eq!(syntax.kind(node), "identifier");
    assert_eq!(syntax.range(node), TextRange::new(4, 7));

    let kinds: Vec<_> = syntax.ancestors(node).map(|n| syntax.kind(n)).collect();
    assert_eq!(
        kinds,
        vec!["arguments", "call_expression", "expression_statement", "program"]
    );
}

#[test]
fn test_descendant_at_in_whitespace_lands_on_enclosing_node() {
    let syntax = parse_js("const x = { foo: (bar) };");
    let node = syntax.descendant_at(11);
    assert_eq!(syntax.kind(node), "object");
}

#[test]
fn test_smallest_covering_range() {
    let syntax = parse_js("const x = { foo: (bar) };");
    let node = syntax.smallest_covering(TextRange::new(12, 22));
    assert_eq!(syntax.kind(node), "pair");

    let node = syntax.smallest_covering(TextRange::new(18, 21));
    assert_eq!(syntax.kind(node), "identifier");
}

#[test]
fn test_line_index_round_trip() {
    let index = LineIndex::new("ab\ncd\n");

    assert_eq!(index.point(0), Point::new(0, 0));
    assert_eq!(index.point(2), Point::new(0, 2));
    assert_eq!(index.point(3), Point::new(1, 0));
    assert_eq!(index.point(4), Point::new(1, 1));
    assert_eq!(index.point(6), Point::new(2, 0));
    assert_eq!(index.point(100), Point::new(2, 0), "offsets clamp to the end");

    assert_eq!(index.offset(Point::new(1, 1)), Some(4));
    assert_eq!(index.offset(Point::new(2, 0)), Some(6));
    assert_eq!(index.offset(Point::new(0, 5)), None);
    assert_eq!(index.offset(Point::new(3, 0)), None);
}

#[test]
fn test_text_range_containment() {
    let outer = TextRange::new(2, 10);

    assert!(outer.contains_range(TextRange::new(2, 10)));
    assert!(!outer.strictly_contains(TextRange::new(2, 10)));
    assert!(outer.strictly_contains(TextRange::new(3, 10)));
    assert!(!outer.contains_range(TextRange::new(1, 4)));
    assert!(TextRange::empty(4).is_empty());
    assert_eq!(outer.len(), 8);
    assert_eq!(outer.to_string(), "2..10");
}
