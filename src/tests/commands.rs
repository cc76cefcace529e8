use super::{execute, Command};
use crate::block::FileTree;
use crate::config::Config;
use crate::error::Error;
use crate::formats::javascript::JavaScriptFormat;
use crate::movement::TriviaPolicy;
use crate::syntax::TextRange;

const THREE_LETS: &str = "let a = 1;\nlet b = 2;\nlet c = 3;\n";

fn parse_js(source: &str) -> FileTree {
    FileTree::parse(source, &JavaScriptFormat, &Config::default()).unwrap()
}

fn run(tree: &FileTree, command: Command, ranges: &[TextRange]) -> crate::Result<Vec<TextRange>> {
    execute(tree, command, ranges, &Config::default()).map(|outcome| outcome.ranges)
}

#[test]
fn test_blocks_lists_top_level() {
    let tree = parse_js(THREE_LETS);
    let ranges = run(&tree, Command::Blocks, &[]).unwrap();
    assert_eq!(
        ranges,
        vec![
            TextRange::new(0, 10),
            TextRange::new(11, 21),
            TextRange::new(22, 32),
        ]
    );
}

#[test]
fn test_select_from_cursors() {
    let tree = parse_js(THREE_LETS);
    let ranges = run(
        &tree,
        Command::Select,
        &[TextRange::empty(11), TextRange::empty(0)],
    )
    .unwrap();
    assert_eq!(ranges, vec![TextRange::new(0, 10), TextRange::new(11, 21)]);
}

#[test]
fn test_parent_at_top_level() {
    let tree = parse_js(THREE_LETS);
    let first = [TextRange::new(0, 10)];

    let result = run(&tree, Command::Parent, &first);
    assert!(matches!(result, Err(Error::NoParent)));

    let config = Config {
        parent_includes_root: true,
        ..Config::default()
    };
    let outcome = execute(&tree, Command::Parent, &first, &config).unwrap();
    assert_eq!(
        outcome.ranges,
        vec![tree.syntax().range(tree.container())]
    );
}

#[test]
fn test_parent_and_child_inside_statement() {
    let tree = parse_js(THREE_LETS);

    let child = run(&tree, Command::Child, &[TextRange::new(0, 10)]).unwrap();
    assert_eq!(child, vec![TextRange::new(4, 9)]);
    assert_eq!(tree.text(child[0]), "a = 1");

    let parent = run(&tree, Command::Parent, &child).unwrap();
    assert_eq!(parent, vec![TextRange::new(0, 10)]);
}

#[test]
fn test_child_of_leaf() {
    let tree = parse_js(THREE_LETS);
    let result = run(&tree, Command::Child, &[TextRange::new(4, 5)]);
    assert!(matches!(result, Err(Error::NoChild)));
}

#[test]
fn test_sibling_navigation() {
    let tree = parse_js(THREE_LETS);

    let result = run(&tree, Command::Previous, &[TextRange::new(0, 10)]);
    assert!(matches!(result, Err(Error::NoAdjacentSibling)));

    let next = run(&tree, Command::Next, &[TextRange::new(0, 10)]).unwrap();
    assert_eq!(next, vec![TextRange::new(11, 21)]);

    let extended = run(&tree, Command::ExtendNext, &[TextRange::new(0, 10)]).unwrap();
    assert_eq!(extended, vec![TextRange::new(0, 21)]);

    let unchanged = run(&tree, Command::ExtendPrevious, &[TextRange::new(0, 10)]).unwrap();
    assert_eq!(unchanged, vec![TextRange::new(0, 10)]);
}

#[test]
fn test_navigation_merges_results() {
    let tree = parse_js(THREE_LETS);
    let ranges = run(
        &tree,
        Command::ExtendNext,
        &[TextRange::new(0, 10), TextRange::new(11, 21)],
    )
    .unwrap();
    assert_eq!(ranges, vec![TextRange::new(0, 32)]);
}

#[test]
fn test_misaligned_range() {
    let tree = parse_js(THREE_LETS);
    let result = run(&tree, Command::Next, &[TextRange::new(1, 10)]);
    assert!(matches!(result, Err(Error::NotAligned(range)) if range == TextRange::new(1, 10)));
}

#[test]
fn test_swap_next_produces_edit() {
    let tree = parse_js(THREE_LETS);
    let outcome = execute(
        &tree,
        Command::SwapNext,
        &[TextRange::new(0, 10)],
        &Config::default(),
    )
    .unwrap();

    assert_eq!(outcome.ranges, vec![TextRange::new(11, 21)]);
    let edited = outcome.edit.unwrap().apply(tree.source()).unwrap();
    assert_eq!(edited, "let b = 2;\nlet a = 1;\nlet c = 3;\n");
    assert_eq!(&edited[11..21], "let a = 1;");
}

#[test]
fn test_swap_requires_single_range() {
    let tree = parse_js(THREE_LETS);
    let result = run(
        &tree,
        Command::SwapPrevious,
        &[TextRange::new(11, 21), TextRange::new(22, 32)],
    );
    assert!(matches!(result, Err(Error::NotAligned(_))));

    let result = run(&tree, Command::SwapPrevious, &[]);
    assert!(matches!(result, Err(Error::NotAligned(_))));
}

#[test]
fn test_swap_uses_configured_policy() {
    let tree = parse_js("a;\n// note\nb;\n");
    let range = [TextRange::new(0, 2)];

    let result = run(&tree, Command::SwapNext, &range);
    assert!(matches!(result, Err(Error::AmbiguousTrivia(_))));

    let config = Config {
        trivia_policy: TriviaPolicy::Stationary,
        ..Config::default()
    };
    let outcome = execute(&tree, Command::SwapNext, &range, &config).unwrap();
    let edited = outcome.edit.unwrap().apply(tree.source()).unwrap();
    assert_eq!(edited, "b;\n// note\na;\n");
}

#[test]
fn test_pair_commands() {
    let tree = parse_js("foo(bar);");

    let inside = run(&tree, Command::Inside, &[TextRange::empty(5)]).unwrap();
    assert_eq!(inside, vec![TextRange::new(4, 7)]);

    let surrounding = run(&tree, Command::Surrounding, &[TextRange::empty(5)]).unwrap();
    assert_eq!(surrounding, vec![TextRange::new(3, 4), TextRange::new(7, 8)]);
}

#[test]
fn test_outcome_serializes_without_empty_edit() {
    let tree = parse_js(THREE_LETS);
    let outcome = execute(&tree, Command::Blocks, &[], &Config::default()).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert!(json.get("edit").is_none());
    assert_eq!(json["ranges"][0]["start"], 0);
    assert_eq!(json["ranges"][0]["end"], 10);
}
