#![allow(clippy::unwrap_used, reason = "tests panic on unexpected results")]

use copse_ir::{sexp, Child, InvalidPatternKind, Scalar, SexpNode, TreeNode};
use copse_lexer::lex;
use copse_parse::parse;
use pretty_assertions::assert_eq;

use crate::{compile, CapabilityTable, Captured, CompiledPattern};

fn program(source: &str) -> CompiledPattern {
    compile(&parse(&lex(source)).unwrap()).unwrap()
}

fn reject(source: &str) -> InvalidPatternKind {
    compile(&parse(&lex(source)).unwrap()).unwrap_err().kind
}

fn matches(source: &str, node: &SexpNode) -> bool {
    program(source).evaluate(node, &[], None).is_some()
}

fn nth_node(node: &SexpNode, index: usize) -> SexpNode {
    match node.child(index) {
        Some(Child::Node(inner)) => inner,
        _ => panic!("child {index} is not a node"),
    }
}

#[test]
fn lowering_rejects_structures_the_grammar_admits() {
    assert_eq!(reject("..."), InvalidPatternKind::MisplacedEllipsis);
    assert_eq!(reject("{int ...}"), InvalidPatternKind::MisplacedEllipsis);
    assert_eq!(reject("$..."), InvalidPatternKind::MisplacedEllipsis);
    assert_eq!(reject("(send ... ...)"), InvalidPatternKind::DoubledEllipsis);
    assert_eq!(reject("(send $... _ ...)"), InvalidPatternKind::DoubledEllipsis);
    assert_eq!(reject("((send) _)"), InvalidPatternKind::HeadSequence);
    assert_eq!(reject("($(send _) _)"), InvalidPatternKind::HeadSequence);
    assert_eq!(reject("!$_"), InvalidPatternKind::NegatedCapture);
    assert_eq!(reject("(send !($_) _)"), InvalidPatternKind::NegatedCapture);
    assert_eq!(reject("{$int float}"), InvalidPatternKind::UnionArityMismatch);
    assert_eq!(reject("{(send $_ _) int}"), InvalidPatternKind::UnionArityMismatch);
}

#[test]
fn capture_slots_count_in_source_order() {
    assert_eq!(program("(send $_ $(int $_))").capture_slots(), 3);
    assert_eq!(program("{$int $float}").capture_slots(), 1);
    assert_eq!(program("(send $... $_)").capture_slots(), 2);
    assert_eq!(program("_").capture_slots(), 0);
}

#[test]
fn sequences_demand_kind_and_exact_arity() {
    let tree = sexp!((send nil :foo));
    let root = tree.root();
    assert!(matches("(send nil? :foo)", &root));
    assert!(matches("(send _ _)", &root));
    assert!(!matches("(send _)", &root));
    assert!(!matches("(send _ _ _)", &root));
    assert!(!matches("(csend _ _)", &root));
    assert!(matches("_", &root));
}

#[test]
fn ellipsis_frees_the_middle_and_anchors_the_suffix() {
    let tree = sexp!((send :a :b :c :d));
    let root = tree.root();
    assert!(matches("(send ...)", &root));
    assert!(matches("(send :a ... :d)", &root));
    assert!(matches("(send :a :b :c :d ...)", &root));
    assert!(!matches("(send :a ... :c)", &root));
    assert!(matches("(... :d)", &root));
    assert!(!matches("(... :c)", &root));
}

#[test]
fn empty_tail_satisfies_an_ellipsis() {
    let tree = sexp!((zsuper));
    let root = tree.root();
    assert!(matches("(zsuper ...)", &root));
    assert!(!matches("(zsuper _ ...)", &root));
}

#[test]
fn node_types_in_child_position_match_whole_nodes() {
    let tree = sexp!((send (int 5) :abs));
    let root = tree.root();
    assert!(matches("(send int :abs)", &root));
    assert!(!matches("(send float :abs)", &root));
    assert!(matches("(send (int 5) :abs)", &root));
    assert!(!matches("(send (int 6) :abs)", &root));
}

#[test]
fn head_position_matches_the_type_tag() {
    let tree = sexp!((send nil :puts "hi"));
    let root = tree.root();
    assert!(matches("({send csend} ...)", &root));
    assert!(matches("(!int ...)", &root));
    assert!(matches("(:send ...)", &root));
    assert!(!matches("(:csend ...)", &root));
    assert!(matches("(_ nil? :puts _)", &root));
}

#[test]
fn head_captures_take_the_type_symbol() {
    let tree = sexp!((send nil :foo));
    let captures = program("($_ ...)").evaluate(&tree.root(), &[], None).unwrap();
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0], Captured::Value(Child::Value(Scalar::sym("send"))));
}

#[test]
fn captures_come_back_in_source_order() {
    let tree = sexp!((pair (sym :name) (int 3)));
    let root = tree.root();
    let captures = program("(pair $(sym $_) $int)").evaluate(&root, &[], None).unwrap();
    assert_eq!(captures.len(), 3);
    assert_eq!(captures[0], Captured::Value(root.child(0).unwrap()));
    assert_eq!(captures[1], Captured::Value(Child::Value(Scalar::sym("name"))));
    assert_eq!(captures[2], Captured::Value(root.child(1).unwrap()));
}

#[test]
fn captured_ellipsis_records_the_consumed_slice() {
    let tree = sexp!((send :a :b :c :d));
    let root = tree.root();
    let captures = program("(send :a $... :d)").evaluate(&root, &[], None).unwrap();
    let expected: Vec<Child<SexpNode>> =
        vec![Child::Value(Scalar::sym("b")), Child::Value(Scalar::sym("c"))];
    assert_eq!(captures[0], Captured::List(expected));

    let captures = program("($... _)").evaluate(&root, &[], None).unwrap();
    match &captures[0] {
        Captured::List(children) => assert_eq!(children.len(), 3),
        Captured::Value(_) => panic!("expected a list capture"),
    }
}

#[test]
fn union_branches_fill_the_same_slots() {
    let pattern = program("{(send $_ _) (csend _ $_)}");
    let send_tree = sexp!((send :recv :meth));
    let csend_tree = sexp!((csend :recv :meth));

    let captures = pattern.evaluate(&send_tree.root(), &[], None).unwrap();
    assert_eq!(captures[0], Captured::Value(Child::Value(Scalar::sym("recv"))));

    let captures = pattern.evaluate(&csend_tree.root(), &[], None).unwrap();
    assert_eq!(captures[0], Captured::Value(Child::Value(Scalar::sym("meth"))));
}

#[test]
fn named_wildcards_unify_structurally() {
    let same = sexp!((pair (int 1) (int 1)));
    let diff = sexp!((pair (int 1) (int 2)));
    assert!(matches("(pair _x _x)", &same.root()));
    assert!(!matches("(pair _x _x)", &diff.root()));

    let tree = sexp!((int 5));
    assert!(matches("(_kind _)", &tree.root()));
}

#[test]
fn unification_reaches_the_type_tag() {
    let same = sexp!((masgn (int 1) (int 1)));
    assert!(matches("(_ _x _x)", &same.root()));
    let named = sexp!((int 5));
    assert!(matches("(_type 5)", &named.root()));
}

#[test]
fn negation_and_intersection_compose() {
    let tree = sexp!((send (int 5) :abs));
    let root = tree.root();
    assert!(matches("(send !float :abs)", &root));
    assert!(!matches("(send !int :abs)", &root));
    assert!(matches("(send [int !(int 6)] :abs)", &root));
    assert!(!matches("(send [int (int 6)] :abs)", &root));
}

#[test]
fn parameters_compare_structurally() {
    let tree = sexp!((send :a :b));
    let root = tree.root();
    let params: Vec<Child<SexpNode>> =
        vec![Child::Value(Scalar::sym("a")), Child::Value(Scalar::sym("b"))];
    let pattern = program("(send %1 %2)");
    assert!(pattern.evaluate(&root, &params, None).is_some());
    assert!(pattern.evaluate(&root, &[], None).is_none());

    let flipped: Vec<Child<SexpNode>> =
        vec![Child::Value(Scalar::sym("b")), Child::Value(Scalar::sym("a"))];
    assert!(pattern.evaluate(&root, &flipped, None).is_none());
}

#[test]
fn parameter_zero_is_the_match_target() {
    let tree = sexp!((send :a));
    assert!(program("equal?(%0)").evaluate(&tree.root(), &[], None).is_some());
}

#[test]
fn node_parameters_match_equal_subtrees() {
    let tree = sexp!((send (int 5) :abs));
    let root = tree.root();
    let five = nth_node(&root, 0);
    let params = vec![Child::Node(five)];
    assert!(program("(send %1 _)").evaluate(&root, &params, None).is_some());
    assert!(program("(send _ %1)").evaluate(&root, &params, None).is_none());
}

#[test]
fn builtin_predicates_run_against_child_values() {
    let tree = sexp!((int 5));
    let root = tree.root();
    assert!(matches("(int odd?)", &root));
    assert!(!matches("(int even?)", &root));
    assert!(matches("(int between?(0 10))", &root));
    assert!(!matches("(int between?(6 10))", &root));
    assert!(matches("(int equal?(5))", &root));
}

#[test]
fn ascent_applies_the_inner_pattern_to_the_parent() {
    let tree = sexp!((send (int 1) :abs));
    let int_node = nth_node(&tree.root(), 0);
    assert!(program("^(send _ :abs)").evaluate(&int_node, &[], None).is_some());
    assert!(program("^(send _ :min)").evaluate(&int_node, &[], None).is_none());
    // the root has no parent
    assert!(program("^^_").evaluate(&int_node, &[], None).is_none());
}

#[test]
fn capabilities_serve_unknown_predicates_and_functions() {
    let tree = sexp!((send nil :foo));
    let root = tree.root();

    let mut table: CapabilityTable<SexpNode> = CapabilityTable::new();
    table.register("symbolish", |candidate, _| {
        matches!(candidate, Child::Value(Scalar::Sym(_)))
    });
    table.register("arity_is", |candidate, args| {
        let Child::Node(node) = candidate else { return false };
        i64::try_from(node.child_count())
            .is_ok_and(|count| args.first() == Some(&Child::Value(Scalar::Int(count))))
    });

    let pattern = program("(send _ symbolish?)");
    assert!(pattern.evaluate(&root, &[], Some(&table)).is_some());

    let pattern = program("(send #symbolish _)");
    assert!(pattern.evaluate(&root, &[], Some(&table)).is_none());

    let pattern = program("#arity_is(2)");
    assert!(pattern.evaluate(&root, &[], Some(&table)).is_some());
}

#[test]
#[should_panic(expected = "capability `missing`")]
fn unregistered_capabilities_panic_when_reached() {
    let tree = sexp!((send nil :foo));
    let _ = program("#missing").evaluate(&tree.root(), &[], None);
}

#[test]
fn unreached_capabilities_never_resolve() {
    // the first union branch wins before `#missing` is consulted
    let tree = sexp!((int 1));
    assert!(matches("{int #missing}", &tree.root()));
}
