use copse_ir::sexp;

use super::pattern;
use crate::{Child, Scalar, SexpNode, TreeNode};

fn int(value: i64) -> Child<SexpNode> {
    Child::Value(Scalar::Int(value))
}

#[test]
fn numbered_parameters_compare_structurally() {
    let tree = sexp!((int 1));
    let root = tree.root();
    let p = pattern("(int equal?(%1))");
    assert!(p.match_node(&root, &[int(1)]).is_some());
    assert!(p.match_node(&root, &[int(2)]).is_none());
}

#[test]
fn parameters_stand_in_for_children() {
    let tree = sexp!((send :a :b));
    let root = tree.root();
    let p = pattern("(send %1 %2)");
    let a = Child::Value(Scalar::sym("a"));
    let b = Child::Value(Scalar::sym("b"));
    assert!(p.match_node(&root, &[a.clone(), b.clone()]).is_some());
    assert!(p.match_node(&root, &[b, a]).is_none());
}

#[test]
fn node_parameters_match_equal_subtrees() {
    let tree = sexp!((send (int 5) :inc));
    let root = tree.root();
    let five = match root.child(0) {
        Some(Child::Node(node)) => node,
        _ => panic!("receiver is a node"),
    };
    let p = pattern("(send %1 _)");
    assert!(p.match_node(&root, &[Child::Node(five)]).is_some());
    assert!(p.match_node(&root, &[Child::Value(Scalar::Int(5))]).is_none());
}

#[test]
fn missing_parameters_decline_instead_of_erroring() {
    let tree = sexp!((send :a));
    let root = tree.root();
    assert!(pattern("(send %1)").match_node(&root, &[]).is_none());
    assert!(pattern("(send %3)")
        .match_node(&root, &[Child::Value(Scalar::sym("a"))])
        .is_none());
}

#[test]
fn parameter_zero_is_the_original_target() {
    let tree = sexp!((send (int 5) :inc));
    let root = tree.root();
    assert!(pattern("equal?(%0)").match_node(&root, &[]).is_some());

    // %0 still means the original target after ascending away from it
    let receiver = match root.child(0) {
        Some(Child::Node(node)) => node,
        _ => panic!("receiver is a node"),
    };
    let p = pattern("^(send equal?(%0) _)");
    assert!(p.match_node(&receiver, &[]).is_some());
}

#[test]
fn bare_percent_counts_up_from_one_on_its_own() {
    let tree = sexp!((pair :a :b));
    let root = tree.root();
    let a = Child::Value(Scalar::sym("a"));
    let b = Child::Value(Scalar::sym("b"));

    // an explicit %2 first does not advance the bare counter: the first
    // bare % is still %1, not %3
    let p = pattern("(pair %2 %)");
    assert!(p.match_node(&root, &[b.clone(), a.clone()]).is_some());
    assert!(p.match_node(&root, &[a.clone(), b.clone()]).is_none());

    let q = pattern("(pair % %2)");
    assert!(q.match_node(&root, &[a, b]).is_some());
}

#[test]
fn equal_parameter_values_satisfy_repeated_references() {
    let tree = sexp!((pair :x :x));
    let root = tree.root();
    let x = Child::Value(Scalar::sym("x"));
    assert!(pattern("(pair %1 %1)").match_node(&root, &[x]).is_some());
}
