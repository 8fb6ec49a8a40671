use super::*;
use crate::expression::node::{Constant, ExprKind};
use crate::fixtures::{lambda, people};
use crate::model::types::Primitive;

#[test]
fn replaces_the_parameter_with_the_given_node() {
    let l = lambda("p: Person => p.Address.City");
    let r = Expr::parameter("r", l.params()[0].ty());
    let out = replace_parameters(&l, std::slice::from_ref(&r));
    assert_eq!(out.to_string(), "r.Address.City");

    let ExprKind::Member {
        target: Some(address),
        ..
    } = out.kind()
    else {
        panic!("expected member access");
    };
    let ExprKind::Member {
        target: Some(root), ..
    } = address.kind()
    else {
        panic!("expected member access");
    };
    assert!(root.same(&r));
}

#[test]
fn replacement_is_positional_and_single_pass() {
    let l = lambda("(a: int, b: int) => a - b");
    let swapped = replace_parameters(&l, &[l.params()[1].clone(), l.params()[0].clone()]);
    assert_eq!(swapped.to_string(), "(b - a)");

    let seven = Expr::constant(Constant::Int(7));
    let partial = replace_parameters(&l, std::slice::from_ref(&seven));
    assert_eq!(partial.to_string(), "(7 - b)");

    let extra = replace_parameters(&l, &[seven.clone(), seven.clone(), seven]);
    assert_eq!(extra.to_string(), "(7 - 7)");
}

#[test]
fn convert_wraps_mismatched_types() {
    let l = lambda("(a: double, b: double) => a * b");
    let one = Expr::constant(Constant::Int(1));
    let half = Expr::constant(Constant::Double(0.5));
    let out = convert_replace_parameters(&l, &[one, half]);
    assert_eq!(out.to_string(), "(Convert(1, double) * 0.5)");
    assert_eq!(out.ty(), &Primitive::Double.ty());
}

#[test]
fn replace_matches_identity_not_structure() {
    let l = lambda("p: Person => p.Name == p.Manager.Name");
    let ExprKind::Binary { left, .. } = l.body().kind() else {
        panic!("expected binary");
    };
    let lit = Expr::constant(Constant::Str("x".to_owned()));
    let out = replace(l.body(), left, &lit);
    assert_eq!(out.to_string(), "(\"x\" == p.Manager.Name)");

    let lookalike = crate::expression::bind::parse_expr("p.Name", people(), l.params()).unwrap();
    assert_eq!(&lookalike, left);
    assert!(replace(l.body(), &lookalike, &lit).same(l.body()));
}

#[test]
fn untouched_subtrees_are_shared() {
    let l = lambda("p: Person => p.Age + p.Manager.Age");
    let ExprKind::Binary { left, right, .. } = l.body().kind() else {
        panic!("expected binary");
    };
    let zero = Expr::constant(Constant::Int(0));
    let out = replace(l.body(), left, &zero);
    let ExprKind::Binary { right: kept, .. } = out.kind() else {
        panic!("expected binary");
    };
    assert!(kept.same(right));
}
