use super::*;
use crate::fixtures::{lambda, people};

#[test]
fn identity_differs_from_structural_equality() {
    let int = Primitive::Int.ty();
    let a = Expr::parameter("x", &int);
    let b = Expr::parameter("x", &int);
    assert_eq!(a, b);
    assert!(!a.same(&b));
    assert!(a.same(&a.clone()));
}

#[test]
fn map_children_shares_untouched_subtrees() {
    let l = lambda("p: Person => p.Address.City");
    let body = l.body().clone();
    let same = body.map_children(|c| c.clone());
    assert!(same.same(&body));

    let ExprKind::Member {
        target: Some(address),
        ..
    } = body.kind()
    else {
        panic!("expected member access");
    };
    let other = Expr::parameter("q", l.params()[0].ty());
    let rebuilt = address.map_children(|_| other.clone());
    assert!(!rebuilt.same(address));
    assert_eq!(rebuilt.to_string(), "q.Address");
    assert_eq!(rebuilt.ty(), address.ty());
}

#[test]
fn map_children_skips_binding_sites() {
    let int = Primitive::Int.ty();
    let v = Expr::parameter("v", &int);
    let one = Expr::constant(Constant::Int(1));
    let block = Expr::block(vec![v.clone()], vec![Expr::assign(v.clone(), one), v.clone()]);
    let mut seen = Vec::new();
    block.map_children(|c| {
        seen.push(c.clone());
        c.clone()
    });
    assert_eq!(seen.len(), 2);
    assert!(matches!(seen[0].kind(), ExprKind::Assign { .. }));
    assert!(seen[1].same(&v));
}

#[test]
fn with_target_reroots_members_and_calls() {
    let l = lambda("p: Person => p.Address");
    let q = Expr::parameter("q", l.params()[0].ty());
    assert_eq!(l.body().with_target(Some(q.clone())).to_string(), "q.Address");

    let l = lambda("p: Person => p.FullName()");
    assert_eq!(l.body().with_target(Some(q.clone())).to_string(), "q.FullName()");

    let l = lambda("p: Person => p.Primary()");
    assert_eq!(
        l.body().with_target(Some(q.clone())).to_string(),
        "Addresses.Primary(q)"
    );

    let l = lambda("p: Person => Foo()");
    assert!(l.body().with_target(Some(q)).same(l.body()));
}

#[test]
fn lambda_type_and_conversion() {
    let l = lambda("(a: int, b: int) => a + b");
    assert_eq!(l.as_expr().ty().name, "Func<int, int, int>");
    assert_eq!(l.params().len(), 2);
    assert!(l.parameter().is_some_and(|p| p.same(&l.params()[0])));

    let back = Lambda::try_from(l.clone().into_expr()).unwrap();
    assert_eq!(back, l);

    let err = Lambda::try_from(l.body().clone()).unwrap_err();
    assert!(matches!(err, ExprError::InvalidArgument { .. }));
}

#[test]
fn binary_and_block_types() {
    let l = lambda("p: Person => p.Age < 3");
    assert_eq!(l.body().ty(), &Primitive::Bool.ty());

    let empty = Expr::block(vec![], vec![]);
    assert_eq!(empty.ty(), &Primitive::Object.ty());

    let person = people().resolve_type("Person").unwrap();
    assert_eq!(Expr::null(&person).ty().name, "Person");
    assert_eq!(Expr::constant(Constant::Null).ty(), &Primitive::Object.ty());
}
