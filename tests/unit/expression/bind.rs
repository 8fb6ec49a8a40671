use super::*;
use crate::expression::node::ExprKind;
use crate::fixtures::{lambda, people};

#[test]
fn body_parameters_are_the_declared_nodes() {
    let l = lambda("(a: Person, b: Person) => b.Name");
    let ExprKind::Member {
        target: Some(t), ..
    } = l.body().kind()
    else {
        panic!("expected member access");
    };
    assert!(t.same(&l.params()[1]));
    assert!(!t.same(&l.params()[0]));
}

#[test]
fn member_chain_types_follow_the_model() {
    let l = lambda("p: Person => p.Address.Zip");
    assert_eq!(l.body().ty().name, "int?");
    assert_eq!(l.as_expr().ty().name, "Func<Person, int?>");
}

#[test]
fn static_members_and_calls() {
    let l = lambda("p: Person => Util.Default.Name");
    let ExprKind::Member {
        target: Some(inner),
        ..
    } = l.body().kind()
    else {
        panic!("expected member access");
    };
    assert!(matches!(
        inner.kind(),
        ExprKind::Member { target: None, .. }
    ));

    let l = lambda("p: Person => Util.Foo().Name");
    assert_eq!(l.body().to_string(), "Util.Foo().Name");

    let l = lambda("p: Person => Foo().Name");
    assert_eq!(l.body().to_string(), "Util.Foo().Name");
}

#[test]
fn receiver_methods_take_the_receiver_as_first_argument() {
    let l = lambda("p: Person => p.Primary().City");
    let ExprKind::Member {
        target: Some(call), ..
    } = l.body().kind()
    else {
        panic!("expected member access");
    };
    let ExprKind::Call {
        target: None,
        method,
        args,
    } = call.kind()
    else {
        panic!("expected static call");
    };
    assert_eq!(method.name, "Primary");
    assert_eq!(args.len(), 1);
    assert!(args[0].same(&l.params()[0]));
}

#[test]
fn instance_methods_keep_their_target() {
    let l = lambda("p: Person => p.Greet(p.Manager)");
    let ExprKind::Call {
        target: Some(t),
        args,
        ..
    } = l.body().kind()
    else {
        panic!("expected instance call");
    };
    assert!(t.same(&l.params()[0]));
    assert_eq!(args.len(), 1);
}

#[test]
fn null_operands_take_the_other_side_type() {
    let l = lambda("p: Person => p.Address == null");
    let ExprKind::Binary { right, .. } = l.body().kind() else {
        panic!("expected binary");
    };
    assert_eq!(right.ty().name, "Address");

    let l = lambda("p: Person => p.Age > 1 ? p.Name : null");
    assert_eq!(l.body().ty().name, "string");
}

#[test]
fn parse_expr_uses_caller_scope() {
    let l = lambda("p: Person => p");
    let e = parse_expr("p.Manager.Name", people(), l.params()).unwrap();
    let ExprKind::Member {
        target: Some(manager),
        ..
    } = e.kind()
    else {
        panic!("expected member access");
    };
    let ExprKind::Member {
        target: Some(p), ..
    } = manager.kind()
    else {
        panic!("expected member access");
    };
    assert!(p.same(&l.params()[0]));
}

#[test]
fn binding_errors() {
    let model = people();
    for (src, needle) in [
        ("p: Person => q", "unknown identifier \"q\""),
        ("p: Person => p.Nope", "has no member \"Nope\""),
        ("p: Person => p.Greet()", "expects 1 argument(s), got 0"),
        ("p: Person => Person", "cannot be used as a value"),
        ("p: Person => Nope()", "unknown static method"),
        ("p: Person => p.Default", "has no member"),
        ("(p: Person, p: Person) => p", "duplicate parameter"),
        ("p: Unknown => p", "unknown type \"Unknown\""),
    ] {
        let err = parse_lambda(src, model).unwrap_err();
        assert!(err.to_string().contains(needle), "{src}: {err}");
    }
}

#[test]
fn parameters_shadow_type_names() {
    let l = lambda("Person: Person => Person.Name");
    assert_eq!(l.body().to_string(), "Person.Name");
    assert!(matches!(
        l.body().kind(),
        ExprKind::Member {
            target: Some(_),
            ..
        }
    ));
}
