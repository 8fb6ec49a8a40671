use super::*;
use crate::fixtures::lambda;
use crate::model::types::Primitive;

#[test]
fn renders_lambdas() {
    assert_eq!(
        lambda("p: Person => p.Address.City").to_string(),
        "p => p.Address.City"
    );
    assert_eq!(
        lambda("(a: int, b: int) => a * 2 + b").to_string(),
        "(a, b) => ((a * 2) + b)"
    );
    assert_eq!(
        lambda("p: Person => p.Age > 1 ? \"old\" : \"new\"").to_string(),
        "p => ((p.Age > 1) ? \"old\" : \"new\")"
    );
}

#[test]
fn renders_static_members_and_calls() {
    assert_eq!(
        lambda("p: Person => Text.Join(p.Name, Util.Default.Name)").to_string(),
        "p => Text.Join(p.Name, Util.Default.Name)"
    );
}

#[test]
fn renders_synthetic_nodes() {
    let int = Primitive::Int.ty();
    let v = Expr::parameter("v", &int);
    let block = Expr::block(
        vec![v.clone()],
        vec![
            Expr::assign(v.clone(), Expr::constant(Constant::Double(1.0))),
            Expr::convert(v.clone(), &Primitive::Double.ty()),
            Expr::default_of(&int),
        ],
    );
    assert_eq!(
        block.to_string(),
        "{ var v; v = 1.0; Convert(v, double); default(int) }"
    );
}
