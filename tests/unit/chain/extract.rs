use super::*;
use crate::fixtures::lambda;

fn names(members: &[MemberInfo]) -> Vec<&str> {
    members.iter().map(MemberInfo::name).collect()
}

#[test]
fn chain_is_root_to_leaf() {
    let l = lambda("p: Person => p.Address.Country.Name");
    let chain = get_chain(l.body());
    assert_eq!(chain.len(), 3);
    assert!(chain_root(&chain).is_some_and(|r| r.same(&l.params()[0])));
    for pair in chain.windows(2) {
        let target = pair[1].target.as_ref().unwrap();
        assert!(target.same(&pair[0].expression));
    }
    assert!(chain[2].expression.same(l.body()));
    assert_eq!(
        names(&get_lambda_members_chain(&l)),
        vec!["Address", "Country", "Name"]
    );
}

#[test]
fn calls_are_links() {
    let l = lambda("p: Person => p.Primary().Country.Code");
    assert_eq!(
        names(&get_lambda_members_chain(&l)),
        vec!["Primary", "Country", "Code"]
    );
    let chain = get_chain(l.body());
    assert!(chain_root(&chain).is_some_and(|r| r.same(&l.params()[0])));

    let l = lambda("p: Person => p.Manager.GetAddress().City");
    assert_eq!(
        names(&get_lambda_members_chain(&l)),
        vec!["Manager", "GetAddress", "City"]
    );
}

#[test]
fn plain_static_calls_become_the_root() {
    let l = lambda("p: Person => Util.Foo().Address.City");
    let chain = get_chain(l.body());
    assert_eq!(chain.len(), 2);
    let root = chain_root(&chain).unwrap();
    assert!(matches!(root.kind(), ExprKind::Call { target: None, .. }));

    let l = lambda("p: Person => Text.Join(p.Name, p.Name)");
    assert!(get_chain(l.body()).is_empty());
}

#[test]
fn static_member_starts_without_a_root() {
    let l = lambda("p: Person => Util.Default.Name");
    let chain = get_chain(l.body());
    assert_eq!(names(&get_members_chain(l.body())), vec!["Default", "Name"]);
    assert!(chain_root(&chain).is_none());
}

#[test]
fn non_chainable_input_is_empty() {
    assert!(get_chain(lambda("(a: int, b: int) => a + b").body()).is_empty());
    assert!(get_chain(lambda("p: Person => p").body()).is_empty());
    assert!(chain_root(&[]).is_none());
}

#[test]
fn get_member_is_depth_one_only() {
    let m = get_member(&lambda("p: Person => p.Address")).unwrap();
    assert_eq!(m.name(), "Address");
    assert!(get_member(&lambda("p: Person => p.Address.City")).is_none());
    assert!(get_member(&lambda("p: Person => p.FullName()")).is_none());
    assert!(get_member(&lambda("(a: Person, b: Person) => b.Address")).is_none());
}

#[test]
fn member_expressions_stop_at_calls() {
    let l = lambda("p: Person => p.Address.City");
    let exprs = get_member_expressions(l.body());
    assert_eq!(exprs.len(), 2);
    assert_eq!(exprs[0].to_string(), "p.Address");

    let l = lambda("p: Person => p.Manager.GetAddress().City");
    let exprs = get_member_expressions(l.body());
    assert_eq!(exprs.len(), 1);
    assert_eq!(exprs[0].to_string(), "p.Manager");

    let l = lambda("p: Person => p.Manager.GetAddress()");
    assert!(get_member_expressions(l.body()).is_empty());
}
