use crate::chain::extract::{chain_root, get_chain};
use crate::expression::node::{Expr, ExprKind, Lambda};
use crate::foundation::error::{ExprError, ExprResult};
use crate::model::types::MemberInfo;
use crate::rewrite::substitute::{replace, replace_parameters, substitute};

/// Apply `members` to `root` in order, building the access chain.
///
/// Static methods receive the running node as their only argument; static fields ignore it.
pub fn member_accesses(members: &[MemberInfo], root: &Expr) -> Expr {
    members
        .iter()
        .fold(root.clone(), |inner, member| match member {
            MemberInfo::Method(m) if m.is_static => Expr::call(None, m, vec![inner]),
            MemberInfo::Method(m) => Expr::call(Some(inner), m, Vec::new()),
            MemberInfo::Field(f) if f.is_static => Expr::member(None, f),
            MemberInfo::Field(f) => Expr::member(Some(inner), f),
        })
}

/// `source => source.M0.M1...` over the first member's declaring type.
pub fn lambda_from_members(members: &[MemberInfo]) -> ExprResult<Lambda> {
    let first = members
        .first()
        .ok_or_else(|| ExprError::invalid_argument("members", "member list is empty"))?;
    let source = Expr::parameter("source", first.declaring_type());
    let body = member_accesses(members, &source);
    Ok(Lambda::new(vec![source], body))
}

/// Thread `root` through `expressions`, left to right.
///
/// A lambda element has its parameters replaced by the running node; any other element has
/// the root of its own chain replaced. Elements without a chain root are taken as they are.
#[tracing::instrument(level = "trace", skip_all, fields(len = expressions.len()))]
pub fn chain(expressions: &[Expr], root: &Expr) -> Expr {
    expressions.iter().fold(root.clone(), |left, right| match right.kind() {
        ExprKind::Lambda { params, body } => {
            substitute(params, body, std::slice::from_ref(&left), false)
        }
        _ => {
            let links = get_chain(right);
            match chain_root(&links) {
                Some(old) => replace(right, old, &left),
                None => right.clone(),
            }
        }
    })
}

/// `x => second(first(x))`.
pub fn concat(first: &Lambda, second: &Lambda) -> Lambda {
    let body = replace_parameters(second, std::slice::from_ref(first.body()));
    Lambda::new(first.params().to_vec(), body)
}

#[cfg(test)]
#[path = "../../tests/unit/rewrite/compose.rs"]
mod tests;
