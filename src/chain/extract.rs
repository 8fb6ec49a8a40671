use crate::expression::node::{Expr, ExprKind, Lambda};
use crate::model::types::MemberInfo;
use smallvec::SmallVec;

/// One link of an access chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// The access node itself.
    pub expression: Expr,
    /// Field or method accessed by `expression`.
    pub member: MemberInfo,
    /// Receiver the access is applied to; `None` for static members.
    pub target: Option<Expr>,
}

/// Root-to-leaf access chain.
///
/// `chain[i].target` is the same node as `chain[i - 1].expression`; `chain[0].target` is the
/// root of the whole chain.
pub type Chain = SmallVec<[Member; 4]>;

/// Decompose `expression` into its access chain, ordered from the root outwards.
///
/// Walks receivers from the leaf: member accesses, instance calls, and receiver-style static
/// calls are recorded; any other node ends the walk and becomes the root. Non-chainable input
/// gives an empty chain.
pub fn get_chain(expression: &Expr) -> Chain {
    let mut out = Chain::new();
    let mut cur = Some(expression.clone());

    while let Some(node) = cur.take() {
        let (member, target) = match node.kind() {
            ExprKind::Member { target, field } => (MemberInfo::Field(field.clone()), target.clone()),
            ExprKind::Call {
                target: Some(receiver),
                method,
                ..
            } if !method.is_static => (MemberInfo::Method(method.clone()), Some(receiver.clone())),
            ExprKind::Call {
                target: None,
                method,
                args,
            } if method.is_receiver_call() && !args.is_empty() => {
                (MemberInfo::Method(method.clone()), Some(args[0].clone()))
            }
            _ => {
                tracing::trace!(root = %node, links = out.len(), "chain stops");
                break;
            }
        };
        out.push(Member {
            expression: node,
            member,
            target: target.clone(),
        });
        cur = target;
    }

    out.reverse();
    out
}

/// Member descriptors of [`get_chain`], root to leaf.
pub fn get_members_chain(expression: &Expr) -> Vec<MemberInfo> {
    get_chain(expression).into_iter().map(|m| m.member).collect()
}

/// [`get_members_chain`] of a lambda's body.
pub fn get_lambda_members_chain(lambda: &Lambda) -> Vec<MemberInfo> {
    get_members_chain(lambda.body())
}

/// The field accessed by a `p => p.Field` lambda.
///
/// Only matches a single member access applied directly to the first parameter.
pub fn get_member(lambda: &Lambda) -> Option<MemberInfo> {
    let ExprKind::Member {
        target: Some(target),
        field,
    } = lambda.body().kind()
    else {
        return None;
    };
    let first = lambda.parameter()?;
    target.same(first).then(|| MemberInfo::Field(field.clone()))
}

/// Leading member-access nodes of the chain, root first.
///
/// Empty unless `expression` is itself a member access; stops at the first link that is a
/// method call.
pub fn get_member_expressions(expression: &Expr) -> Vec<Expr> {
    if !matches!(expression.kind(), ExprKind::Member { .. }) {
        return Vec::new();
    }
    get_chain(expression)
        .into_iter()
        .map(|m| m.expression)
        .take_while(|e| matches!(e.kind(), ExprKind::Member { .. }))
        .collect()
}

/// Root node of a chain; `None` for an empty chain or one that starts at a static member.
pub fn chain_root(chain: &[Member]) -> Option<&Expr> {
    chain.first().and_then(|m| m.target.as_ref())
}

#[cfg(test)]
#[path = "../../tests/unit/chain/extract.rs"]
mod tests;
