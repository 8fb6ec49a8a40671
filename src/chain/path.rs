use crate::chain::extract::get_member_expressions;
use crate::expression::node::{ExprKind, Lambda};
use crate::foundation::error::{ExprError, ExprResult};

/// `true` when the lambda body is a member path applied to the lambda's first parameter.
pub fn is_member_path(lambda: &Lambda) -> bool {
    let Some(first) = get_member_expressions(lambda.body()).into_iter().next() else {
        return false;
    };
    let Some(param) = lambda.parameter() else {
        return false;
    };
    matches!(first.kind(), ExprKind::Member { target: Some(t), .. } if t.same(param))
}

/// Reject lambdas that are not member paths, naming the offending argument.
#[tracing::instrument(level = "debug", skip(lambda), fields(lambda = %lambda))]
pub fn ensure_member_path(lambda: &Lambda, name: &str) -> ExprResult<()> {
    if is_member_path(lambda) {
        return Ok(());
    }
    tracing::debug!("not a member path");
    Err(ExprError::invalid_argument(
        name,
        format!("Only member accesses are allowed. {lambda}"),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/chain/path.rs"]
mod tests;
