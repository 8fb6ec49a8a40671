use crate::expression::node::{Expr, Lambda};

/// Lambda body with parameter `i` replaced by `replacements[i]`.
///
/// Pairs are matched by position; surplus parameters or replacements are ignored. Types are
/// not checked.
pub fn replace_parameters(lambda: &Lambda, replacements: &[Expr]) -> Expr {
    substitute(lambda.params(), lambda.body(), replacements, false)
}

/// Like [`replace_parameters`], converting each replacement to its parameter's type when the
/// two differ.
pub fn convert_replace_parameters(lambda: &Lambda, replacements: &[Expr]) -> Expr {
    substitute(lambda.params(), lambda.body(), replacements, true)
}

/// Replace every occurrence of the node `old` (by identity) with `replacement`.
pub fn replace(expression: &Expr, old: &Expr, replacement: &Expr) -> Expr {
    replace_all(expression, &[(old.clone(), replacement.clone())])
}

pub(crate) fn substitute(
    params: &[Expr],
    body: &Expr,
    replacements: &[Expr],
    convert: bool,
) -> Expr {
    let pairs: Vec<(Expr, Expr)> = params
        .iter()
        .zip(replacements)
        .map(|(param, replacement)| {
            let replacement = if convert && replacement.ty() != param.ty() {
                Expr::convert(replacement.clone(), param.ty())
            } else {
                replacement.clone()
            };
            (param.clone(), replacement)
        })
        .collect();
    replace_all(body, &pairs)
}

// Single pass, so a replacement is never itself rewritten.
fn replace_all(expression: &Expr, pairs: &[(Expr, Expr)]) -> Expr {
    if let Some((_, replacement)) = pairs.iter().find(|(old, _)| expression.same(old)) {
        return replacement.clone();
    }
    expression.map_children(|child| replace_all(child, pairs))
}

#[cfg(test)]
#[path = "../../tests/unit/rewrite/substitute.rs"]
mod tests;
