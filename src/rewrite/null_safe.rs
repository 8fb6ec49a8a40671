use crate::chain::extract::get_chain;
use crate::expression::node::{BinaryOp, Expr, ExprKind};
use crate::model::types::TypeRef;

/// `expression == null ? otherwise : then`.
///
/// `otherwise` defaults to the zero value of `then`'s type and is converted to that type when
/// it differs. A non-nullable `expression` yields `then` unchanged.
pub fn if_null_else(expression: &Expr, then: Expr, otherwise: Option<Expr>) -> Expr {
    if !expression.ty().is_nullable() {
        return then;
    }
    let otherwise = match otherwise {
        None => Expr::default_of(then.ty()),
        Some(e) if e.ty() != then.ty() => Expr::convert(e, then.ty()),
        Some(e) => e,
    };
    let test = Expr::binary(BinaryOp::Eq, expression.clone(), Expr::null(expression.ty()));
    Expr::conditional(test, otherwise, then)
}

/// Null-safe rewrite of an access chain.
///
/// Every intermediate link is evaluated once into a temporary; when the temporary can be null
/// the rest of the chain is skipped and the default of the result type is produced instead.
/// The chain root itself is not guarded, so chains shorter than two links come back unguarded.
/// The result type is `destination` when given, else the type of `expression`. Temporaries never
/// reuse the name of a parameter referenced by `expression`.
#[tracing::instrument(level = "debug", skip_all, fields(expression = %expression))]
pub fn null_check(expression: &Expr, destination: Option<&TypeRef>) -> Expr {
    let links = get_chain(expression);
    let result_ty = destination.unwrap_or(expression.ty()).clone();
    if links.len() < 2 {
        return convert_to(expression.clone(), &result_ty);
    }

    let default = Expr::default_of(&result_ty);

    let mut names = Vec::new();
    parameter_names(expression, &mut names);
    let mut temps: Vec<Expr> = Vec::with_capacity(links.len() - 1);
    let mut assigns: Vec<Expr> = Vec::with_capacity(links.len() - 1);
    for link in &links[..links.len() - 1] {
        let name = unique_name(&mut names, link.member.name());
        let temp = Expr::parameter(name, link.expression.ty());
        let value = match temps.last() {
            Some(prev) => link.expression.with_target(Some(prev.clone())),
            None => link.expression.clone(),
        };
        assigns.push(Expr::assign(temp.clone(), value));
        temps.push(temp);
    }

    let last = &temps[temps.len() - 1];
    let leaf = links[links.len() - 1]
        .expression
        .with_target(Some(last.clone()));
    let mut rest = convert_to(leaf, &result_ty);
    for i in (1..temps.len()).rev() {
        let guarded = if_null_else(&temps[i], rest, Some(default.clone()));
        rest = Expr::block(Vec::new(), vec![assigns[i].clone(), guarded]);
    }
    let guarded = if_null_else(&temps[0], rest, Some(default));

    tracing::debug!(temporaries = temps.len(), "null check built");
    Expr::block(temps, vec![assigns[0].clone(), guarded])
}

fn convert_to(expression: Expr, ty: &TypeRef) -> Expr {
    if expression.ty() == ty {
        expression
    } else {
        Expr::convert(expression, ty)
    }
}

fn parameter_names(expression: &Expr, out: &mut Vec<String>) {
    if let ExprKind::Parameter { name } = expression.kind() {
        if !out.contains(name) {
            out.push(name.clone());
        }
        return;
    }
    expression.map_children(|child| {
        parameter_names(child, out);
        child.clone()
    });
}

// Lower-cased member name, suffixed on collision.
fn unique_name(taken: &mut Vec<String>, member: &str) -> String {
    let mut chars = member.chars();
    let base: String = match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => "temp".to_owned(),
    };
    let mut name = base.clone();
    let mut n = 1;
    while taken.contains(&name) {
        name = format!("{base}{n}");
        n += 1;
    }
    taken.push(name.clone());
    name
}

#[cfg(test)]
#[path = "../../tests/unit/rewrite/null_safe.rs"]
mod tests;
