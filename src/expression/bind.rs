use crate::expression::node::{Constant, Expr, ExprKind, Lambda};
use crate::expression::parser::{parse_body_syntax, parse_lambda_syntax};
use crate::expression::syntax::{Lit, Syntax};
use crate::foundation::error::{ExprError, ExprResult};
use crate::model::registry::TypeModel;
use crate::model::types::{MethodInfo, TypeRef};
use std::sync::Arc;

pub(crate) struct BindCtx<'a> {
    pub(crate) model: &'a TypeModel,
    pub(crate) scope: &'a [Expr],
}

/// Parse lambda text (`p: Person => p.Address.City`) and bind it against `model`.
#[tracing::instrument(level = "debug", skip(model))]
pub fn parse_lambda(src: &str, model: &TypeModel) -> ExprResult<Lambda> {
    let syntax = parse_lambda_syntax(src)?;
    let mut params: Vec<Expr> = Vec::with_capacity(syntax.params.len());
    for p in &syntax.params {
        if params.iter().any(|e| param_name(e) == Some(p.name.as_str())) {
            return Err(ExprError::bind(format!("duplicate parameter \"{}\"", p.name)));
        }
        let ty = model.resolve_type(&p.ty)?;
        params.push(Expr::parameter(p.name.clone(), &ty));
    }
    let ctx = BindCtx {
        model,
        scope: &params,
    };
    let body = bind_expr(&syntax.body, &ctx)?;
    Ok(Lambda::new(params, body))
}

/// Parse a free-standing expression whose identifiers refer to the parameters in `scope`.
pub fn parse_expr(src: &str, model: &TypeModel, scope: &[Expr]) -> ExprResult<Expr> {
    let syntax = parse_body_syntax(src)?;
    bind_expr(&syntax, &BindCtx { model, scope })
}

pub(crate) fn bind_expr(s: &Syntax, ctx: &BindCtx<'_>) -> ExprResult<Expr> {
    match s {
        Syntax::Lit(lit) => Ok(Expr::constant(match lit {
            Lit::Int(v) => Constant::Int(*v),
            Lit::Double(v) => Constant::Double(*v),
            Lit::Bool(v) => Constant::Bool(*v),
            Lit::Str(v) => Constant::Str(v.clone()),
            Lit::Null => Constant::Null,
        })),
        Syntax::Ident(name) => {
            if let Some(p) = lookup_scope(ctx, name) {
                return Ok(p.clone());
            }
            if ctx.model.type_named(name).is_some() {
                return Err(ExprError::bind(format!(
                    "type \"{name}\" cannot be used as a value"
                )));
            }
            Err(ExprError::bind(format!("unknown identifier \"{name}\"")))
        }
        Syntax::Member { target, name } => {
            if let Some(ty) = static_target(target, ctx) {
                let field = ctx
                    .model
                    .field(&ty, name)
                    .filter(|f| f.is_static)
                    .ok_or_else(|| {
                        ExprError::bind(format!("type \"{ty}\" has no static member \"{name}\""))
                    })?;
                return Ok(Expr::member(None, &field));
            }
            let target = bind_expr(target, ctx)?;
            let field = ctx.model.field(target.ty(), name).ok_or_else(|| {
                ExprError::bind(format!("type \"{}\" has no member \"{name}\"", target.ty()))
            })?;
            if field.is_static {
                return Err(ExprError::bind(format!(
                    "static member \"{}.{name}\" accessed through an instance",
                    field.declaring_type
                )));
            }
            Ok(Expr::member(Some(target), &field))
        }
        Syntax::Call {
            target: Some(target),
            name,
            args,
        } => {
            if let Some(ty) = static_target(target, ctx) {
                let method = ctx
                    .model
                    .method(&ty, name)
                    .filter(|m| m.is_static)
                    .ok_or_else(|| {
                        ExprError::bind(format!("type \"{ty}\" has no static method \"{name}\""))
                    })?;
                let args = bind_args(args, ctx)?;
                check_arity(&method, args.len())?;
                return Ok(Expr::call(None, &method, args));
            }

            let receiver = bind_expr(target, ctx)?;
            let mut args = bind_args(args, ctx)?;
            if let Some(method) = ctx
                .model
                .method(receiver.ty(), name)
                .filter(|m| !m.is_static)
            {
                check_arity(&method, args.len())?;
                return Ok(Expr::call(Some(receiver), &method, args));
            }
            if let Some(method) = ctx.model.receiver_method(receiver.ty(), name) {
                args.insert(0, receiver);
                check_arity(&method, args.len())?;
                return Ok(Expr::call(None, &method, args));
            }
            Err(ExprError::bind(format!(
                "type \"{}\" has no method \"{name}\"",
                receiver.ty()
            )))
        }
        Syntax::Call {
            target: None,
            name,
            args,
        } => {
            let candidates = ctx.model.static_methods_named(name);
            let method = match candidates.as_slice() {
                [] => {
                    return Err(ExprError::bind(format!(
                        "unknown static method \"{name}\""
                    )));
                }
                [m] => m.clone(),
                many => {
                    let owners: Vec<&str> = many
                        .iter()
                        .map(|m| m.declaring_type.name.as_str())
                        .collect();
                    return Err(ExprError::bind(format!(
                        "static method \"{name}\" is ambiguous between {owners:?}"
                    )));
                }
            };
            let args = bind_args(args, ctx)?;
            check_arity(&method, args.len())?;
            Ok(Expr::call(None, &method, args))
        }
        Syntax::Binary { op, left, right } => {
            let (left, right) = bind_operands(left, right, ctx)?;
            Ok(Expr::binary(*op, left, right))
        }
        Syntax::Conditional {
            test,
            if_true,
            if_false,
        } => {
            let test = bind_expr(test, ctx)?;
            let (if_true, if_false) = bind_operands(if_true, if_false, ctx)?;
            Ok(Expr::conditional(test, if_true, if_false))
        }
    }
}

fn lookup_scope<'a>(ctx: &BindCtx<'a>, name: &str) -> Option<&'a Expr> {
    ctx.scope
        .iter()
        .rev()
        .find(|p| param_name(p) == Some(name))
}

fn param_name(e: &Expr) -> Option<&str> {
    match e.kind() {
        ExprKind::Parameter { name } => Some(name),
        _ => None,
    }
}

/// `Type` in `Type.Member` position, unless a parameter of that name shadows it.
fn static_target(target: &Syntax, ctx: &BindCtx<'_>) -> Option<TypeRef> {
    match target {
        Syntax::Ident(name) if lookup_scope(ctx, name).is_none() => ctx.model.type_named(name),
        _ => None,
    }
}

fn bind_args(args: &[Syntax], ctx: &BindCtx<'_>) -> ExprResult<Vec<Expr>> {
    let mut out = Vec::with_capacity(args.len());
    for a in args {
        out.push(bind_expr(a, ctx)?);
    }
    Ok(out)
}

// A bare `null` operand takes the type of the other side.
fn bind_operands(a: &Syntax, b: &Syntax, ctx: &BindCtx<'_>) -> ExprResult<(Expr, Expr)> {
    let is_null = |s: &Syntax| matches!(s, Syntax::Lit(Lit::Null));
    match (is_null(a), is_null(b)) {
        (true, false) => {
            let b = bind_expr(b, ctx)?;
            Ok((Expr::null(b.ty()), b))
        }
        (false, true) => {
            let a = bind_expr(a, ctx)?;
            let null = Expr::null(a.ty());
            Ok((a, null))
        }
        _ => Ok((bind_expr(a, ctx)?, bind_expr(b, ctx)?)),
    }
}

fn check_arity(method: &Arc<MethodInfo>, argc: usize) -> ExprResult<()> {
    if method.params.len() != argc {
        return Err(ExprError::bind(format!(
            "method \"{}.{}\" expects {} argument(s), got {argc}",
            method.declaring_type,
            method.name,
            method.params.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/expression/bind.rs"]
mod tests;
