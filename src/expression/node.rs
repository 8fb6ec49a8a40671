use crate::foundation::error::{ExprError, ExprResult};
use crate::model::types::{FieldInfo, MethodInfo, Primitive, TypeDesc, TypeRef};
use std::fmt;
use std::sync::Arc;

/// Immutable, shareable expression node.
///
/// Cloning is cheap (reference count bump). Two handles are the *same* node when they point at
/// the same allocation, see [`Expr::same`]; `==` compares structure.
#[derive(Clone)]
pub struct Expr(Arc<ExprNode>);

#[derive(Debug)]
struct ExprNode {
    kind: ExprKind,
    ty: TypeRef,
}

/// Node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Lambda parameter or block variable.
    Parameter { name: String },
    /// Field/property access; `target` is `None` for static members.
    Member {
        target: Option<Expr>,
        field: Arc<FieldInfo>,
    },
    /// Method call; `target` is `None` for static methods.
    Call {
        target: Option<Expr>,
        method: Arc<MethodInfo>,
        args: Vec<Expr>,
    },
    Lambda { params: Vec<Expr>, body: Expr },
    Conditional {
        test: Expr,
        if_true: Expr,
        if_false: Expr,
    },
    Binary {
        op: BinaryOp,
        left: Expr,
        right: Expr,
    },
    Constant(Constant),
    /// Conversion of `operand` to the node type.
    Convert { operand: Expr },
    /// Zero value of the node type.
    Default,
    /// Sequence evaluating to its last expression, with scoped temporaries.
    Block { variables: Vec<Expr>, body: Vec<Expr> },
    Assign { target: Expr, value: Expr },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// `true` for comparisons and logical connectives.
    pub fn yields_bool(self) -> bool {
        !matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
}

impl Constant {
    /// Natural static type of the literal; `null` is typed `object`.
    pub fn ty(&self) -> TypeRef {
        match self {
            Self::Null => Primitive::Object.ty(),
            Self::Bool(_) => Primitive::Bool.ty(),
            Self::Int(_) => Primitive::Int.ty(),
            Self::Double(_) => Primitive::Double.ty(),
            Self::Str(_) => Primitive::String.ty(),
        }
    }
}

impl Expr {
    fn from_parts(kind: ExprKind, ty: TypeRef) -> Self {
        Self(Arc::new(ExprNode { kind, ty }))
    }

    pub fn parameter(name: impl Into<String>, ty: &TypeRef) -> Self {
        Self::from_parts(ExprKind::Parameter { name: name.into() }, ty.clone())
    }

    pub fn member(target: Option<Expr>, field: &Arc<FieldInfo>) -> Self {
        Self::from_parts(
            ExprKind::Member {
                target,
                field: field.clone(),
            },
            field.ty.clone(),
        )
    }

    pub fn call(target: Option<Expr>, method: &Arc<MethodInfo>, args: Vec<Expr>) -> Self {
        Self::from_parts(
            ExprKind::Call {
                target,
                method: method.clone(),
                args,
            },
            method.return_type.clone(),
        )
    }

    pub fn conditional(test: Expr, if_true: Expr, if_false: Expr) -> Self {
        let ty = if_true.ty().clone();
        Self::from_parts(
            ExprKind::Conditional {
                test,
                if_true,
                if_false,
            },
            ty,
        )
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let ty = if op.yields_bool() {
            Primitive::Bool.ty()
        } else {
            left.ty().clone()
        };
        Self::from_parts(ExprKind::Binary { op, left, right }, ty)
    }

    pub fn constant(value: Constant) -> Self {
        let ty = value.ty();
        Self::from_parts(ExprKind::Constant(value), ty)
    }

    /// `null` typed as `ty`.
    pub fn null(ty: &TypeRef) -> Self {
        Self::from_parts(ExprKind::Constant(Constant::Null), ty.clone())
    }

    pub fn convert(operand: Expr, ty: &TypeRef) -> Self {
        Self::from_parts(ExprKind::Convert { operand }, ty.clone())
    }

    pub fn default_of(ty: &TypeRef) -> Self {
        Self::from_parts(ExprKind::Default, ty.clone())
    }

    pub fn block(variables: Vec<Expr>, body: Vec<Expr>) -> Self {
        let ty = body
            .last()
            .map(|e| e.ty().clone())
            .unwrap_or_else(|| Primitive::Object.ty());
        Self::from_parts(ExprKind::Block { variables, body }, ty)
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        let ty = target.ty().clone();
        Self::from_parts(ExprKind::Assign { target, value }, ty)
    }

    pub fn kind(&self) -> &ExprKind {
        &self.0.kind
    }

    /// Static type of the node.
    pub fn ty(&self) -> &TypeRef {
        &self.0.ty
    }

    /// Node identity.
    pub fn same(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self.kind(), ExprKind::Parameter { .. })
    }

    /// Rebuild this node with every child passed through `f`.
    ///
    /// Binding sites (lambda parameters, block variables, assignment targets) are not visited.
    /// When `f` returns every child unchanged the original node is returned, so untouched
    /// subtrees stay shared.
    pub fn map_children(&self, mut f: impl FnMut(&Expr) -> Expr) -> Expr {
        let mut changed = false;
        let mut visit = |e: &Expr| {
            let out = f(e);
            if !out.same(e) {
                changed = true;
            }
            out
        };

        let kind = match self.kind() {
            ExprKind::Parameter { .. } | ExprKind::Constant(_) | ExprKind::Default => {
                return self.clone();
            }
            ExprKind::Member { target, field } => ExprKind::Member {
                target: target.as_ref().map(&mut visit),
                field: field.clone(),
            },
            ExprKind::Call {
                target,
                method,
                args,
            } => ExprKind::Call {
                target: target.as_ref().map(&mut visit),
                method: method.clone(),
                args: args.iter().map(&mut visit).collect(),
            },
            ExprKind::Lambda { params, body } => ExprKind::Lambda {
                params: params.clone(),
                body: visit(body),
            },
            ExprKind::Conditional {
                test,
                if_true,
                if_false,
            } => ExprKind::Conditional {
                test: visit(test),
                if_true: visit(if_true),
                if_false: visit(if_false),
            },
            ExprKind::Binary { op, left, right } => ExprKind::Binary {
                op: *op,
                left: visit(left),
                right: visit(right),
            },
            ExprKind::Convert { operand } => ExprKind::Convert {
                operand: visit(operand),
            },
            ExprKind::Block { variables, body } => ExprKind::Block {
                variables: variables.clone(),
                body: body.iter().map(&mut visit).collect(),
            },
            ExprKind::Assign { target, value } => ExprKind::Assign {
                target: target.clone(),
                value: visit(value),
            },
        };

        if changed {
            Self::from_parts(kind, self.ty().clone())
        } else {
            self.clone()
        }
    }

    /// Re-root a member access or method call on a new receiver.
    ///
    /// Receiver-style static calls take the receiver as their first argument. Other nodes are
    /// returned unchanged.
    pub fn with_target(&self, new_target: Option<Expr>) -> Expr {
        let kind = match self.kind() {
            ExprKind::Member { field, .. } => ExprKind::Member {
                target: new_target,
                field: field.clone(),
            },
            ExprKind::Call { method, args, .. } if method.is_receiver_call() => {
                let Some(receiver) = new_target else {
                    return self.clone();
                };
                let mut new_args = Vec::with_capacity(args.len().max(1));
                new_args.push(receiver);
                new_args.extend(args.iter().skip(1).cloned());
                ExprKind::Call {
                    target: None,
                    method: method.clone(),
                    args: new_args,
                }
            }
            ExprKind::Call {
                target: Some(_),
                method,
                args,
            } => ExprKind::Call {
                target: new_target,
                method: method.clone(),
                args: args.clone(),
            },
            _ => return self.clone(),
        };
        Self::from_parts(kind, self.ty().clone())
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.same(other) || (self.0.ty == other.0.ty && self.0.kind == other.0.kind)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({self}: {})", self.ty())
    }
}

/// A lambda node: parameters plus body.
#[derive(Clone, PartialEq)]
pub struct Lambda(Expr);

impl Lambda {
    pub fn new(params: Vec<Expr>, body: Expr) -> Self {
        debug_assert!(params.iter().all(Expr::is_parameter));
        let param_types: Vec<TypeRef> = params.iter().map(|p| p.ty().clone()).collect();
        let ty = TypeDesc::function(&param_types, body.ty());
        Self(Expr::from_parts(ExprKind::Lambda { params, body }, ty))
    }

    pub fn params(&self) -> &[Expr] {
        match self.0.kind() {
            ExprKind::Lambda { params, .. } => params,
            _ => unreachable!("Lambda always wraps a lambda node"),
        }
    }

    /// First declared parameter.
    pub fn parameter(&self) -> Option<&Expr> {
        self.params().first()
    }

    pub fn body(&self) -> &Expr {
        match self.0.kind() {
            ExprKind::Lambda { body, .. } => body,
            _ => unreachable!("Lambda always wraps a lambda node"),
        }
    }

    pub fn as_expr(&self) -> &Expr {
        &self.0
    }

    pub fn into_expr(self) -> Expr {
        self.0
    }
}

impl TryFrom<Expr> for Lambda {
    type Error = ExprError;

    fn try_from(e: Expr) -> ExprResult<Self> {
        match e.kind() {
            ExprKind::Lambda { .. } => Ok(Self(e)),
            _ => Err(ExprError::invalid_argument(
                "expression",
                format!("expected a lambda, got {e}"),
            )),
        }
    }
}

impl From<Lambda> for Expr {
    fn from(l: Lambda) -> Self {
        l.0
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lambda({})", self.0)
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/node.rs"]
mod tests;
