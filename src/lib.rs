//! exprchain analyses and rewrites typed expression trees.
//!
//! Expressions are immutable node trees (lambdas, member accesses, method calls, conditionals)
//! typed against a [`TypeModel`]. The crate can:
//!
//! - Decompose an access path such as `p => p.Address.City` into its [`Chain`]
//! - Validate that a lambda is a pure member path
//! - Compose lambdas and substitute parameters
//! - Synthesize null-safe versions of an access chain
//!
//! Lambdas are usually built from text with [`parse_lambda`].
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod chain;
pub(crate) mod expression;
pub(crate) mod model;
pub(crate) mod rewrite;

pub use crate::foundation::error::{ExprError, ExprResult};

pub use crate::model::registry::{
    FieldDef, KindDef, MethodDef, ModelDef, ParamDef, TypeDef, TypeModel,
};
pub use crate::model::types::{
    FieldInfo, MemberInfo, MethodInfo, ParamInfo, Primitive, TypeDesc, TypeKind, TypeRef,
};

pub use crate::expression::bind::{parse_expr, parse_lambda};
pub use crate::expression::node::{BinaryOp, Constant, Expr, ExprKind, Lambda};

pub use crate::chain::extract::{
    Chain, Member, chain_root, get_chain, get_lambda_members_chain, get_member,
    get_member_expressions, get_members_chain,
};
pub use crate::chain::path::{ensure_member_path, is_member_path};

pub use crate::rewrite::compose::{chain, concat, lambda_from_members, member_accesses};
pub use crate::rewrite::null_safe::{if_null_else, null_check};
pub use crate::rewrite::substitute::{convert_replace_parameters, replace, replace_parameters};

#[cfg(test)]
#[path = "../tests/unit/fixtures.rs"]
mod fixtures;
