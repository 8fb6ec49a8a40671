use crate::expression::node::{Constant, Expr, ExprKind};
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ExprKind::Parameter { name } => f.write_str(name),
            ExprKind::Member { target, field } => match target {
                Some(t) => write!(f, "{t}.{}", field.name),
                None => write!(f, "{}.{}", field.declaring_type, field.name),
            },
            ExprKind::Call {
                target,
                method,
                args,
            } => {
                match target {
                    Some(t) => write!(f, "{t}.{}(", method.name)?,
                    None => write!(f, "{}.{}(", method.declaring_type, method.name)?,
                }
                write_list(f, args)?;
                f.write_str(")")
            }
            ExprKind::Lambda { params, body } => {
                if params.len() == 1 {
                    write!(f, "{} => {body}", params[0])
                } else {
                    f.write_str("(")?;
                    write_list(f, params)?;
                    write!(f, ") => {body}")
                }
            }
            ExprKind::Conditional {
                test,
                if_true,
                if_false,
            } => write!(f, "({test} ? {if_true} : {if_false})"),
            ExprKind::Binary { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            ExprKind::Constant(c) => match c {
                Constant::Null => f.write_str("null"),
                Constant::Bool(v) => write!(f, "{v}"),
                Constant::Int(v) => write!(f, "{v}"),
                Constant::Double(v) => write!(f, "{v:?}"),
                Constant::Str(s) => write!(f, "{s:?}"),
            },
            ExprKind::Convert { operand } => write!(f, "Convert({operand}, {})", self.ty()),
            ExprKind::Default => write!(f, "default({})", self.ty()),
            ExprKind::Block { variables, body } => {
                f.write_str("{ ")?;
                if !variables.is_empty() {
                    f.write_str("var ")?;
                    write_list(f, variables)?;
                    f.write_str("; ")?;
                }
                for (i, e) in body.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{e}")?;
                }
                f.write_str(" }")
            }
            ExprKind::Assign { target, value } => write!(f, "{target} = {value}"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, e) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{e}")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/expression/display.rs"]
mod tests;
