use crate::expression::node::BinaryOp;

/// Untyped lambda text, before names are bound against a type model.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LambdaSyntax {
    pub(crate) params: Vec<ParamSyntax>,
    pub(crate) body: Syntax,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParamSyntax {
    pub(crate) name: String,
    /// Type name as written, `T?` included.
    pub(crate) ty: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Syntax {
    Lit(Lit),
    Ident(String),
    /// `target.name`
    Member {
        target: Box<Syntax>,
        name: String,
    },
    /// `target.name(args)`, or `name(args)` when `target` is `None`.
    Call {
        target: Option<Box<Syntax>>,
        name: String,
        args: Vec<Syntax>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Syntax>,
        right: Box<Syntax>,
    },
    Conditional {
        test: Box<Syntax>,
        if_true: Box<Syntax>,
        if_false: Box<Syntax>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lit {
    Int(i64),
    Double(f64),
    Bool(bool),
    Str(String),
    Null,
}
