use crate::expression::lexer::{Span, Token, TokenKind, lex};
use crate::expression::node::BinaryOp;
use crate::expression::syntax::{LambdaSyntax, Lit, ParamSyntax, Syntax};
use crate::foundation::error::{ExprError, ExprResult};

/// Parse `p: T => body` or `(a: A, b: B) => body`.
pub(crate) fn parse_lambda_syntax(src: &str) -> ExprResult<LambdaSyntax> {
    let mut p = Parser::new(src)?;
    let params = p.parse_params()?;
    p.expect(TokenKind::Arrow)?;
    let body = p.parse_conditional()?;
    p.expect(TokenKind::Eof)?;
    Ok(LambdaSyntax { params, body })
}

/// Parse a free-standing body expression.
pub(crate) fn parse_body_syntax(src: &str) -> ExprResult<Syntax> {
    let mut p = Parser::new(src)?;
    let body = p.parse_conditional()?;
    p.expect(TokenKind::Eof)?;
    Ok(body)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(src: &str) -> ExprResult<Self> {
        Ok(Self {
            tokens: lex(src)?,
            pos: 0,
        })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_at(&self, ahead: usize) -> &TokenKind {
        let idx = (self.pos + ahead).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn bump(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> ExprResult<()> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ExprError::parse(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_ident(&mut self, what: &str) -> ExprResult<String> {
        let t = self.bump().clone();
        match t.kind {
            TokenKind::Ident(s) => Ok(s),
            other => Err(ExprError::parse(
                t.span.start,
                format!("expected {what}, found {other:?}"),
            )),
        }
    }

    fn parse_params(&mut self) -> ExprResult<Vec<ParamSyntax>> {
        if self.consume(TokenKind::LParen) {
            self.delimited(Self::parse_param)
        } else {
            Ok(vec![self.parse_param()?])
        }
    }

    fn parse_param(&mut self) -> ExprResult<ParamSyntax> {
        let name = self.expect_ident("parameter name")?;
        self.expect(TokenKind::Colon)?;
        let mut ty = self.expect_ident("parameter type")?;
        if self.consume(TokenKind::Question) {
            ty.push('?');
        }
        Ok(ParamSyntax { name, ty })
    }

    fn parse_conditional(&mut self) -> ExprResult<Syntax> {
        let test = self.parse_binary(0)?;
        if !self.consume(TokenKind::Question) {
            return Ok(test);
        }
        let if_true = self.parse_conditional()?;
        self.expect(TokenKind::Colon)?;
        let if_false = self.parse_conditional()?;
        Ok(Syntax::Conditional {
            test: Box::new(test),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
        })
    }

    // Left-associative precedence climbing; `infix` holds the binding powers.
    fn parse_binary(&mut self, min_power: u8) -> ExprResult<Syntax> {
        let mut lhs = self.parse_unary()?;
        while let Some((op, power)) = infix(&self.peek().kind) {
            if power < min_power {
                break;
            }
            self.bump();
            let rhs = self.parse_binary(power + 1)?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    // Only numeric literals can be negated; there is no unary node.
    fn parse_unary(&mut self) -> ExprResult<Syntax> {
        if self.peek().kind != TokenKind::Minus {
            return self.parse_postfix();
        }
        let minus = self.span();
        let negated = match self.peek_at(1) {
            TokenKind::Int(v) => match 0i64.checked_sub_unsigned(*v) {
                Some(v) => Lit::Int(v),
                None => return Err(int_out_of_range(minus.start)),
            },
            TokenKind::Double(v) => Lit::Double(-*v),
            _ => {
                return Err(ExprError::parse(
                    minus.start,
                    "unary minus is only supported on numeric literals",
                ));
            }
        };
        self.bump();
        self.bump();
        Ok(Syntax::Lit(negated))
    }

    fn parse_postfix(&mut self) -> ExprResult<Syntax> {
        let mut e = self.parse_primary()?;

        while self.consume(TokenKind::Dot) {
            let name = self.expect_ident("member name after '.'")?;
            if self.consume(TokenKind::LParen) {
                let args = self.delimited(Self::parse_conditional)?;
                e = Syntax::Call {
                    target: Some(Box::new(e)),
                    name,
                    args,
                };
            } else {
                e = Syntax::Member {
                    target: Box::new(e),
                    name,
                };
            }
        }

        Ok(e)
    }

    /// Comma-separated items up to and including the closing `)`.
    fn delimited<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> ExprResult<T>,
    ) -> ExprResult<Vec<T>> {
        let mut items = Vec::new();
        while !self.consume(TokenKind::RParen) {
            if !items.is_empty() {
                self.expect(TokenKind::Comma)?;
            }
            items.push(item(self)?);
        }
        Ok(items)
    }

    fn parse_primary(&mut self) -> ExprResult<Syntax> {
        let t = self.bump().clone();
        match t.kind {
            TokenKind::Int(v) => i64::try_from(v)
                .map(|v| Syntax::Lit(Lit::Int(v)))
                .map_err(|_| int_out_of_range(t.span.start)),
            TokenKind::Double(v) => Ok(Syntax::Lit(Lit::Double(v))),
            TokenKind::Str(s) => Ok(Syntax::Lit(Lit::Str(s))),
            TokenKind::True => Ok(Syntax::Lit(Lit::Bool(true))),
            TokenKind::False => Ok(Syntax::Lit(Lit::Bool(false))),
            TokenKind::Null => Ok(Syntax::Lit(Lit::Null)),
            TokenKind::Ident(name) => {
                if self.consume(TokenKind::LParen) {
                    let args = self.delimited(Self::parse_conditional)?;
                    Ok(Syntax::Call {
                        target: None,
                        name,
                        args,
                    })
                } else {
                    Ok(Syntax::Ident(name))
                }
            }
            TokenKind::LParen => {
                let e = self.parse_conditional()?;
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(ExprError::parse(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }
}

fn binary(op: BinaryOp, left: Syntax, right: Syntax) -> Syntax {
    Syntax::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn int_out_of_range(offset: usize) -> ExprError {
    ExprError::parse(offset, "integer literal out of range")
}

fn infix(kind: &TokenKind) -> Option<(BinaryOp, u8)> {
    let entry = match kind {
        TokenKind::OrOr => (BinaryOp::Or, 1),
        TokenKind::AndAnd => (BinaryOp::And, 2),
        TokenKind::EqEq => (BinaryOp::Eq, 3),
        TokenKind::Ne => (BinaryOp::Ne, 3),
        TokenKind::Lt => (BinaryOp::Lt, 4),
        TokenKind::Le => (BinaryOp::Le, 4),
        TokenKind::Gt => (BinaryOp::Gt, 4),
        TokenKind::Ge => (BinaryOp::Ge, 4),
        TokenKind::Plus => (BinaryOp::Add, 5),
        TokenKind::Minus => (BinaryOp::Sub, 5),
        TokenKind::Star => (BinaryOp::Mul, 6),
        TokenKind::Slash => (BinaryOp::Div, 6),
        TokenKind::Percent => (BinaryOp::Mod, 6),
        _ => return None,
    };
    Some(entry)
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
