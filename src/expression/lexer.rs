use crate::foundation::error::{ExprError, ExprResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    /// Magnitude only; the parser folds a leading `-` and range-checks against `i64`.
    Int(u64),
    Double(f64),
    Str(String),
    True,
    False,
    Null,

    LParen,
    RParen,
    Comma,
    Dot,
    Arrow,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    EqEq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    AndAnd,
    OrOr,

    Question,
    Colon,

    Eof,
}

/// Tokenize lambda text. The returned vector always ends with [`TokenKind::Eof`].
pub(crate) fn lex(input: &str) -> ExprResult<Vec<Token>> {
    let mut cur = Cursor { input, pos: 0 };
    let mut out = Vec::new();

    loop {
        cur.skip_whitespace();
        let start = cur.pos;
        let Some(c) = cur.peek() else {
            out.push(Token {
                kind: TokenKind::Eof,
                span: Span { start },
            });
            return Ok(out);
        };

        let kind = if c.is_ascii_digit() {
            cur.number()?
        } else if c == '"' {
            cur.string()?
        } else if c.is_ascii_alphabetic() || c == '_' {
            cur.word()
        } else {
            cur.punct()?
        };
        out.push(Token {
            kind,
            span: Span { start },
        });
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(|c| c.is_ascii_whitespace());
    }

    // digits ('.' digits)? ([eE] [+-]? digits)?
    fn number(&mut self) -> ExprResult<TokenKind> {
        let start = self.pos;
        self.eat_while(|c| c.is_ascii_digit());

        let mut fractional = false;
        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            fractional = true;
            self.advance();
            self.eat_while(|c| c.is_ascii_digit());
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            fractional = true;
            let exponent_at = self.pos;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            let digits_at = self.pos;
            self.eat_while(|c| c.is_ascii_digit());
            if digits_at == self.pos {
                return Err(ExprError::parse(exponent_at, "exponent has no digits"));
            }
        }

        let text = &self.input[start..self.pos];
        if fractional {
            text.parse()
                .map(TokenKind::Double)
                .map_err(|_| ExprError::parse(start, "invalid number"))
        } else {
            text.parse()
                .map(TokenKind::Int)
                .map_err(|_| ExprError::parse(start, "integer literal out of range"))
        }
    }

    fn string(&mut self) -> ExprResult<TokenKind> {
        let start = self.pos;
        self.advance();
        let mut s = String::new();
        loop {
            match self.advance() {
                None => return Err(ExprError::parse(start, "unterminated string literal")),
                Some('"') => return Ok(TokenKind::Str(s)),
                Some('\\') => {
                    let escape_at = self.pos - 1;
                    let decoded = match self.advance() {
                        None => return Err(ExprError::parse(start, "unterminated string literal")),
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some(other) => {
                            return Err(ExprError::parse(
                                escape_at,
                                format!("unknown escape '\\{other}'"),
                            ));
                        }
                    };
                    s.push(decoded);
                }
                Some(c) => s.push(c),
            }
        }
    }

    fn word(&mut self) -> TokenKind {
        let start = self.pos;
        self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        match &self.input[start..self.pos] {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            ident => TokenKind::Ident(ident.to_owned()),
        }
    }

    fn punct(&mut self) -> ExprResult<TokenKind> {
        let start = self.pos;
        let pair = match (self.peek(), self.peek_second()) {
            (Some('='), Some('>')) => Some(TokenKind::Arrow),
            (Some('&'), Some('&')) => Some(TokenKind::AndAnd),
            (Some('|'), Some('|')) => Some(TokenKind::OrOr),
            (Some('='), Some('=')) => Some(TokenKind::EqEq),
            (Some('!'), Some('=')) => Some(TokenKind::Ne),
            (Some('<'), Some('=')) => Some(TokenKind::Le),
            (Some('>'), Some('=')) => Some(TokenKind::Ge),
            _ => None,
        };
        if let Some(kind) = pair {
            self.pos += 2;
            return Ok(kind);
        }

        let Some(c) = self.advance() else {
            return Err(ExprError::parse(start, "unexpected end of input"));
        };
        Ok(match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            other => {
                return Err(ExprError::parse(
                    start,
                    format!("unexpected character '{other}'"),
                ));
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/lexer.rs"]
mod tests;
