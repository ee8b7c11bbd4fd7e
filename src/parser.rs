use crate::{
    error::SyntaxError,
    expr::{Expr, Literal},
    lexer::{Lexer, Token},
};

/// Deepest nesting of parentheses, calls, `pow` and unary minus accepted.
pub const MAX_DEPTH: usize = 256;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn get_current(&self) -> &Token {
        // the lexer always ends the stream with Eof
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn get_and_increment(&mut self) -> Token {
        let tok = self.get_current().clone();
        self.inc();
        tok
    }

    fn inc(&mut self) {
        self.pos += 1
    }

    fn get_at_offset(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&Token::Eof)
    }

    fn matches(&mut self, token: &Token) -> bool {
        if self.get_current() == token {
            self.inc();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), SyntaxError> {
        let found = self.get_and_increment();
        if found == expected {
            Ok(())
        } else {
            Err(SyntaxError::Unexpected { expected, found })
        }
    }

    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_DEPTH {
            return Err(SyntaxError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // sum := product (('+' | '-') product)*
    fn parse_sum(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.parse_product()?;
        loop {
            if self.matches(&Token::Add) {
                lhs = Expr::Add(lhs.into(), self.parse_product()?.into());
            } else if self.matches(&Token::Subtract) {
                lhs = Expr::Sub(lhs.into(), self.parse_product()?.into());
            } else {
                return Ok(lhs);
            }
        }
    }

    // product := power (('*' | '/') power)*
    fn parse_product(&mut self) -> Result<Expr, SyntaxError> {
        let mut lhs = self.parse_power()?;
        loop {
            if self.matches(&Token::Multiply) {
                lhs = Expr::Mul(lhs.into(), self.parse_power()?.into());
            } else if self.matches(&Token::Divide) {
                lhs = Expr::Div(lhs.into(), self.parse_power()?.into());
            } else {
                return Ok(lhs);
            }
        }
    }

    // power := 'pow' '(' sum ',' sum ')' | unary
    //
    // `pow` is the only two-argument call and is only recognised here; anywhere
    // else it is an ordinary one-argument function.
    fn parse_power(&mut self) -> Result<Expr, SyntaxError> {
        let is_pow = matches!(self.get_current(), Token::Ident(name) if name == "pow")
            && *self.get_at_offset(1) == Token::OpenParen;
        if !is_pow {
            return self.parse_unary();
        }
        self.pos += 2;
        self.nested(|parser| {
            let base = parser.parse_sum()?;
            parser.expect(Token::Separator)?;
            let exponent = parser.parse_sum()?;
            parser.expect(Token::CloseParen)?;
            Ok(Expr::Pow(base.into(), exponent.into()))
        })
    }

    // unary := '-' unary | primary
    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        if self.matches(&Token::Subtract) {
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expr::Negate(operand.into()));
        }
        self.parse_primary()
    }

    // primary := number | ident | ident '(' sum ')' | '(' sum ')'
    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        match self.get_and_increment() {
            Token::Number(text) => Literal::parse(&text)
                .map(Expr::Number)
                .ok_or(SyntaxError::MalformedNumber(text)),
            Token::Ident(name) => {
                if !self.matches(&Token::OpenParen) {
                    return Ok(Expr::Ident(name));
                }
                let argument = self.nested(Self::parse_group)?;
                Ok(Expr::Call(name, argument.into()))
            }
            Token::OpenParen => self.nested(Self::parse_group),
            Token::Eof => Err(SyntaxError::StreamEnded),
            tok => Err(SyntaxError::Unknown(tok)),
        }
    }

    // the rest of `( sum )` once the opening paren is consumed
    fn parse_group(&mut self) -> Result<Expr, SyntaxError> {
        let inner = self.parse_sum()?;
        self.expect(Token::CloseParen)?;
        Ok(inner)
    }

    fn parse(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_sum()?;
        match self.get_current() {
            Token::Eof => Ok(expr),
            tok => Err(SyntaxError::Trailing(tok.clone())),
        }
    }
}

/// Parses one arithmetic expression; the whole input must be consumed.
pub fn parse(input: &str) -> Result<Expr, SyntaxError> {
    let mut parser = Parser {
        tokens: Lexer::new(input).tokenize(),
        pos: 0,
        depth: 0,
    };
    let expr = parser.parse()?;
    tracing::trace!("parsed {input:?} as {expr}");
    Ok(expr)
}
