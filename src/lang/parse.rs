use super::{ast::*, token::*, Error};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Recursion bound for nested statements and expressions.
const MAX_NESTING: usize = 500;

/// Parse a token stream into statements. `first_line` is the source
/// line of the first token; every newline token advances it.
pub fn parse(first_line: usize, tokens: &[Token]) -> Result<Vec<Statement>> {
    Parser::parse(first_line, tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    line: usize,
    last_line: usize,
    parens: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn parse(first_line: usize, tokens: &'a [Token]) -> Result<Vec<Statement>> {
        let mut parse = Parser {
            tokens,
            pos: 0,
            line: first_line,
            last_line: first_line,
            parens: 0,
            depth: 0,
        };
        let mut r: Vec<Statement> = vec![];
        loop {
            parse.skip_terminators();
            if parse.peek().is_none() {
                return Ok(r);
            }
            r.push(parse.statement()?);
            match parse.peek() {
                None => return Ok(r),
                Some(t) if t.is_terminator() => continue,
                Some(t) => return Err(parse.unexpected(t)),
            }
        }
    }

    /// Inside parentheses newlines are not terminators and are skipped.
    fn next(&mut self) -> Option<&'a Token> {
        if self.parens > 0 {
            while let Some(Token::Newline) = self.tokens.get(self.pos) {
                self.pos += 1;
                self.line += 1;
            }
        }
        let t = self.tokens.get(self.pos)?;
        self.pos += 1;
        self.last_line = self.line;
        if *t == Token::Newline {
            self.line += 1;
        }
        Some(t)
    }

    fn peek(&self) -> Option<&'a Token> {
        let mut pos = self.pos;
        if self.parens > 0 {
            while let Some(Token::Newline) = self.tokens.get(pos) {
                pos += 1;
            }
        }
        self.tokens.get(pos)
    }

    fn nested<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Parser<'a>) -> Result<T>,
    {
        if self.depth >= MAX_NESTING {
            return Err(self.error("too deeply nested"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn skip_terminators(&mut self) {
        while let Some(t) = self.peek() {
            if !t.is_terminator() {
                break;
            }
            self.next();
        }
    }

    fn skip_newlines(&mut self) {
        while let Some(Token::Newline) = self.peek() {
            self.next();
        }
    }

    fn error(&self, message: &str) -> Error {
        error!(SyntaxError, Some(self.line); message)
    }

    fn incomplete(&self) -> Error {
        error!(Incomplete, Some(self.line))
    }

    fn unexpected(&self, token: &Token) -> Error {
        Parser::unexpected_at(self.line, token)
    }

    /// Like `unexpected` but for a token already consumed by `next`.
    fn rejected(&self, token: &Token) -> Error {
        Parser::unexpected_at(self.last_line, token)
    }

    fn unexpected_at(line: usize, token: &Token) -> Error {
        match token {
            Token::Newline => error!(SyntaxError, Some(line); "near end of line"),
            _ => error!(SyntaxError, Some(line); &format!("near '{}'", token)),
        }
    }

    fn statement(&mut self) -> Result<Statement> {
        self.nested(Self::any_statement)
    }

    fn any_statement(&mut self) -> Result<Statement> {
        let line = self.line;
        match self.peek() {
            Some(Token::Word(Word::Print)) => {
                self.next();
                Ok(Statement::Print(line, self.expression()?))
            }
            Some(Token::Word(Word::While)) => {
                self.next();
                let cond = self.condition()?;
                self.skip_newlines();
                let body = self.statement()?;
                Ok(Statement::While(line, cond, Box::new(body)))
            }
            Some(Token::Word(Word::If)) => {
                self.next();
                let cond = self.condition()?;
                self.skip_newlines();
                let then = self.statement()?;
                let otherwise = if self.else_follows() {
                    self.skip_newlines();
                    self.next();
                    self.skip_newlines();
                    Some(Box::new(self.statement()?))
                } else {
                    None
                };
                Ok(Statement::If(line, cond, Box::new(then), otherwise))
            }
            Some(Token::LBrace) => {
                self.next();
                Ok(Statement::Block(line, self.statement_list()?))
            }
            Some(Token::Word(Word::Else)) => Err(self.error("else without if")),
            _ => Ok(Statement::Expression(line, self.expression()?)),
        }
    }

    fn else_follows(&self) -> bool {
        self.tokens[self.pos..]
            .iter()
            .find(|t| **t != Token::Newline)
            .map_or(false, |t| *t == Token::Word(Word::Else))
    }

    fn statement_list(&mut self) -> Result<Vec<Statement>> {
        let mut v: Vec<Statement> = vec![];
        loop {
            self.skip_terminators();
            match self.peek() {
                None => return Err(self.incomplete()),
                Some(Token::RBrace) => {
                    self.next();
                    return Ok(v);
                }
                _ => v.push(self.statement()?),
            }
            match self.peek() {
                None => return Err(self.incomplete()),
                Some(Token::RBrace) => continue,
                Some(t) if t.is_terminator() => continue,
                Some(t) => return Err(self.unexpected(t)),
            }
        }
    }

    fn condition(&mut self) -> Result<Expression> {
        self.expect(Token::LParen)?;
        self.parenthesized()
    }

    /// The rest of a parenthesized expression, after its `(`.
    fn parenthesized(&mut self) -> Result<Expression> {
        self.parens += 1;
        let expr = self.expression()?;
        self.expect(Token::RParen)?;
        self.parens -= 1;
        Ok(expr)
    }

    fn expression(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser, precedence: usize) -> Result<Expression> {
            this.nested(|this| {
                let mut lhs = this.primary()?;
                while let Some(Token::Operator(op)) = this.peek() {
                    let op_precedence = match Expression::op_precedence(op) {
                        Some(p) if p >= precedence => p,
                        _ => break,
                    };
                    this.next();
                    let rhs = if Expression::is_right_assoc(op) {
                        parse(this, op_precedence)?
                    } else {
                        parse(this, op_precedence + 1)?
                    };
                    lhs = Expression::for_binary_op(op, lhs, rhs);
                }
                Ok(lhs)
            })
        }
        parse(self, 0)
    }

    fn primary(&mut self) -> Result<Expression> {
        self.nested(Self::operand)
    }

    fn operand(&mut self) -> Result<Expression> {
        match self.next() {
            None => Err(self.incomplete()),
            Some(Token::Number(n)) => Ok(Expression::Number(*n)),
            Some(Token::LParen) => self.parenthesized(),
            Some(Token::Operator(Operator::Minus)) => {
                let expr = self.unary_operand()?;
                Ok(Expression::Negation(Box::new(expr)))
            }
            Some(Token::Operator(Operator::Not)) => {
                let expr = self.unary_operand()?;
                Ok(Expression::Not(Box::new(expr)))
            }
            Some(Token::Ident(name)) => {
                let name: Rc<str> = name.as_str().into();
                match self.peek() {
                    Some(Token::Operator(op)) if op.is_assignment() => {
                        let op = *op;
                        self.next();
                        let rhs = Box::new(self.expression()?);
                        Ok(Expression::for_assignment(op, name, rhs))
                    }
                    Some(Token::LParen) => {
                        self.next();
                        let arg = self.parenthesized()?;
                        Ok(Expression::Call(name, Box::new(arg)))
                    }
                    _ => Ok(Expression::Var(name)),
                }
            }
            Some(t) => Err(self.rejected(t)),
        }
    }

    fn unary_operand(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser) -> Result<Expression> {
            this.nested(|this| {
                let mut lhs = this.primary()?;
                while let Some(Token::Operator(Operator::Caret)) = this.peek() {
                    this.next();
                    let rhs = parse(this)?;
                    lhs = Expression::Power(Box::new(lhs), Box::new(rhs));
                }
                Ok(lhs)
            })
        }
        parse(self)
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        match self.next() {
            Some(t) if *t == token => Ok(()),
            Some(t) => Err(self.rejected(t)),
            None => Err(self.incomplete()),
        }
    }
}

impl Expression {
    fn for_binary_op(op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Caret => Expression::Power(lhs, rhs),
            Multiply => Expression::Multiply(lhs, rhs),
            Divide => Expression::Divide(lhs, rhs),
            Plus => Expression::Add(lhs, rhs),
            Minus => Expression::Subtract(lhs, rhs),
            Equal => Expression::Equal(lhs, rhs),
            NotEqual => Expression::NotEqual(lhs, rhs),
            Less => Expression::Less(lhs, rhs),
            LessEqual => Expression::LessEqual(lhs, rhs),
            Greater => Expression::Greater(lhs, rhs),
            GreaterEqual => Expression::GreaterEqual(lhs, rhs),
            And => Expression::And(lhs, rhs),
            Or => Expression::Or(lhs, rhs),
            Not | Assign | AddAssign | SubAssign | MulAssign | DivAssign => {
                unreachable!("not a binary operator: {}", op)
            }
        }
    }

    fn for_assignment(op: Operator, name: Rc<str>, rhs: Box<Expression>) -> Expression {
        use Operator::*;
        match op {
            AddAssign => Expression::AddAssign(name, rhs),
            SubAssign => Expression::SubAssign(name, rhs),
            MulAssign => Expression::MulAssign(name, rhs),
            DivAssign => Expression::DivAssign(name, rhs),
            _ => Expression::Assign(name, rhs),
        }
    }

    fn op_precedence(op: &Operator) -> Option<usize> {
        use Operator::*;
        match op {
            Or => Some(1),
            And => Some(2),
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => Some(3),
            Plus | Minus => Some(4),
            Multiply | Divide => Some(5),
            Caret => Some(7),
            Not | Assign | AddAssign | SubAssign | MulAssign | DivAssign => None,
        }
    }

    fn is_right_assoc(op: &Operator) -> bool {
        *op == Operator::Caret
    }
}
