use std::rc::Rc;

/// Every statement remembers the source line it started on so
/// runtime errors can be reported near it.
#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Expression(usize, Expression),
    Print(usize, Expression),
    While(usize, Expression, Box<Statement>),
    If(usize, Expression, Box<Statement>, Option<Box<Statement>>),
    Block(usize, Vec<Statement>),
}

impl Statement {
    pub fn line(&self) -> usize {
        use Statement::*;
        match self {
            Expression(line, ..) | Print(line, ..) | While(line, ..) | If(line, ..) => *line,
            Block(line, ..) => *line,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    Var(Rc<str>),
    Call(Rc<str>, Box<Expression>),
    Assign(Rc<str>, Box<Expression>),
    AddAssign(Rc<str>, Box<Expression>),
    SubAssign(Rc<str>, Box<Expression>),
    MulAssign(Rc<str>, Box<Expression>),
    DivAssign(Rc<str>, Box<Expression>),
    Negation(Box<Expression>),
    Not(Box<Expression>),
    Power(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Equal(Box<Expression>, Box<Expression>),
    NotEqual(Box<Expression>, Box<Expression>),
    Less(Box<Expression>, Box<Expression>),
    LessEqual(Box<Expression>, Box<Expression>),
    Greater(Box<Expression>, Box<Expression>),
    GreaterEqual(Box<Expression>, Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

impl Expression {
    /// Top-level assignments are not echoed; every other expression is.
    pub fn is_assignment(&self) -> bool {
        use Expression::*;
        matches!(
            self,
            Assign(..) | AddAssign(..) | SubAssign(..) | MulAssign(..) | DivAssign(..)
        )
    }
}
