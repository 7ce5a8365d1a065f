#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Number(f64),
    Ident(String),
    Word(Word),
    Operator(Operator),
    LParen,
    RParen,
    LBrace,
    RBrace,
    Newline,
    Semicolon,
}

impl Token {
    /// Newlines and semicolons both end a statement.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Token::Newline | Token::Semicolon)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Number(n) => write!(f, "{}", n),
            Ident(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            LBrace => write!(f, "{{"),
            RBrace => write!(f, "}}"),
            Newline => writeln!(f),
            Semicolon => write!(f, ";"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Word {
    Else,
    If,
    Print,
    While,
}

impl Word {
    pub fn from_str(s: &str) -> Option<Word> {
        use Word::*;
        match s {
            "else" => Some(Else),
            "if" => Some(If),
            "print" => Some(Print),
            "while" => Some(While),
            _ => None,
        }
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Else => write!(f, "else"),
            If => write!(f, "if"),
            Print => write!(f, "print"),
            While => write!(f, "while"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

impl Operator {
    pub fn from_str(s: &str) -> Option<Operator> {
        use Operator::*;
        match s {
            "^" => Some(Caret),
            "*" => Some(Multiply),
            "/" => Some(Divide),
            "+" => Some(Plus),
            "-" => Some(Minus),
            "==" => Some(Equal),
            "!=" => Some(NotEqual),
            "<" => Some(Less),
            "<=" => Some(LessEqual),
            ">" => Some(Greater),
            ">=" => Some(GreaterEqual),
            "!" => Some(Not),
            "&&" => Some(And),
            "||" => Some(Or),
            "=" => Some(Assign),
            "+=" => Some(AddAssign),
            "-=" => Some(SubAssign),
            "*=" => Some(MulAssign),
            "/=" => Some(DivAssign),
            _ => None,
        }
    }

    pub fn is_assignment(self) -> bool {
        use Operator::*;
        matches!(self, Assign | AddAssign | SubAssign | MulAssign | DivAssign)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "=="),
            NotEqual => write!(f, "!="),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            Not => write!(f, "!"),
            And => write!(f, "&&"),
            Or => write!(f, "||"),
            Assign => write!(f, "="),
            AddAssign => write!(f, "+="),
            SubAssign => write!(f, "-="),
            MulAssign => write!(f, "*="),
            DivAssign => write!(f, "/="),
        }
    }
}
