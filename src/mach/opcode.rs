use super::{Address, Function, Symbol};

/// ## Virtual machine instruction set
///
/// The hoc virtual machine has no registers.
/// Every operation is performed on the stack.
///
/// For example: `x = 3 * y` compiles to
/// `[ConstPush(3), VarPush(y), Eval, Mul, VarPush(x), Assign, PopStack, Stop]`
///
/// Control flow cells carry their jump targets. The condition code of
/// `If` and `While` follows the cell inline and ends in its own `Stop`.
/// Targets are `None` until the compiler patches them.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Opcode {
    /// End of a code range; returns from `execute`.
    Stop,

    // *** Stack manipulation
    /// Push a value captured at compile time.
    ConstPush(f64),
    /// Push a reference to a symbol, not its value.
    VarPush(Symbol),
    /// Replace a symbol reference with its value.
    Eval,
    Assign,
    AddEq,
    SubEq,
    MulEq,
    DivEq,
    /// Discard the top of the stack.
    PopStack,

    // *** Expression operations
    Add,
    Sub,
    Mul,
    Divide,
    Negate,
    Power,
    Gt,
    Lt,
    Eq,
    Ge,
    Le,
    Ne,
    And,
    Or,
    Not,

    // *** Built-in functions and output
    Bltin(Function),
    Print,
    PrExpr,

    // *** Branch control
    While {
        body: Option<Address>,
        next: Option<Address>,
    },
    If {
        then: Option<Address>,
        otherwise: Option<Address>,
        next: Option<Address>,
    },
}

/// Operand layout of an opcode, used by the tracer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    None,
    Value,
    Symbol,
    Function,
    Addresses,
}

impl Opcode {
    pub fn name(&self) -> &'static str {
        self.info().0
    }

    pub fn operands(&self) -> Operands {
        self.info().1
    }

    fn info(&self) -> (&'static str, Operands) {
        use Opcode::*;
        match self {
            Stop => ("STOP", Operands::None),
            ConstPush(_) => ("constpush", Operands::Value),
            VarPush(_) => ("varpush", Operands::Symbol),
            Eval => ("eval", Operands::None),
            Assign => ("assign", Operands::None),
            AddEq => ("addeq", Operands::None),
            SubEq => ("subeq", Operands::None),
            MulEq => ("muleq", Operands::None),
            DivEq => ("diveq", Operands::None),
            PopStack => ("popstack", Operands::None),
            Add => ("add", Operands::None),
            Sub => ("sub", Operands::None),
            Mul => ("mul", Operands::None),
            Divide => ("divide", Operands::None),
            Negate => ("negate", Operands::None),
            Power => ("power", Operands::None),
            Gt => ("gt", Operands::None),
            Lt => ("lt", Operands::None),
            Eq => ("eq", Operands::None),
            Ge => ("ge", Operands::None),
            Le => ("le", Operands::None),
            Ne => ("ne", Operands::None),
            And => ("and", Operands::None),
            Or => ("or", Operands::None),
            Not => ("not", Operands::None),
            Bltin(_) => ("bltin", Operands::Function),
            Print => ("print", Operands::None),
            PrExpr => ("prexpr", Operands::None),
            While { .. } => ("whilecode", Operands::Addresses),
            If { .. } => ("ifcode", Operands::Addresses),
        }
    }

    /// Jump slots of a control flow cell, labelled, in frame order.
    pub fn addresses(&self) -> Vec<(&'static str, Option<Address>)> {
        match self {
            Opcode::While { body, next } => vec![("body", *body), ("next", *next)],
            Opcode::If {
                then,
                otherwise,
                next,
            } => vec![("then", *then), ("else", *otherwise), ("next", *next)],
            _ => vec![],
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            ConstPush(n) => write!(f, "{}({})", self.name(), n),
            VarPush(s) => write!(f, "{}(#{})", self.name(), s),
            Bltin(func) => write!(f, "{}({})", self.name(), func.name()),
            While { .. } | If { .. } => {
                let targets: Vec<String> = self
                    .addresses()
                    .iter()
                    .map(|(_, a)| match a {
                        Some(a) => a.to_string(),
                        None => "-1".to_string(),
                    })
                    .collect();
                write!(f, "{}[{}]", self.name(), targets.join(","))
            }
            _ => write!(f, "{}", self.name()),
        }
    }
}
