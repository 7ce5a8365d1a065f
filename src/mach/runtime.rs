use super::val::format_number;
use super::{compile, compile_expression};
use super::{Address, Datum, Kind, Opcode, Operation, Program, Stack, SymbolTable, Tracer};
use crate::error;
use crate::lang::ast::{Expression, Statement};
use crate::lang::{lex, parse, Error, ErrorCode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

/// Resource limits and diagnostics for one `Runtime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub stack_limit: usize,
    pub program_limit: usize,
    pub trace: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stack_limit: u16::MAX as usize,
            program_limit: u16::MAX as usize,
            trace: false,
        }
    }
}

/// Events are used to communicate with the terminal front end.
#[derive(Debug, PartialEq)]
pub enum Event {
    Print(String),
    Errors(Vec<Error>),
    Incomplete,
}

/// ## Virtual machine
///
/// One interactive session. Each top-level statement is compiled onto a
/// fresh program buffer, run from its start to `Stop`, then discarded.
/// Variables live on in the symbol table between statements.

pub struct Runtime {
    config: Config,
    pending: String,
    line: usize,
    program: Program,
    stack: Stack<Datum>,
    symbols: SymbolTable,
    output: String,
    tracer: Option<Tracer>,
    interrupted: Arc<AtomicBool>,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::with_config(Config::default())
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .field("line", &self.line)
            .field("stack", &self.stack)
            .finish()
    }
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime::default()
    }

    pub fn with_config(config: Config) -> Runtime {
        Runtime {
            config,
            pending: String::new(),
            line: 0,
            program: Program::new(config.program_limit),
            stack: Stack::new(config.stack_limit),
            symbols: SymbolTable::with_builtins(),
            output: String::new(),
            tracer: if config.trace {
                Some(Tracer::stderr())
            } else {
                None
            },
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Enter source text, one or more lines. Text that ends in the middle
    /// of a statement is held until the rest arrives.
    pub fn enter(&mut self, s: &str) -> Vec<Event> {
        self.pending.push_str(s);
        if !self.pending.ends_with('\n') {
            self.pending.push('\n');
        }
        let statements = match parse(self.line + 1, &lex(&self.pending)) {
            Ok(statements) => statements,
            Err(error) if error.code() == ErrorCode::Incomplete => {
                return vec![Event::Incomplete];
            }
            Err(error) => {
                self.consume_pending();
                return vec![Event::Errors(vec![error])];
            }
        };
        self.consume_pending();
        let mut events = vec![];
        for statement in &statements {
            let result = self.run(statement);
            if !self.output.is_empty() {
                events.push(Event::Print(std::mem::take(&mut self.output)));
            }
            if let Err(error) = result {
                let error = error.in_line_number(Some(statement.line()));
                events.push(Event::Errors(vec![error]));
            }
            self.reset();
        }
        events
    }

    /// Ctrl-C. Drops any half-entered statement.
    pub fn interrupt(&mut self) {
        self.pending.clear();
        self.interrupted.store(false, Ordering::SeqCst);
    }

    /// Setting the flag stops the innermost running loop with
    /// an `Interrupted` error. Safe to use from a signal handler thread.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut Program {
        &mut self.program
    }

    pub fn stack(&self) -> &Stack<Datum> {
        &self.stack
    }

    pub fn set_tracer(&mut self, tracer: Option<Tracer>) {
        self.tracer = tracer;
    }

    /// Clears the stack and program buffer. Symbols are kept.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.program.reset();
    }

    /// Compile a top-level statement onto the program buffer.
    pub fn compile(&mut self, statement: &Statement) -> Result<Address> {
        compile(&mut self.program, &mut self.symbols, statement)
    }

    /// Compile an expression whose value is left on the stack.
    pub fn compile_expression(&mut self, expr: &Expression) -> Result<Address> {
        compile_expression(&mut self.program, &mut self.symbols, expr)
    }

    fn run(&mut self, statement: &Statement) -> Result<()> {
        let start = self.compile(statement)?;
        self.execute(start)
    }

    fn consume_pending(&mut self) {
        self.line += self.pending.matches('\n').count();
        self.pending.clear();
    }

    /// Run cells from `start` until a `Stop`. Nested blocks recurse.
    pub fn execute(&mut self, start: Address) -> Result<()> {
        let mut pc = start;
        loop {
            let op = *self.program.get(pc)?;
            if op != Opcode::Stop {
                if let Some(tracer) = &mut self.tracer {
                    tracer.trace(pc, &op, &self.symbols);
                }
            }
            let addr = pc;
            pc += 1;
            match op {
                Opcode::Stop => return Ok(()),
                Opcode::ConstPush(n) => self.stack.push(Datum::Val(n))?,
                Opcode::VarPush(sym) => self.stack.push(Datum::Sym(sym))?,
                Opcode::Eval => self.eval()?,
                Opcode::Assign => self.assign()?,
                Opcode::AddEq => self.compound(|l, r| Ok(Operation::sum(l, r)))?,
                Opcode::SubEq => self.compound(|l, r| Ok(Operation::subtract(l, r)))?,
                Opcode::MulEq => self.compound(|l, r| Ok(Operation::multiply(l, r)))?,
                Opcode::DivEq => self.compound(Operation::divide)?,
                Opcode::PopStack => {
                    self.stack.pop()?;
                }
                Opcode::Add => self.binary(Operation::sum)?,
                Opcode::Sub => self.binary(Operation::subtract)?,
                Opcode::Mul => self.binary(Operation::multiply)?,
                Opcode::Divide => {
                    let (lhs, rhs) = self.pop_vals()?;
                    self.stack.push(Datum::Val(Operation::divide(lhs, rhs)?))?;
                }
                Opcode::Power => self.binary(Operation::power)?,
                Opcode::Negate => self.unary(Operation::negate)?,
                Opcode::Gt => self.binary(Operation::greater)?,
                Opcode::Lt => self.binary(Operation::less)?,
                Opcode::Eq => self.binary(Operation::equal)?,
                Opcode::Ge => self.binary(Operation::greater_equal)?,
                Opcode::Le => self.binary(Operation::less_equal)?,
                Opcode::Ne => self.binary(Operation::not_equal)?,
                Opcode::And => self.binary(Operation::and)?,
                Opcode::Or => self.binary(Operation::or)?,
                Opcode::Not => self.unary(Operation::not)?,
                Opcode::Bltin(func) => {
                    let val = self.stack.pop()?.val()?;
                    self.stack.push(Datum::Val(func.call(val)?))?;
                }
                Opcode::Print => {
                    let val = self.stack.pop()?.val()?;
                    self.output.push_str(&format!("\t{}\n", format_number(val)));
                }
                Opcode::PrExpr => {
                    let val = self.stack.pop()?.val()?;
                    self.output.push_str(&format!("{}\n", format_number(val)));
                }
                Opcode::While { body, next } => {
                    pc = self.while_code(addr, body, next)?;
                }
                Opcode::If {
                    then,
                    otherwise,
                    next,
                } => {
                    pc = self.if_code(addr, then, otherwise, next)?;
                }
            }
        }
    }

    fn while_code(
        &mut self,
        addr: Address,
        body: Option<Address>,
        next: Option<Address>,
    ) -> Result<Address> {
        let body = unpatched(body)?;
        let next = unpatched(next)?;
        loop {
            self.execute(addr + 1)?;
            if self.stack.pop()?.val()? == 0.0 {
                break;
            }
            if self.interrupted.swap(false, Ordering::SeqCst) {
                return Err(error!(Interrupted));
            }
            self.execute(body)?;
        }
        Ok(next)
    }

    fn if_code(
        &mut self,
        addr: Address,
        then: Option<Address>,
        otherwise: Option<Address>,
        next: Option<Address>,
    ) -> Result<Address> {
        let then = unpatched(then)?;
        let next = unpatched(next)?;
        self.execute(addr + 1)?;
        if self.stack.pop()?.val()? != 0.0 {
            self.execute(then)?;
        } else if let Some(otherwise) = otherwise {
            self.execute(otherwise)?;
        }
        Ok(next)
    }

    fn eval(&mut self) -> Result<()> {
        let sym = self.stack.pop()?.sym()?;
        let entry = self.symbols.get(sym)?;
        match entry.kind() {
            Kind::Variable(n) | Kind::Constant(n) => self.stack.push(Datum::Val(n)),
            Kind::Undefined | Kind::Builtin(_) => {
                Err(error!(UndefinedVariable; entry.name()))
            }
        }
    }

    fn assign(&mut self) -> Result<()> {
        let sym = self.stack.pop()?.sym()?;
        let val = self.stack.pop()?.val()?;
        let entry = self.symbols.get_mut(sym)?;
        match entry.kind() {
            Kind::Variable(_) | Kind::Undefined => entry.set(Kind::Variable(val)),
            Kind::Constant(_) | Kind::Builtin(_) => {
                return Err(error!(AssignToNonVariable; entry.name()));
            }
        }
        self.stack.push(Datum::Val(val))
    }

    fn compound<F>(&mut self, op: F) -> Result<()>
    where
        F: Fn(f64, f64) -> Result<f64>,
    {
        let sym = self.stack.pop()?.sym()?;
        let val = self.stack.pop()?.val()?;
        let entry = self.symbols.get_mut(sym)?;
        let current = match entry.kind() {
            Kind::Variable(n) => n,
            _ => return Err(error!(CompoundAssignToUndefined; entry.name())),
        };
        let val = op(current, val)?;
        entry.set(Kind::Variable(val));
        self.stack.push(Datum::Val(val))
    }

    fn pop_vals(&mut self) -> Result<(f64, f64)> {
        let (lhs, rhs) = self.stack.pop_2()?;
        Ok((lhs.val()?, rhs.val()?))
    }

    fn binary(&mut self, op: fn(f64, f64) -> f64) -> Result<()> {
        let (lhs, rhs) = self.pop_vals()?;
        self.stack.push(Datum::Val(op(lhs, rhs)))
    }

    fn unary(&mut self, op: fn(f64) -> f64) -> Result<()> {
        let val = self.stack.pop()?.val()?;
        self.stack.push(Datum::Val(op(val)))
    }
}

fn unpatched(addr: Option<Address>) -> Result<Address> {
    addr.ok_or_else(|| error!(InternalError; "jump target never patched"))
}
