use super::{Address, Kind, Opcode, Program, Slot, Symbol, SymbolTable};
use crate::error;
use crate::lang::ast::{Expression, Statement};
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Compile one top-level statement onto the end of `program` and
/// return the address execution starts at. The code ends in `Stop`.
pub fn compile(
    program: &mut Program,
    symbols: &mut SymbolTable,
    statement: &Statement,
) -> Result<Address> {
    let mut this = Compiler { program, symbols };
    let start = this.program.here();
    match statement {
        Statement::Expression(_, expr) => {
            this.expression(expr)?;
            if expr.is_assignment() {
                this.emit(Opcode::PopStack)?;
            } else {
                this.emit(Opcode::PrExpr)?;
            }
        }
        _ => this.statement(statement)?,
    }
    this.emit(Opcode::Stop)?;
    Ok(start)
}

/// Compile a bare expression, leaving its value on the stack.
pub fn compile_expression(
    program: &mut Program,
    symbols: &mut SymbolTable,
    expr: &Expression,
) -> Result<Address> {
    let mut this = Compiler { program, symbols };
    let start = this.program.here();
    this.expression(expr)?;
    this.emit(Opcode::Stop)?;
    Ok(start)
}

struct Compiler<'a> {
    program: &'a mut Program,
    symbols: &'a mut SymbolTable,
}

impl<'a> Compiler<'a> {
    fn emit(&mut self, op: Opcode) -> Result<Address> {
        self.program.emit(op)
    }

    /// Code for a nested block: the statement followed by `Stop`.
    fn block(&mut self, statement: &Statement) -> Result<Address> {
        let start = self.program.here();
        self.statement(statement)?;
        self.emit(Opcode::Stop)?;
        Ok(start)
    }

    /// Condition code inline after a control flow cell.
    fn condition(&mut self, cond: &Expression) -> Result<()> {
        self.expression(cond)?;
        self.emit(Opcode::Stop)?;
        Ok(())
    }

    fn statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Expression(_, expr) => {
                self.expression(expr)?;
                self.emit(Opcode::PopStack)?;
            }
            Statement::Print(_, expr) => {
                self.expression(expr)?;
                self.emit(Opcode::Print)?;
            }
            Statement::Block(_, statements) => {
                for statement in statements {
                    self.statement(statement)?;
                }
            }
            Statement::While(_, cond, body) => {
                let addr = self.emit(Opcode::While {
                    body: None,
                    next: None,
                })?;
                self.condition(cond)?;
                let body = self.block(body)?;
                self.program.patch(addr, Slot::Body, body)?;
                let next = self.program.here();
                self.program.patch(addr, Slot::Next, next)?;
            }
            Statement::If(_, cond, then, otherwise) => {
                let addr = self.emit(Opcode::If {
                    then: None,
                    otherwise: None,
                    next: None,
                })?;
                self.condition(cond)?;
                let then = self.block(then)?;
                self.program.patch(addr, Slot::Then, then)?;
                if let Some(otherwise) = otherwise {
                    let otherwise = self.block(otherwise)?;
                    self.program.patch(addr, Slot::Else, otherwise)?;
                }
                let next = self.program.here();
                self.program.patch(addr, Slot::Next, next)?;
            }
        }
        Ok(())
    }

    /// Looks up `name`, installing it as undefined on first sight.
    fn symbol(&mut self, name: &str) -> Symbol {
        match self.symbols.lookup(name) {
            Some(sym) => sym,
            None => self.symbols.install(name, Kind::Undefined),
        }
    }

    fn assignment(&mut self, name: &str, rhs: &Expression, op: Opcode) -> Result<()> {
        self.expression(rhs)?;
        let sym = self.symbol(name);
        self.emit(Opcode::VarPush(sym))?;
        self.emit(op)?;
        Ok(())
    }

    fn binary(&mut self, lhs: &Expression, rhs: &Expression, op: Opcode) -> Result<()> {
        self.expression(lhs)?;
        self.expression(rhs)?;
        self.emit(op)?;
        Ok(())
    }

    fn expression(&mut self, expr: &Expression) -> Result<()> {
        use Expression::*;
        match expr {
            Number(n) => {
                self.emit(Opcode::ConstPush(*n))?;
            }
            Var(name) => {
                let sym = self.symbol(name);
                match self.symbols.get(sym)?.kind() {
                    Kind::Constant(n) => {
                        self.emit(Opcode::ConstPush(n))?;
                    }
                    Kind::Builtin(_) => {
                        return Err(error!(SyntaxError; &format!("{} is a function", name)));
                    }
                    Kind::Variable(_) | Kind::Undefined => {
                        self.emit(Opcode::VarPush(sym))?;
                        self.emit(Opcode::Eval)?;
                    }
                }
            }
            Call(name, arg) => {
                let func = match self.symbols.lookup(name) {
                    Some(sym) => match self.symbols.get(sym)?.kind() {
                        Kind::Builtin(func) => Some(func),
                        _ => None,
                    },
                    None => None,
                };
                match func {
                    Some(func) => {
                        self.expression(arg)?;
                        self.emit(Opcode::Bltin(func))?;
                    }
                    None => {
                        return Err(error!(SyntaxError; &format!("{} is not a function", name)));
                    }
                }
            }
            Assign(name, rhs) => self.assignment(name, rhs, Opcode::Assign)?,
            AddAssign(name, rhs) => self.assignment(name, rhs, Opcode::AddEq)?,
            SubAssign(name, rhs) => self.assignment(name, rhs, Opcode::SubEq)?,
            MulAssign(name, rhs) => self.assignment(name, rhs, Opcode::MulEq)?,
            DivAssign(name, rhs) => self.assignment(name, rhs, Opcode::DivEq)?,
            Negation(expr) => {
                self.expression(expr)?;
                self.emit(Opcode::Negate)?;
            }
            Not(expr) => {
                self.expression(expr)?;
                self.emit(Opcode::Not)?;
            }
            Power(lhs, rhs) => self.binary(lhs, rhs, Opcode::Power)?,
            Multiply(lhs, rhs) => self.binary(lhs, rhs, Opcode::Mul)?,
            Divide(lhs, rhs) => self.binary(lhs, rhs, Opcode::Divide)?,
            Add(lhs, rhs) => self.binary(lhs, rhs, Opcode::Add)?,
            Subtract(lhs, rhs) => self.binary(lhs, rhs, Opcode::Sub)?,
            Equal(lhs, rhs) => self.binary(lhs, rhs, Opcode::Eq)?,
            NotEqual(lhs, rhs) => self.binary(lhs, rhs, Opcode::Ne)?,
            Less(lhs, rhs) => self.binary(lhs, rhs, Opcode::Lt)?,
            LessEqual(lhs, rhs) => self.binary(lhs, rhs, Opcode::Le)?,
            Greater(lhs, rhs) => self.binary(lhs, rhs, Opcode::Gt)?,
            GreaterEqual(lhs, rhs) => self.binary(lhs, rhs, Opcode::Ge)?,
            And(lhs, rhs) => self.binary(lhs, rhs, Opcode::And)?,
            Or(lhs, rhs) => self.binary(lhs, rhs, Opcode::Or)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{lex, parse, ErrorCode};

    fn compile_str(s: &str) -> Result<(Program, SymbolTable)> {
        let mut program = Program::new(1024);
        let mut symbols = SymbolTable::with_builtins();
        let statements = parse(1, &lex(s))?;
        for statement in &statements {
            compile(&mut program, &mut symbols, statement)?;
        }
        Ok((program, symbols))
    }

    #[test]
    fn test_expression_layout() {
        let (program, _) = compile_str("2+3*4").unwrap();
        assert_eq!(
            program.ops(),
            &[
                Opcode::ConstPush(2.0),
                Opcode::ConstPush(3.0),
                Opcode::ConstPush(4.0),
                Opcode::Mul,
                Opcode::Add,
                Opcode::PrExpr,
                Opcode::Stop,
            ]
        );
    }

    #[test]
    fn test_assignment_layout() {
        let (program, symbols) = compile_str("x = 5").unwrap();
        let x = symbols.lookup("x").unwrap();
        assert_eq!(
            program.ops(),
            &[
                Opcode::ConstPush(5.0),
                Opcode::VarPush(x),
                Opcode::Assign,
                Opcode::PopStack,
                Opcode::Stop,
            ]
        );
    }

    #[test]
    fn test_if_else_layout() {
        let (program, _) = compile_str("if (1) print 2 else print 3").unwrap();
        assert_eq!(
            program.ops(),
            &[
                Opcode::If {
                    then: Some(3),
                    otherwise: Some(6),
                    next: Some(9),
                },
                Opcode::ConstPush(1.0),
                Opcode::Stop,
                Opcode::ConstPush(2.0),
                Opcode::Print,
                Opcode::Stop,
                Opcode::ConstPush(3.0),
                Opcode::Print,
                Opcode::Stop,
                Opcode::Stop,
            ]
        );
    }

    #[test]
    fn test_while_layout() {
        let (program, symbols) = compile_str("while (i) i -= 1").unwrap();
        let i = symbols.lookup("i").unwrap();
        assert_eq!(
            program.ops(),
            &[
                Opcode::While {
                    body: Some(4),
                    next: Some(9),
                },
                Opcode::VarPush(i),
                Opcode::Eval,
                Opcode::Stop,
                Opcode::ConstPush(1.0),
                Opcode::VarPush(i),
                Opcode::SubEq,
                Opcode::PopStack,
                Opcode::Stop,
                Opcode::Stop,
            ]
        );
    }

    #[test]
    fn test_nested_patches_are_independent() {
        let (program, _) = compile_str("while (a) { if (b) c = 1 }").unwrap();
        match program.ops()[0] {
            Opcode::While {
                body: Some(body),
                next: Some(next),
            } => {
                assert_eq!(body, 4);
                assert_eq!(next, program.len() - 1);
                match program.ops()[body] {
                    Opcode::If {
                        then: Some(_),
                        otherwise: None,
                        next: Some(inner),
                    } => assert!(inner < next),
                    other => panic!("{:?}", other),
                }
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_constant_is_copied() {
        let (program, _) = compile_str("PI").unwrap();
        assert_eq!(program.ops()[0], Opcode::ConstPush(std::f64::consts::PI));
    }

    #[test]
    fn test_builtin_call() {
        let (program, symbols) = compile_str("sqrt(4)").unwrap();
        let sym = symbols.lookup("sqrt").unwrap();
        match symbols.get(sym).unwrap().kind() {
            Kind::Builtin(f) => assert_eq!(program.ops()[1], Opcode::Bltin(f)),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_compile_errors() {
        assert_eq!(
            compile_str("foo(1)").unwrap_err().code(),
            ErrorCode::SyntaxError
        );
        assert_eq!(compile_str("sin + 1").unwrap_err().code(), ErrorCode::SyntaxError);
    }

    #[test]
    fn test_program_too_big() {
        let mut program = Program::new(4);
        let mut symbols = SymbolTable::new();
        let statements = parse(1, &lex("1+2+3")).unwrap();
        assert_eq!(
            compile(&mut program, &mut symbols, &statements[0])
                .unwrap_err()
                .code(),
            ErrorCode::ProgramTooBig
        );
    }
}
