use crate::lang::{lex, parse};
use crate::mach::{Datum, Event, Opcode, Runtime};

mod session_test;

fn run(runtime: &mut Runtime, s: &str) -> String {
    let mut out = String::new();
    for event in runtime.enter(s) {
        match event {
            Event::Print(ps) => out.push_str(&ps),
            Event::Errors(errors) => {
                for error in errors.iter() {
                    out.push_str(&format!("{}\n", error));
                }
            }
            Event::Incomplete => out.push_str("...\n"),
        }
    }
    out
}

/// Loads hand-built cells and runs them from address zero.
fn exec_cells(runtime: &mut Runtime, ops: &[Opcode]) -> crate::lang::Error {
    match try_cells(runtime, ops) {
        Ok(()) => panic!("expected an error, stack is {:?}", runtime.stack()),
        Err(error) => error,
    }
}

fn try_cells(runtime: &mut Runtime, ops: &[Opcode]) -> Result<(), crate::lang::Error> {
    for op in ops {
        runtime.program_mut().emit(*op)?;
    }
    runtime.execute(0)
}

/// Evaluates an expression and leaves its value on the stack.
fn eval_expr(runtime: &mut Runtime, s: &str) -> Vec<Datum> {
    let statements = parse(1, &lex(s)).unwrap();
    let expr = match &statements[0] {
        crate::lang::ast::Statement::Expression(_, expr) => expr.clone(),
        other => panic!("not an expression: {:?}", other),
    };
    let start = runtime.compile_expression(&expr).unwrap();
    runtime.execute(start).unwrap();
    runtime.stack().as_slice().to_vec()
}
