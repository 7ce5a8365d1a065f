use super::*;
use crate::lang::ErrorCode;
use crate::mach::Kind;

#[test]
fn test_assign_then_print() {
    let mut r = Runtime::default();
    assert_eq!(run(&mut r, "x = 5"), "");
    assert_eq!(run(&mut r, "x += 3"), "");
    assert_eq!(run(&mut r, "print x"), "\t8\n");
}

#[test]
fn test_implicit_expression_output() {
    let mut r = Runtime::default();
    assert_eq!(run(&mut r, "2 + 3 * 4"), "14\n");
    assert_eq!(run(&mut r, "1 / 3"), "0.33333333\n");
    assert_eq!(run(&mut r, "2 ^ 40"), "1.0995116e+12\n");
}

#[test]
fn test_recovers_after_error() {
    let mut r = Runtime::default();
    assert_eq!(run(&mut r, "1 / 0"), "division by zero near line 1\n");
    assert!(r.stack().is_empty());
    assert!(r.program().is_empty());
    assert_eq!(run(&mut r, "1 + 1"), "2\n");
}

#[test]
fn test_error_line_numbers() {
    let mut r = Runtime::default();
    run(&mut r, "x = 1\n\n");
    assert_eq!(run(&mut r, "y"), "undefined variable y near line 3\n");
}

#[test]
fn test_later_statements_still_run() {
    let mut r = Runtime::default();
    assert_eq!(
        run(&mut r, "q; print 7"),
        "undefined variable q near line 1\n\t7\n"
    );
}

#[test]
fn test_constant_captured_at_compile_time() {
    let mut r = Runtime::default();
    let statements = parse(1, &lex("PI * 2")).unwrap();
    let expr = match &statements[0] {
        crate::lang::ast::Statement::Expression(_, expr) => expr.clone(),
        other => panic!("{:?}", other),
    };
    let start = r.compile_expression(&expr).unwrap();
    r.symbols_mut().install("PI", Kind::Constant(3.0));
    r.execute(start).unwrap();
    assert_eq!(
        r.stack().as_slice(),
        &[Datum::Val(std::f64::consts::PI * 2.0)]
    );
}

#[test]
fn test_constants_are_read_only() {
    let mut r = Runtime::default();
    assert_eq!(
        run(&mut r, "E = 2"),
        "assignment to non-variable E near line 1\n"
    );
    assert_eq!(run(&mut r, "E"), "2.7182818\n");
}

#[test]
fn test_no_short_circuit() {
    let mut r = Runtime::default();
    assert_eq!(run(&mut r, "b = 0\n0 && (b = 1)\nb"), "0\n1\n");
    assert_eq!(run(&mut r, "1 || (b = 2)\nb"), "1\n2\n");
}

#[test]
fn test_compound_on_undefined() {
    let mut r = Runtime::default();
    assert_eq!(
        run(&mut r, "z *= 2"),
        "compound assignment to undefined variable z near line 1\n"
    );
    assert_eq!(r.symbols().get(r.symbols().lookup("z").unwrap()).unwrap().kind(), Kind::Undefined);
}

#[test]
fn test_incomplete_input() {
    let mut r = Runtime::default();
    assert_eq!(r.enter("{ x = 1"), vec![Event::Incomplete]);
    assert!(r.is_pending());
    assert_eq!(run(&mut r, "print x }"), "\t1\n");
    assert!(!r.is_pending());
}

#[test]
fn test_interrupt_drops_pending() {
    let mut r = Runtime::default();
    assert_eq!(r.enter("while (1) {"), vec![Event::Incomplete]);
    r.interrupt();
    assert!(!r.is_pending());
    assert_eq!(run(&mut r, "3"), "3\n");
}

#[test]
fn test_syntax_error() {
    let mut r = Runtime::default();
    match r.enter("1 + * 2").as_slice() {
        [Event::Errors(errors)] => assert_eq!(errors[0].code(), ErrorCode::SyntaxError),
        other => panic!("{:?}", other),
    }
    assert!(!r.is_pending());
    assert_eq!(run(&mut r, "4"), "4\n");
}

#[test]
fn test_builtins() {
    let mut r = Runtime::default();
    assert_eq!(run(&mut r, "sqrt(16)"), "4\n");
    assert_eq!(run(&mut r, "int(-2.7)"), "-2\n");
    assert_eq!(run(&mut r, "log(0)"), "result out of range in log near line 1\n");
    assert_eq!(run(&mut r, "x = rand(0)\nx >= 0 && x < 1"), "1\n");
}

#[test]
fn test_program_too_big() {
    let mut r = Runtime::with_config(crate::mach::Config {
        program_limit: 8,
        ..Default::default()
    });
    assert_eq!(
        run(&mut r, "1+2+3+4+5+6"),
        "program too big near line 1\n"
    );
    assert_eq!(run(&mut r, "1+2"), "3\n");
}

#[derive(Clone, Default)]
struct Capture(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

impl std::io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_tracer_follows_execution() {
    let mut r = Runtime::default();
    let capture = Capture::default();
    r.set_tracer(Some(crate::mach::Tracer::new(Box::new(capture.clone()))));
    assert_eq!(run(&mut r, "if (1) print 2"), "\t2\n");
    let trace = String::from_utf8(capture.0.borrow().clone()).unwrap();
    let expected = "[0000] ifcode       [3,-1,6]\n\
                    [0000]   <then>     -> 3\n\
                    [0000]   <else>     -> -1\n\
                    [0000]   <next>     -> 6\n\
                    [0001] constpush    val=1\n\
                    [0003] constpush    val=2\n\
                    [0004] print\n";
    assert_eq!(trace, expected);
    r.set_tracer(None);
    run(&mut r, "1");
    assert_eq!(capture.0.borrow().len(), expected.len());
}

#[test]
fn test_newline_inside_parens_continues() {
    let mut r = Runtime::default();
    assert_eq!(r.enter("x = (1"), vec![Event::Incomplete]);
    assert_eq!(r.enter("+ 2)"), vec![]);
    assert_eq!(run(&mut r, "x"), "3\n");
    assert_eq!(r.enter("while ("), vec![Event::Incomplete]);
    r.interrupt();
    assert_eq!(r.enter("print (2 +"), vec![Event::Incomplete]);
    assert_eq!(run(&mut r, "3)"), "\t5\n");
}

#[test]
fn test_deep_nesting_is_an_error() {
    let mut r = Runtime::default();
    let deep = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
    match r.enter(&deep).as_slice() {
        [Event::Errors(errors)] => assert_eq!(errors[0].code(), ErrorCode::SyntaxError),
        other => panic!("{:?}", other),
    }
    let nested = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(run(&mut r, &nested), "1\n");
}
