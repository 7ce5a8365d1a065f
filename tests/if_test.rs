mod common;
use common::*;
use hoc::mach::Runtime;

#[test]
fn test_if_then() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "if (1) print 1"), "\t1\n");
    assert_eq!(exec(&mut r, "if (0) print 1"), "");
}

#[test]
fn test_if_else() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "if (2 > 1) print 1 else print 2"), "\t1\n");
    assert_eq!(exec(&mut r, "if (2 < 1) print 1 else print 2"), "\t2\n");
}

#[test]
fn test_if_block() {
    let mut r = Runtime::default();
    assert_eq!(
        exec(&mut r, "x = -4\nif (x < 0) {\n\tx = -x\n\tprint x\n}\nprint x * 2"),
        "\t4\n\t8\n"
    );
}

#[test]
fn test_else_if_chain() {
    let mut r = Runtime::default();
    let program = "
        if (n < 0) print -1
        else if (n == 0) print 0
        else print 1
    ";
    exec(&mut r, "n = 0");
    assert_eq!(exec(&mut r, program), "\t0\n");
    exec(&mut r, "n = 9");
    assert_eq!(exec(&mut r, program), "\t1\n");
    exec(&mut r, "n = -9");
    assert_eq!(exec(&mut r, program), "\t-1\n");
}

#[test]
fn test_dangling_else() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "if (1) if (0) print 1 else print 2"), "\t2\n");
    assert_eq!(exec(&mut r, "if (0) if (0) print 1 else print 2"), "");
}

#[test]
fn test_if_across_entries() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "if (1) {"), "...\n");
    assert_eq!(exec(&mut r, "print 5"), "...\n");
    assert_eq!(exec(&mut r, "}"), "\t5\n");
}
