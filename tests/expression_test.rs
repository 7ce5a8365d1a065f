mod common;
use common::*;
use hoc::mach::Runtime;

#[test]
fn test_precedence() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "1+2*3"), "7\n");
    assert_eq!(exec(&mut r, "(1+2)*3"), "9\n");
    assert_eq!(exec(&mut r, "2*3^2"), "18\n");
}

#[test]
fn test_left_assoc() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "1.5/2*3"), "2.25\n");
    assert_eq!(exec(&mut r, "1.5/(2.0*3)"), "0.25\n");
    assert_eq!(exec(&mut r, "8-2-1"), "5\n");
}

#[test]
fn test_power_right_assoc() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "2^3^2"), "512\n");
    assert_eq!(exec(&mut r, "(2^3)^2"), "64\n");
}

#[test]
fn test_unary() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "-3+5"), "2\n");
    assert_eq!(exec(&mut r, "--3"), "3\n");
    assert_eq!(exec(&mut r, "!0"), "1\n");
    assert_eq!(exec(&mut r, "!-2"), "0\n");
}

#[test]
fn test_relational() {
    let mut r = Runtime::default();
    assert_eq!(
        exec(&mut r, "1<2; 2<1; 2<=2; 3>=4; 5==5; 5!=5; 3>2"),
        "1\n0\n1\n0\n1\n0\n1\n"
    );
    assert_eq!(exec(&mut r, "0.1+0.2 == 0.3"), "0\n");
}

#[test]
fn test_logical() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "2 && 3; 2 && 0; 0 || 0; 0 || -1"), "1\n0\n0\n1\n");
    assert_eq!(exec(&mut r, "1 || 0 && 0"), "1\n");
}

#[test]
fn test_number_format() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "1/3"), "0.33333333\n");
    assert_eq!(exec(&mut r, "123456789"), "1.2345679e+08\n");
    assert_eq!(exec(&mut r, "0.0001"), "0.0001\n");
    assert_eq!(exec(&mut r, "0.00001"), "1e-05\n");
    assert_eq!(exec(&mut r, "1e3"), "1000\n");
    assert_eq!(exec(&mut r, ".5"), "0.5\n");
}

#[test]
fn test_assignment() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "x = 5"), "");
    assert_eq!(exec(&mut r, "x += 3"), "");
    assert_eq!(exec(&mut r, "print x"), "\t8\n");
    assert_eq!(exec(&mut r, "x -= 1; x *= 2; x /= 7; x"), "2\n");
}

#[test]
fn test_assignment_is_an_expression() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "a = b = 4"), "");
    assert_eq!(exec(&mut r, "a + b"), "8\n");
    assert_eq!(exec(&mut r, "(c = 3) * 2"), "6\n");
    assert_eq!(exec(&mut r, "c"), "3\n");
}

#[test]
fn test_comments_and_whitespace() {
    let mut r = Runtime::default();
    assert_eq!(exec(&mut r, "  1 +\t2   # three"), "3\n");
    assert_eq!(exec(&mut r, "# nothing here"), "");
}
