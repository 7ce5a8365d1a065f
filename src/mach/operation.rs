use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Arithmetic on the single numeric type. Relational and logical
/// operations answer 1.0 for true and 0.0 for false.
pub struct Operation {}

fn truth(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

impl Operation {
    pub fn negate(val: f64) -> f64 {
        -val
    }

    pub fn sum(lhs: f64, rhs: f64) -> f64 {
        lhs + rhs
    }

    pub fn subtract(lhs: f64, rhs: f64) -> f64 {
        lhs - rhs
    }

    pub fn multiply(lhs: f64, rhs: f64) -> f64 {
        lhs * rhs
    }

    pub fn divide(lhs: f64, rhs: f64) -> Result<f64> {
        if rhs == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Ok(lhs / rhs)
    }

    pub fn power(lhs: f64, rhs: f64) -> f64 {
        lhs.powf(rhs)
    }

    pub fn greater(lhs: f64, rhs: f64) -> f64 {
        truth(lhs > rhs)
    }

    pub fn less(lhs: f64, rhs: f64) -> f64 {
        truth(lhs < rhs)
    }

    pub fn equal(lhs: f64, rhs: f64) -> f64 {
        truth(lhs == rhs)
    }

    pub fn greater_equal(lhs: f64, rhs: f64) -> f64 {
        truth(lhs >= rhs)
    }

    pub fn less_equal(lhs: f64, rhs: f64) -> f64 {
        truth(lhs <= rhs)
    }

    pub fn not_equal(lhs: f64, rhs: f64) -> f64 {
        truth(lhs != rhs)
    }

    pub fn and(lhs: f64, rhs: f64) -> f64 {
        truth(lhs != 0.0 && rhs != 0.0)
    }

    pub fn or(lhs: f64, rhs: f64) -> f64 {
        truth(lhs != 0.0 || rhs != 0.0)
    }

    pub fn not(val: f64) -> f64 {
        truth(val == 0.0)
    }
}
