use super::Symbol;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// One operand stack cell. Which shape is expected is decided by the
/// instruction consuming it; a mismatch means the compiler emitted bad code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Datum {
    Val(f64),
    Sym(Symbol),
}

impl Datum {
    pub fn val(self) -> Result<f64> {
        match self {
            Datum::Val(n) => Ok(n),
            Datum::Sym(_) => Err(error!(InternalError; "expected value, found symbol")),
        }
    }

    pub fn sym(self) -> Result<Symbol> {
        match self {
            Datum::Sym(s) => Ok(s),
            Datum::Val(_) => Err(error!(InternalError; "expected symbol, found value")),
        }
    }
}

/// Formats a number the way C's `%.8g` does.
pub fn format_number(n: f64) -> String {
    format_g(n, 8)
}

fn format_g(n: f64, precision: usize) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    let sci = format!("{:.*e}", precision - 1, n);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp) as usize;
        trim_zeros(&format!("{:.*}", decimals, n)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(-14.0), "-14");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(12345678.0), "12345678");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1.0 / 3.0), "0.33333333");
        assert_eq!(format_number(std::f64::consts::PI), "3.1415927");
        assert_eq!(format_number(0.0001), "0.0001");
    }

    #[test]
    fn test_format_exponents() {
        assert_eq!(format_number(123456789.0), "1.2345679e+08");
        assert_eq!(format_number(0.00001), "1e-05");
        assert_eq!(format_number(1e100), "1e+100");
        assert_eq!(format_number(-2.5e-7), "-2.5e-07");
    }

    #[test]
    fn test_format_rounding_carries_exponent() {
        assert_eq!(format_number(99999999.5), "1e+08");
    }

    #[test]
    fn test_format_special() {
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_number(f64::NAN), "nan");
    }

    #[test]
    fn test_datum_shapes() {
        assert_eq!(Datum::Val(2.0).val().unwrap(), 2.0);
        assert_eq!(Datum::Sym(3).sym().unwrap(), 3);
        assert!(Datum::Sym(3).val().is_err());
        assert!(Datum::Val(3.0).sym().is_err());
    }
}
