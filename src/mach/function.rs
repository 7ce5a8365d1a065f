use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub type Func = fn(f64) -> Result<f64>;

/// A unary built-in. Functions validate their own domain and range and
/// report a fatal error instead of returning NaN or infinity.
#[derive(Clone, Copy)]
pub struct Function {
    name: &'static str,
    func: Func,
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Function({})", self.name)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Function) -> bool {
        self.name == other.name
    }
}

const BUILTINS: &[(&str, Func)] = &[
    ("sin", Function::sin),
    ("cos", Function::cos),
    ("atan", Function::atan),
    ("log", Function::log),
    ("log10", Function::log10),
    ("exp", Function::exp),
    ("sqrt", Function::sqrt),
    ("int", Function::int),
    ("abs", Function::abs),
    ("rand", Function::rand),
];

const CONSTANTS: &[(&str, f64)] = &[
    ("PI", std::f64::consts::PI),
    ("E", std::f64::consts::E),
    ("GAMMA", 0.577_215_664_901_532_9),
    ("DEG", 57.295_779_513_082_32),
    ("PHI", 1.618_033_988_749_895),
];

impl Function {
    pub fn new(name: &'static str, func: Func) -> Function {
        Function { name, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, x: f64) -> Result<f64> {
        (self.func)(x)
    }

    pub fn builtins() -> impl Iterator<Item = Function> {
        BUILTINS.iter().map(|&(name, func)| Function::new(name, func))
    }

    pub fn constants() -> &'static [(&'static str, f64)] {
        CONSTANTS
    }

    fn errcheck(d: f64, name: &str) -> Result<f64> {
        if d.is_nan() {
            Err(error!(DomainError; &format!("in {}", name)))
        } else if d.is_infinite() {
            Err(error!(RangeError; &format!("in {}", name)))
        } else {
            Ok(d)
        }
    }

    pub fn sin(x: f64) -> Result<f64> {
        Ok(x.sin())
    }

    pub fn cos(x: f64) -> Result<f64> {
        Ok(x.cos())
    }

    pub fn atan(x: f64) -> Result<f64> {
        Ok(x.atan())
    }

    pub fn log(x: f64) -> Result<f64> {
        Function::errcheck(x.ln(), "log")
    }

    pub fn log10(x: f64) -> Result<f64> {
        Function::errcheck(x.log10(), "log10")
    }

    pub fn exp(x: f64) -> Result<f64> {
        Function::errcheck(x.exp(), "exp")
    }

    pub fn sqrt(x: f64) -> Result<f64> {
        Function::errcheck(x.sqrt(), "sqrt")
    }

    pub fn int(x: f64) -> Result<f64> {
        Ok(x.trunc())
    }

    pub fn abs(x: f64) -> Result<f64> {
        Ok(x.abs())
    }

    /// Ignores its argument.
    pub fn rand(_: f64) -> Result<f64> {
        Ok(rand::random::<f64>())
    }
}
