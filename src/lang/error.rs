use super::LineNumber;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn detail(&self) -> &str {
        &self.message
    }

    /// Errors raised deep in the machine don't know where they came from.
    /// The statement boundary fills this in; an existing line is kept.
    pub fn in_line_number(self, line: LineNumber) -> Error {
        if self.line_number.is_some() {
            return self;
        }
        Error {
            line_number: line,
            ..self
        }
    }

    pub fn message(self, message: &str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message: message.to_string(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SyntaxError,
    Incomplete,
    StackOverflow,
    StackUnderflow,
    ProgramTooBig,
    DivisionByZero,
    UndefinedVariable,
    AssignToNonVariable,
    CompoundAssignToUndefined,
    DomainError,
    RangeError,
    Interrupted,
    InternalError,
}

impl ErrorCode {
    fn description(self) -> &'static str {
        use ErrorCode::*;
        match self {
            SyntaxError => "syntax error",
            Incomplete => "unexpected end of input",
            StackOverflow => "stack overflow",
            StackUnderflow => "stack underflow",
            ProgramTooBig => "program too big",
            DivisionByZero => "division by zero",
            UndefinedVariable => "undefined variable",
            AssignToNonVariable => "assignment to non-variable",
            CompoundAssignToUndefined => "compound assignment to undefined variable",
            DomainError => "argument out of domain",
            RangeError => "result out of range",
            Interrupted => "interrupted",
            InternalError => "internal error",
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code.description())?;
        if !self.message.is_empty() {
            write!(f, " {}", self.message)?;
        }
        if let Some(line_number) = self.line_number {
            write!(f, " near line {}", line_number)?;
        }
        Ok(())
    }
}
