use super::val::format_number;
use super::{Address, Kind, Opcode, Operands, SymbolTable};
use ansi_term::Style;
use std::io::Write;

/// ## Instruction tracer
///
/// Writes each instruction to a diagnostic stream just before it runs.
/// Write failures are ignored; tracing never changes machine state.

pub struct Tracer {
    out: Box<dyn Write>,
    style: Style,
}

impl std::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tracer")
    }
}

impl Tracer {
    pub fn new(out: Box<dyn Write>) -> Tracer {
        Tracer {
            out,
            style: Style::new(),
        }
    }

    pub fn stderr() -> Tracer {
        Tracer {
            out: Box::new(std::io::stderr()),
            style: Style::new().dimmed(),
        }
    }

    pub fn trace(&mut self, addr: Address, op: &Opcode, symbols: &SymbolTable) {
        let line = Tracer::render(addr, op, symbols);
        let _ = writeln!(self.out, "{}", self.style.paint(line));
    }

    pub fn render(addr: Address, op: &Opcode, symbols: &SymbolTable) -> String {
        let mut s = format!("[{:04}] {:<12}", addr, op.name());
        match (op.operands(), op) {
            (Operands::Value, Opcode::ConstPush(n)) => {
                s.push_str(&format!(" val={}", format_number(*n)));
            }
            (Operands::Symbol, Opcode::VarPush(sym)) => match symbols.get(*sym) {
                Ok(entry) => {
                    let val = match entry.kind() {
                        Kind::Variable(n) | Kind::Constant(n) => format_number(n),
                        Kind::Undefined => "undef".to_string(),
                        Kind::Builtin(_) => "builtin".to_string(),
                    };
                    s.push_str(&format!(" sym='{}' val={}", entry.name(), val));
                }
                Err(_) => s.push_str(&format!(" sym=#{}", sym)),
            },
            (Operands::Function, Opcode::Bltin(func)) => {
                s.push_str(&format!(" func={}", func.name()));
            }
            (Operands::Addresses, _) => {
                let slots = op.addresses();
                let targets: Vec<String> = slots.iter().map(|(_, a)| offset(*a)).collect();
                s.push_str(&format!(" [{}]", targets.join(",")));
                for (label, a) in slots.iter() {
                    s.push_str(&format!(
                        "\n[{:04}]   {:<10} -> {}",
                        addr,
                        format!("<{}>", label),
                        offset(*a)
                    ));
                }
            }
            _ => {}
        }
        s.trim_end().to_string()
    }
}

fn offset(addr: Option<Address>) -> String {
    match addr {
        Some(a) => a.to_string(),
        None => "-1".to_string(),
    }
}
