use super::{Address, Opcode};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// A jump slot in an `If` or `While` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Then,
    Else,
    Next,
    Body,
}

/// ## Program buffer
///
/// Append-only code for one statement. Positions returned by `emit`
/// are indices, so they stay valid however often the buffer grows.

#[derive(Debug)]
pub struct Program {
    limit: usize,
    ops: Vec<Opcode>,
}

impl Program {
    pub fn new(limit: usize) -> Program {
        Program { limit, ops: vec![] }
    }

    pub fn emit(&mut self, op: Opcode) -> Result<Address> {
        if self.ops.len() >= self.limit {
            return Err(error!(ProgramTooBig));
        }
        let addr = self.ops.len();
        self.ops.push(op);
        Ok(addr)
    }

    /// Address the next `emit` will write to.
    pub fn here(&self) -> Address {
        self.ops.len()
    }

    pub fn get(&self, addr: Address) -> Result<&Opcode> {
        match self.ops.get(addr) {
            Some(op) => Ok(op),
            None => Err(error!(InternalError; "program counter out of range")),
        }
    }

    /// Fill in a forward reference left by the compiler.
    pub fn patch(&mut self, addr: Address, slot: Slot, target: Address) -> Result<()> {
        let op = match self.ops.get_mut(addr) {
            Some(op) => op,
            None => return Err(error!(InternalError; "patch out of range")),
        };
        let field = match (op, slot) {
            (Opcode::If { then, .. }, Slot::Then) => then,
            (Opcode::If { otherwise, .. }, Slot::Else) => otherwise,
            (Opcode::If { next, .. }, Slot::Next) => next,
            (Opcode::While { body, .. }, Slot::Body) => body,
            (Opcode::While { next, .. }, Slot::Next) => next,
            _ => return Err(error!(InternalError; "patch of non-jump slot")),
        };
        *field = Some(target);
        Ok(())
    }

    /// Empties the buffer for the next statement, keeping its allocation.
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.ops.capacity()
    }

    pub fn ops(&self) -> &[Opcode] {
        &self.ops
    }
}
