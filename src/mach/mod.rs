/*!
## Rust Machine Module

This Rust module is a compiler and threaded-code virtual machine for hoc.

*/

pub type Address = usize;
pub type Symbol = usize;

mod compile;
mod function;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;
mod symbol;
mod trace;
mod val;

pub use compile::compile;
pub use compile::compile_expression;
pub use function::Function;
pub use opcode::Opcode;
pub use opcode::Operands;
pub use operation::Operation;
pub use program::Program;
pub use program::Slot;
pub use runtime::Config;
pub use runtime::Event;
pub use runtime::Runtime;
pub use stack::Stack;
pub use symbol::Entry;
pub use symbol::Kind;
pub use symbol::SymbolTable;
pub use trace::Tracer;
pub use val::format_number;
pub use val::Datum;

#[cfg(test)]
mod tests;
