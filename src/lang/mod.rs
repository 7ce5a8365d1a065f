/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of the hoc language.

*/

pub type LineNumber = Option<usize>;

#[macro_use]
mod error;
mod lex;
mod parse;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use parse::parse;

pub mod ast;
pub mod token;
