use super::{Function, Symbol};
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    Undefined,
    Variable(f64),
    Constant(f64),
    Builtin(Function),
}

#[derive(Debug, Clone)]
pub struct Entry {
    name: Rc<str>,
    kind: Kind,
}

impl Entry {
    pub fn name(&self) -> &Rc<str> {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The numeric payload of a variable or constant.
    pub fn value(&self) -> Option<f64> {
        match self.kind {
            Kind::Variable(n) | Kind::Constant(n) => Some(n),
            Kind::Undefined | Kind::Builtin(_) => None,
        }
    }

    pub fn set(&mut self, kind: Kind) {
        self.kind = kind;
    }
}

/// ## Symbol memory
///
/// Symbols are never removed, so a `Symbol` index handed out once
/// stays valid for the life of the table.

#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<Entry>,
    index: HashMap<Rc<str>, Symbol>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    /// A table with the built-in functions and constants registered.
    pub fn with_builtins() -> SymbolTable {
        let mut table = SymbolTable::new();
        for &(name, value) in Function::constants() {
            table.install(name, Kind::Constant(value));
        }
        for function in Function::builtins() {
            table.install(function.name(), Kind::Builtin(function));
        }
        table
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.index.get(name).copied()
    }

    /// Installs `name` with `kind`. Installing an existing name
    /// redefines it in place.
    pub fn install(&mut self, name: &str, kind: Kind) -> Symbol {
        if let Some(sym) = self.lookup(name) {
            self.entries[sym].set(kind);
            return sym;
        }
        let name: Rc<str> = name.into();
        let sym = self.entries.len();
        self.entries.push(Entry {
            name: name.clone(),
            kind,
        });
        self.index.insert(name, sym);
        sym
    }

    pub fn get(&self, sym: Symbol) -> Result<&Entry> {
        match self.entries.get(sym) {
            Some(entry) => Ok(entry),
            None => Err(error!(InternalError; "bad symbol reference")),
        }
    }

    pub fn get_mut(&mut self, sym: Symbol) -> Result<&mut Entry> {
        match self.entries.get_mut(sym) {
            Some(entry) => Ok(entry),
            None => Err(error!(InternalError; "bad symbol reference")),
        }
    }

    /// Current value of a variable or constant, by name.
    pub fn value(&self, name: &str) -> Option<f64> {
        let sym = self.lookup(name)?;
        self.entries[sym].value()
    }
}
