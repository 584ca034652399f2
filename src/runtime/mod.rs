//! Runtime execution for snakelet programs
//!
//! Parsing and execution are fused: the [`Interpreter`] walks the token
//! sequence directly, threading expression results through a [`ValueStack`]
//! and storing variables in a single global [`SymbolTable`].

mod cursor;
mod input;
mod interpreter;
pub mod ops;
mod stack;
mod symbol_table;
mod value;

pub use cursor::Cursor;
pub use input::{LineSource, ScriptedInput, StdinSource};
pub use interpreter::Interpreter;
pub use stack::ValueStack;
pub use symbol_table::SymbolTable;
pub use value::Value;
