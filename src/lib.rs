//! A bytecode interpreter for klox: a single-pass compiler that emits
//! bytecode directly (no intermediate AST) paired with a stack-based VM
//! that executes it.
//!
//! See [crafting interpreters, part III][bytecode] for the design this
//! crate's scanner/compiler/VM split is drawn from.
//!
//! [bytecode]: https://craftinginterpreters.com/a-bytecode-virtual-machine.html

pub mod chunk;
pub mod common;
pub mod compiler;
pub mod debug;
pub mod error;
pub mod object;
pub mod scanner;
pub mod table;
pub mod utils;
pub mod value;
pub mod vm;

/// The type returned by [`vm::VM::interpret`] and [`compiler::compile`].
pub type Result<T> = std::result::Result<T, error::InterpretError>;
