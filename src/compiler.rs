//! # Compiler
//!
//! Single-pass compilation: there is no intermediate AST. The parser walks
//! the token stream once, using a Pratt/precedence-climbing table to decide
//! how far to recurse, and emits bytecode directly into a [`Chunk`] as it
//! goes. Entry point is [`compile`]; everything else here is submodule
//! plumbing for [`parser::Parser`].

mod parser;

use std::ptr::NonNull;

use crate::chunk::Chunk;
use crate::error::InterpretError;
use crate::object::Obj;
use crate::table::Table;

pub(crate) use parser::Parser;

/// The operator-precedence ladder the Pratt parser climbs. Declared in
/// increasing-binding-power order so `derive(Ord)` gives the comparisons
/// `parse_precedence` needs for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub(crate) enum Precedence {
  #[default]
  None,
  Assignment, // =
  Or,         // or
  And,        // and
  Equality,   // == !=
  Comparison, // < > <= >=
  Term,       // + -
  Factor,     // * /
  Unary,      // ! -
  Call,       // . ()
  Primary,
}

impl Precedence {
  /// The next tighter-binding level, used when climbing into an infix
  /// operator's right-hand operand. Saturates at `Primary`.
  pub(crate) fn next(self) -> Self {
    match self {
      Precedence::None => Precedence::Assignment,
      Precedence::Assignment => Precedence::Or,
      Precedence::Or => Precedence::And,
      Precedence::And => Precedence::Equality,
      Precedence::Equality => Precedence::Comparison,
      Precedence::Comparison => Precedence::Term,
      Precedence::Term => Precedence::Factor,
      Precedence::Factor => Precedence::Unary,
      Precedence::Unary => Precedence::Call,
      Precedence::Call | Precedence::Primary => Precedence::Primary,
    }
  }
}

/// Compiles `source` into a fresh [`Chunk`].
///
/// String and identifier literals encountered along the way are interned
/// into `strings` and linked onto `objects`, exactly as the VM's own
/// runtime string allocation does (see [`crate::vm::intern_string`]) — by
/// the time the VM starts executing the chunk, every string constant in
/// its pool is already a canonical, interned `ObjString`.
pub fn compile(
  source: &str,
  objects: &mut Option<NonNull<Obj>>,
  strings: &mut Table,
) -> Result<Chunk, InterpretError> {
  Parser::new(source, objects, strings).run()
}
