//! # Chunk
//!
//! A growable bytecode buffer with a parallel line-number sidecar (one
//! entry per byte, so `code.len() == lines.len()` always holds) and a
//! constant pool indexed by a single byte (so at most 256 constants).

use crate::utils::Init;
use crate::value::{Value, ValueArray};
use enum_repr::EnumFromU8;

/// A single-byte opcode. Operand bytes (if any) immediately follow in the
/// code stream; see spec.md §4.3 for the operand shape of each.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumFromU8)]
pub enum OpCode {
  Constant,
  Null,
  True,
  False,
  Pop,
  GetLocal,
  SetLocal,
  GetGlobal,
  DefineGlobal,
  SetGlobal,
  Equal,
  Greater,
  Less,
  Add,
  Subtract,
  Multiply,
  Divide,
  Not,
  Negate,
  Print,
  Return,
}

/// A compiled unit of bytecode: code, one line number per code byte, and
/// the constant pool the `Constant`/`*Global` opcodes index into.
#[derive(Debug, Default, Clone)]
pub struct Chunk {
  pub(crate) code: Vec<u8>,
  pub(crate) lines: Vec<usize>,
  pub(crate) constants: ValueArray,
}

impl Chunk {
  /// Append a byte, tagging it with the source line it came from.
  pub fn write(&mut self, byte: u8, line: usize) {
    self.code.push(byte);
    self.lines.push(line);
  }

  /// Add a constant to the pool, returning its index. The caller is
  /// responsible for checking the result fits in a `u8` (at most 256
  /// constants per chunk) before emitting it as an operand.
  pub fn add_constant(&mut self, value: Value) -> usize {
    self.constants.write(value)
  }

  pub fn len(&self) -> usize {
    self.code.len()
  }

  pub fn is_empty(&self) -> bool {
    self.code.is_empty()
  }

  pub fn clear(&mut self) {
    self.code.clear();
    self.lines.clear();
    self.constants.clear();
  }
}

impl Init for Chunk {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn code_and_lines_stay_parallel() {
    let mut chunk = Chunk::init();
    chunk.write(OpCode::Constant as u8, 1);
    chunk.write(0, 1);
    chunk.write(OpCode::Return as u8, 2);
    assert_eq!(chunk.code.len(), chunk.lines.len());
  }

  #[test]
  fn add_constant_returns_sequential_indices() {
    let mut chunk = Chunk::init();
    assert_eq!(chunk.add_constant(Value::Number(1.0)), 0);
    assert_eq!(chunk.add_constant(Value::Number(2.0)), 1);
  }

  #[test]
  fn opcode_from_u8_round_trips() {
    assert_eq!(OpCode::from(OpCode::Return as u8), OpCode::Return);
    assert_eq!(OpCode::from(OpCode::Add as u8), OpCode::Add);
  }
}
