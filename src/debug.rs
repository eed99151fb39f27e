//! # Debug
//!
//! A textual disassembler for [`Chunk`]s, used by the `debug_print_code`
//! and `debug_trace_execution`/`debug_trace_stack` features. Output format
//! mirrors the reference disassembler: `OFFSET LINE OPCODE [operand]`,
//! with a `|` in the line column when it repeats the previous instruction's
//! line.

use crate::chunk::{Chunk, OpCode};

impl Chunk {
  /// Disassembles every instruction in the chunk under a `== name ==`
  /// banner.
  pub fn disassemble(&self, name: &str) {
    println!("== {name} ==");
    let mut offset = 0;
    while offset < self.len() {
      offset = self.disassemble_instruction(offset);
    }
  }

  /// Disassembles the single instruction starting at `offset`, printing it,
  /// and returns the offset of the next instruction.
  pub fn disassemble_instruction(&self, offset: usize) -> usize {
    print!("{offset:04} ");
    if offset > 0 && self.lines[offset] == self.lines[offset - 1] {
      print!("   | ");
    } else {
      print!("{:4} ", self.lines[offset]);
    }

    let instruction = OpCode::from(self.code[offset]);
    match instruction {
      OpCode::Constant => self.constant_instruction("OP_CONSTANT", offset),
      OpCode::Null => simple_instruction("OP_NULL", offset),
      OpCode::True => simple_instruction("OP_TRUE", offset),
      OpCode::False => simple_instruction("OP_FALSE", offset),
      OpCode::Pop => simple_instruction("OP_POP", offset),
      OpCode::GetLocal => self.byte_instruction("OP_GET_LOCAL", offset),
      OpCode::SetLocal => self.byte_instruction("OP_SET_LOCAL", offset),
      OpCode::GetGlobal => self.constant_instruction("OP_GET_GLOBAL", offset),
      OpCode::DefineGlobal => self.constant_instruction("OP_DEFINE_GLOBAL", offset),
      OpCode::SetGlobal => self.constant_instruction("OP_SET_GLOBAL", offset),
      OpCode::Equal => simple_instruction("OP_EQUAL", offset),
      OpCode::Greater => simple_instruction("OP_GREATER", offset),
      OpCode::Less => simple_instruction("OP_LESS", offset),
      OpCode::Add => simple_instruction("OP_ADD", offset),
      OpCode::Subtract => simple_instruction("OP_SUBTRACT", offset),
      OpCode::Multiply => simple_instruction("OP_MULTIPLY", offset),
      OpCode::Divide => simple_instruction("OP_DIVIDE", offset),
      OpCode::Not => simple_instruction("OP_NOT", offset),
      OpCode::Negate => simple_instruction("OP_NEGATE", offset),
      OpCode::Print => simple_instruction("OP_PRINT", offset),
      OpCode::Return => simple_instruction("OP_RETURN", offset),
    }
  }

  fn constant_instruction(&self, name: &str, offset: usize) -> usize {
    let constant = self.code[offset + 1];
    let value = self
      .constants
      .get(constant as usize)
      .expect("constant operand always indexes the pool");
    println!("{name:<16} {constant:4} '{value}'");
    offset + 2
  }

  fn byte_instruction(&self, name: &str, offset: usize) -> usize {
    let slot = self.code[offset + 1];
    println!("{name:<16} {slot:4}");
    offset + 2
  }
}

fn simple_instruction(name: &str, offset: usize) -> usize {
  println!("{name}");
  offset + 1
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::value::Value;

  #[test]
  fn advances_past_a_two_byte_constant_instruction() {
    let mut chunk = Chunk::default();
    let idx = chunk.add_constant(Value::Number(1.5));
    chunk.write(OpCode::Constant as u8, 1);
    chunk.write(idx as u8, 1);
    chunk.write(OpCode::Return as u8, 1);
    let next = chunk.disassemble_instruction(0);
    assert_eq!(next, 2);
    assert_eq!(chunk.disassemble_instruction(2), 3);
  }
}
