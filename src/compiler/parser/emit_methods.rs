use super::*;

impl<'src, 'vm> Parser<'src, 'vm> {
  pub(crate) fn emit_byte(&mut self, byte: u8) {
    let line = self.previous.line;
    self.chunk.write(byte, line);
  }

  pub(crate) fn emit_bytes(&mut self, byte1: u8, byte2: u8) {
    self.emit_byte(byte1);
    self.emit_byte(byte2);
  }

  pub(crate) fn emit_return(&mut self) {
    self.emit_byte(OpCode::Return as u8);
  }

  pub(crate) fn emit_constant(&mut self, value: Value) {
    let index = self.make_constant(value);
    self.emit_bytes(OpCode::Constant as u8, index);
  }

  pub(crate) fn end_compiler(&mut self) {
    self.emit_return();
    #[cfg(feature = "debug_print_code")]
    if !self.had_error {
      self.chunk.disassemble("code");
    }
  }
}
