use super::*;

impl<'src, 'vm> Parser<'src, 'vm> {
  pub(crate) fn print_statement(&mut self) {
    self.expression();
    self.consume_token(TokenType::Semicolon, "Expect ';' after value.");
    self.emit_byte(OpCode::Print as u8);
  }

  /// Skips tokens until we're at what looks like a statement boundary,
  /// so the next `declaration` starts clean instead of re-tripping over
  /// whatever broke the previous one.
  pub(crate) fn synchronize(&mut self) {
    self.panic_mode = false;

    while self.current.token_type != TokenType::Eof {
      if self.previous.token_type == TokenType::Semicolon {
        return;
      }
      match self.current.token_type {
        TokenType::Class
        | TokenType::Func
        | TokenType::Let
        | TokenType::For
        | TokenType::If
        | TokenType::While
        | TokenType::Print
        | TokenType::Return => return,
        _ => {}
      }
      self.advance_token();
    }
  }

  pub(crate) fn expression_statement(&mut self) {
    self.expression();
    self.consume_token(TokenType::Semicolon, "Expect ';' after expression.");
    self.emit_byte(OpCode::Pop as u8);
  }
}
