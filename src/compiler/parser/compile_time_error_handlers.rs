use super::*;

impl<'src, 'vm> Parser<'src, 'vm> {
  /// Reports an error located at `current` (used when the token that's
  /// wrong is the one just peeked at, e.g. a failed `consume_token`).
  pub(crate) fn error_at_current(&mut self, message: &str) {
    let token = self.current;
    self.error_at(token, message);
  }

  /// Reports an error located at `previous` (used from within a parselet,
  /// where the offending token was the one just consumed).
  pub(crate) fn error(&mut self, message: &str) {
    let token = self.previous;
    self.error_at(token, message);
  }

  /// While `panic_mode` is set, every further error is suppressed: the
  /// first error in a region is almost always the only one worth
  /// reporting, and reporting the whole cascade it causes would bury it.
  fn error_at(&mut self, token: Token<'src>, message: &str) {
    if self.panic_mode {
      return;
    }
    self.panic_mode = true;

    let location = match token.token_type {
      TokenType::Eof => " at end".to_owned(),
      TokenType::Error => String::new(),
      _ => format!(" at '{}'", token.lexeme),
    };
    self
      .errors
      .push(format!("[line {}] error{}: {}", token.line, location, message));
    self.had_error = true;
  }
}
