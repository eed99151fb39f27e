use super::*;

impl<'src, 'vm> Parser<'src, 'vm> {
  /// Consumes the variable's name, declares it (as a local if inside a
  /// scope), and returns the constant-pool index to hand to
  /// `OP_DEFINE_GLOBAL` — or `0`, ignored, if it turned out to be a local.
  fn parse_variable(&mut self, message: &str) -> u8 {
    self.consume_token(TokenType::Identifier, message);

    self.declare_variable();
    if self.scope_depth > 0 {
      return 0;
    }

    let name = self.previous;
    self.identifier_constant(name)
  }

  /// Locals become usable only once their initializer has fully run;
  /// until then they sit at `depth == -1` (see [`Local`]).
  fn mark_initialized(&mut self) {
    if let Some(local) = self.locals.last_mut() {
      local.depth = self.scope_depth;
    }
  }

  fn define_variable(&mut self, global: u8) {
    if self.scope_depth > 0 {
      self.mark_initialized();
      return;
    }
    self.emit_bytes(OpCode::DefineGlobal as u8, global);
  }

  /// Registers a variable's existence; a no-op at global scope (globals
  /// are resolved by name at runtime, not by slot). Flags redeclaration of
  /// the same name within the same block as an error.
  fn declare_variable(&mut self) {
    if self.scope_depth == 0 {
      return;
    }

    let name = self.previous;
    for local in self.locals.iter().rev() {
      if local.depth != -1 && local.depth < self.scope_depth {
        break;
      }
      if local.name.lexeme == name.lexeme {
        self.error("Already a variable with this name in this scope.");
      }
    }

    self.add_local(name);
  }

  fn add_local(&mut self, name: Token<'src>) {
    if self.locals.len() == crate::common::U8_COUNT {
      self.error("Too many local variables in this function.");
      return;
    }
    self.locals.push(Local { name, depth: -1 });
  }

  pub(crate) fn identifier_constant(&mut self, name: Token<'src>) -> u8 {
    let obj = self.intern(name.lexeme.to_owned());
    self.make_constant(Value::Object(obj.cast()))
  }

  /// Searches the active scope chain, innermost first, for `name`.
  /// Reading a match still mid-initialization (`depth == -1`) is an
  /// error: it means the name on the right of `let x = x;` resolved to
  /// the `x` being declared, not some outer one.
  pub(crate) fn resolve_local(&mut self, name: Token<'src>) -> Option<usize> {
    for (index, local) in self.locals.iter().enumerate().rev() {
      if local.name.lexeme == name.lexeme {
        if local.depth == -1 {
          self.error("Can't read local variable in its own initializer.");
        }
        return Some(index);
      }
    }
    None
  }

  pub(crate) fn var_declaration(&mut self) {
    let global = self.parse_variable("Expect variable name.");

    if self.match_token(TokenType::Equal) {
      self.expression();
    } else {
      self.emit_byte(OpCode::Null as u8);
    }

    self.consume_token(
      TokenType::Semicolon,
      "Expect ';' after variable declaration.",
    );
    self.define_variable(global);
  }
}
