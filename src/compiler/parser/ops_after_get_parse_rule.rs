use super::*;
use crate::value::Value;

impl<'src, 'vm> Parser<'src, 'vm> {
  pub(crate) fn number(&mut self, _can_assign: bool) {
    match self.previous.lexeme.parse::<f64>() {
      Ok(value) => self.emit_constant(Value::Number(value)),
      Err(_) => self.error("Invalid number literal."),
    }
  }

  /// Strips the surrounding quotes and interns the content.
  pub(crate) fn string(&mut self, _can_assign: bool) {
    let lexeme = self.previous.lexeme;
    let chars = lexeme[1..lexeme.len() - 1].to_owned();
    let obj = self.intern(chars);
    self.emit_constant(Value::Object(obj.cast()));
  }

  fn named_variable(&mut self, name: Token<'src>, can_assign: bool) {
    let (get_op, set_op, arg) = match self.resolve_local(name) {
      Some(slot) => (OpCode::GetLocal, OpCode::SetLocal, slot as u8),
      None => (
        OpCode::GetGlobal,
        OpCode::SetGlobal,
        self.identifier_constant(name),
      ),
    };

    if can_assign && self.match_token(TokenType::Equal) {
      self.expression();
      self.emit_bytes(set_op as u8, arg);
    } else {
      self.emit_bytes(get_op as u8, arg);
    }
  }

  pub(crate) fn variable(&mut self, can_assign: bool) {
    let name = self.previous;
    self.named_variable(name, can_assign);
  }

  pub(crate) fn unary(&mut self, _can_assign: bool) {
    let operator_type = self.previous.token_type;
    self.parse_precedence(Precedence::Unary);
    match operator_type {
      TokenType::Bang => self.emit_byte(OpCode::Not as u8),
      TokenType::Minus => self.emit_byte(OpCode::Negate as u8),
      _ => {}
    }
  }

  pub(crate) fn binary(&mut self, _can_assign: bool) {
    let operator_type = self.previous.token_type;
    let rule = self.get_rule(operator_type);
    self.parse_precedence(rule.precedence.next());

    match operator_type {
      TokenType::BangEqual => {
        self.emit_byte(OpCode::Equal as u8);
        self.emit_byte(OpCode::Not as u8);
      }
      TokenType::EqualEqual => self.emit_byte(OpCode::Equal as u8),
      TokenType::Greater => self.emit_byte(OpCode::Greater as u8),
      TokenType::GreaterEqual => {
        self.emit_byte(OpCode::Less as u8);
        self.emit_byte(OpCode::Not as u8);
      }
      TokenType::Less => self.emit_byte(OpCode::Less as u8),
      TokenType::LessEqual => {
        self.emit_byte(OpCode::Greater as u8);
        self.emit_byte(OpCode::Not as u8);
      }
      TokenType::Plus => self.emit_byte(OpCode::Add as u8),
      TokenType::Minus => self.emit_byte(OpCode::Subtract as u8),
      TokenType::Star => self.emit_byte(OpCode::Multiply as u8),
      TokenType::Slash => self.emit_byte(OpCode::Divide as u8),
      _ => {}
    }
  }

  pub(crate) fn literal(&mut self, _can_assign: bool) {
    match self.previous.token_type {
      TokenType::False => self.emit_byte(OpCode::False as u8),
      TokenType::Null => self.emit_byte(OpCode::Null as u8),
      TokenType::True => self.emit_byte(OpCode::True as u8),
      _ => {}
    }
  }

  pub(crate) fn grouping(&mut self, _can_assign: bool) {
    self.expression();
    self.consume_token(TokenType::RightParen, "Expect ')' after expression.");
  }
}
