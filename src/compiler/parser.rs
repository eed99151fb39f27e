//! # Parser
//!
//! Submodule of `compiler`: the `Parser` struct, its precedence table, and
//! the token-stream plumbing every other submodule here builds on.
//!
//! Parser methods are mostly infallible (`&mut self` with no `Result`):
//! an error records a formatted diagnostic and flips `panic_mode`/
//! `had_error`, but parsing continues. `panic_mode` suppresses
//! further diagnostics until `synchronize` finds a statement boundary, so
//! one malformed statement doesn't bury the rest of the program's errors
//! under one cascading complaint — only [`Parser::run`] inspects
//! `had_error` at the very end to decide whether compilation failed.

use std::ptr::NonNull;

use once_cell::sync::Lazy;

use crate::chunk::{Chunk, OpCode};
use crate::compiler::Precedence;
use crate::error::InterpretError;
use crate::object::Obj;
use crate::scanner::{Scanner, Token, TokenType};
use crate::table::Table;
use crate::value::Value;

pub mod compile_time_error_handlers;
pub mod emit_methods;
pub mod ops_after_get_parse_rule;
pub mod statement_methods;
pub mod variable_methods;

type ParseFn = for<'src, 'vm> fn(&mut Parser<'src, 'vm>, bool);

/// A prefix/infix parselet pair plus the precedence an infix use binds at.
#[derive(Clone, Copy)]
pub(crate) struct ParseRule {
  pub(crate) prefix: Option<ParseFn>,
  pub(crate) infix: Option<ParseFn>,
  pub(crate) precedence: Precedence,
}

impl ParseRule {
  const fn new(prefix: Option<ParseFn>, infix: Option<ParseFn>, precedence: Precedence) -> Self {
    Self {
      prefix,
      infix,
      precedence,
    }
  }
}

/// One entry per [`TokenType`] variant, in declaration order (`get_rule`
/// indexes it with `token_type as usize`).
static RULES: Lazy<[ParseRule; 40]> = Lazy::new(|| {
  use Precedence as P;
  use TokenType as T;
  [
    ParseRule::new(Some(Parser::grouping), None, P::None), // LeftParen
    ParseRule::new(None, None, P::None),                   // RightParen
    ParseRule::new(None, None, P::None),                   // LeftBrace
    ParseRule::new(None, None, P::None),                   // RightBrace
    ParseRule::new(None, None, P::None),                   // Comma
    ParseRule::new(None, None, P::None),                   // Dot
    ParseRule::new(Some(Parser::unary), Some(Parser::binary), P::Term), // Minus
    ParseRule::new(None, Some(Parser::binary), P::Term),   // Plus
    ParseRule::new(None, None, P::None),                   // Semicolon
    ParseRule::new(None, Some(Parser::binary), P::Factor),  // Slash
    ParseRule::new(None, Some(Parser::binary), P::Factor),  // Star
    ParseRule::new(Some(Parser::unary), None, P::None),    // Bang
    ParseRule::new(None, Some(Parser::binary), P::Equality), // BangEqual
    ParseRule::new(None, None, P::None),                   // Equal
    ParseRule::new(None, Some(Parser::binary), P::Equality), // EqualEqual
    ParseRule::new(None, Some(Parser::binary), P::Comparison), // Greater
    ParseRule::new(None, Some(Parser::binary), P::Comparison), // GreaterEqual
    ParseRule::new(None, Some(Parser::binary), P::Comparison), // Less
    ParseRule::new(None, Some(Parser::binary), P::Comparison), // LessEqual
    ParseRule::new(Some(Parser::variable), None, P::None), // Identifier
    ParseRule::new(Some(Parser::string), None, P::None),   // String
    ParseRule::new(Some(Parser::number), None, P::None),   // Number
    ParseRule::new(None, None, P::None),                   // And
    ParseRule::new(None, None, P::None),                   // Class
    ParseRule::new(None, None, P::None),                   // Else
    ParseRule::new(Some(Parser::literal), None, P::None),  // False
    ParseRule::new(None, None, P::None),                   // For
    ParseRule::new(None, None, P::None),                   // Func
    ParseRule::new(None, None, P::None),                   // If
    ParseRule::new(Some(Parser::literal), None, P::None),  // Null
    ParseRule::new(None, None, P::None),                   // Or
    ParseRule::new(None, None, P::None),                   // Print
    ParseRule::new(None, None, P::None),                   // Return
    ParseRule::new(None, None, P::None),                   // Super
    ParseRule::new(None, None, P::None),                   // This
    ParseRule::new(Some(Parser::literal), None, P::None),  // True
    ParseRule::new(None, None, P::None),                   // Let
    ParseRule::new(None, None, P::None),                   // While
    ParseRule::new(None, None, P::None),                   // Error
    ParseRule::new(None, None, P::None),                   // Eof
  ]
});

/// A local variable's slot. `depth == -1` means "declared but its
/// initializer hasn't finished running yet" — reading it in that state
/// (e.g. `let a = a;`) is a compile error, not a silently-captured outer
/// `a`.
pub(crate) struct Local<'src> {
  pub(crate) name: Token<'src>,
  pub(crate) depth: i32,
}

/// Drives one compilation: owns the chunk being built, the token stream,
/// and the local-variable scope stack. `objects`/`strings` borrow the
/// VM's object chain and intern table directly, so string and identifier
/// constants are interned at compile time exactly as runtime-concatenated
/// strings are interned by the VM.
pub(crate) struct Parser<'src, 'vm> {
  pub(crate) chunk: Chunk,
  scanner: Scanner<'src>,
  pub(crate) current: Token<'src>,
  pub(crate) previous: Token<'src>,
  pub(crate) had_error: bool,
  pub(crate) panic_mode: bool,
  errors: Vec<String>,
  pub(crate) locals: Vec<Local<'src>>,
  pub(crate) scope_depth: i32,
  objects: &'vm mut Option<NonNull<Obj>>,
  strings: &'vm mut Table,
}

impl<'src, 'vm> Parser<'src, 'vm> {
  pub(crate) fn new(
    source: &'src str,
    objects: &'vm mut Option<NonNull<Obj>>,
    strings: &'vm mut Table,
  ) -> Self {
    let dummy = Token::default();
    let mut parser = Self {
      chunk: Chunk::default(),
      scanner: Scanner::new(source),
      current: dummy,
      previous: dummy,
      had_error: false,
      panic_mode: false,
      errors: Vec::new(),
      locals: Vec::new(),
      scope_depth: 0,
      objects,
      strings,
    };
    parser.advance_token();
    parser
  }

  /// Runs the whole program: one `declaration` per top-level statement
  /// until EOF. Returns the finished chunk, or every diagnostic collected
  /// along the way joined into one [`InterpretError::Compile`].
  pub(crate) fn run(mut self) -> Result<Chunk, InterpretError> {
    while !self.match_token(TokenType::Eof) {
      self.declaration();
    }
    self.consume_token(TokenType::Eof, "Expect end of expression.");
    self.end_compiler();
    if self.had_error {
      Err(InterpretError::Compile(self.errors.join("\n")))
    } else {
      Ok(self.chunk)
    }
  }

  pub(crate) fn intern(&mut self, chars: String) -> NonNull<crate::object::ObjString> {
    crate::vm::intern_string(self.objects, self.strings, chars)
  }
}

impl<'src, 'vm> Parser<'src, 'vm> {
  /// Parses (and emits) one expression at `precedence` or tighter.
  fn parse_precedence(&mut self, precedence: Precedence) {
    self.advance_token();
    let Some(prefix_rule) = self.get_rule(self.previous.token_type).prefix else {
      self.error("Expect expression.");
      return;
    };

    let can_assign = precedence <= Precedence::Assignment;
    prefix_rule(self, can_assign);

    while precedence <= self.get_rule(self.current.token_type).precedence {
      self.advance_token();
      match self.get_rule(self.previous.token_type).infix {
        Some(infix_rule) => infix_rule(self, can_assign),
        None => break,
      }
    }

    if can_assign && self.match_token(TokenType::Equal) {
      self.error("Invalid assignment target.");
    }
  }

  fn get_rule(&self, token_type: TokenType) -> ParseRule {
    RULES[token_type as usize]
  }
}

impl<'src, 'vm> Parser<'src, 'vm> {
  /// Shifts `current` into `previous` and pulls the next non-error token
  /// from the scanner, reporting (and skipping past) any lexical errors
  /// along the way.
  pub(crate) fn advance_token(&mut self) {
    self.previous = self.current;
    loop {
      self.current = self.scanner.scan_token();
      if self.current.token_type != TokenType::Error {
        break;
      }
      let message = self.current.lexeme;
      self.error_at_current(message);
    }
  }

  pub(crate) fn consume_token(&mut self, token_type: TokenType, message: &str) {
    if self.current.token_type == token_type {
      self.advance_token();
    } else {
      self.error_at_current(message);
    }
  }

  fn check_token(&self, token_type: TokenType) -> bool {
    self.current.token_type == token_type
  }

  pub(crate) fn match_token(&mut self, token_type: TokenType) -> bool {
    if !self.check_token(token_type) {
      return false;
    }
    self.advance_token();
    true
  }

  fn expression(&mut self) {
    self.parse_precedence(Precedence::Assignment);
  }

  fn begin_scope(&mut self) {
    self.scope_depth += 1;
  }

  fn end_scope(&mut self) {
    self.scope_depth -= 1;
    while matches!(self.locals.last(), Some(local) if local.depth > self.scope_depth) {
      self.emit_byte(OpCode::Pop as u8);
      self.locals.pop();
    }
  }

  fn block(&mut self) {
    while !self.check_token(TokenType::RightBrace) && !self.check_token(TokenType::Eof) {
      self.declaration();
    }
    self.consume_token(TokenType::RightBrace, "Expect '}' after block.");
  }

  pub(crate) fn declaration(&mut self) {
    if self.match_token(TokenType::Let) {
      self.var_declaration();
    } else {
      self.statement();
    }
    if self.panic_mode {
      self.synchronize();
    }
  }

  fn statement(&mut self) {
    if self.match_token(TokenType::Print) {
      self.print_statement();
    } else if self.match_token(TokenType::LeftBrace) {
      self.begin_scope();
      self.block();
      self.end_scope();
    } else {
      self.expression_statement();
    }
  }
}

impl<'src, 'vm> Parser<'src, 'vm> {
  /// Adds `value` to the chunk's constant pool, reporting (and returning
  /// `0` for) the case where a single chunk's 256-constant limit is
  /// exceeded.
  fn make_constant(&mut self, value: Value) -> u8 {
    let index = self.chunk.add_constant(value);
    if index > u8::MAX as usize {
      self.error("Too many constants in one chunk.");
      0
    } else {
      index as u8
    }
  }
}
