//! # Scanner
//!
//! A pull-based lexer over a borrowed source string: `scan_token` skips
//! whitespace and `//` comments, then returns one token referencing a
//! slice of the original source (never copied). Ported from
//! `examples/original_source/scanner.c`, including its keyword trie in
//! `identifier_type`, with the `handle_string` terminator bug (`=` instead
//! of `"`) fixed rather than replicated, per spec.md §9.

use crate::utils::Init;

/// The tag on a [`Token`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenType {
  // Single-character tokens.
  LeftParen,
  RightParen,
  LeftBrace,
  RightBrace,
  Comma,
  Dot,
  Minus,
  Plus,
  Semicolon,
  Slash,
  Star,
  // One or two character tokens.
  Bang,
  BangEqual,
  Equal,
  EqualEqual,
  Greater,
  GreaterEqual,
  Less,
  LessEqual,
  // Literals.
  Identifier,
  String,
  Number,
  // Keywords.
  And,
  Class,
  Else,
  False,
  For,
  Func,
  If,
  Null,
  Or,
  Print,
  Return,
  Super,
  This,
  True,
  Let,
  While,
  // Error and EOF.
  Error,
  Eof,
}

/// A lexeme slice, its type, and the source line it starts on.
///
/// `TOKEN_ERROR`'s "lexeme" is instead the error message itself.
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
  pub token_type: TokenType,
  pub line: usize,
  pub lexeme: &'a str,
}

impl<'a> Init for Token<'a> {}

impl<'a> Default for Token<'a> {
  fn default() -> Self {
    Self {
      token_type: TokenType::Eof,
      line: 1,
      lexeme: "",
    }
  }
}

/// A scanner bound to a borrowed source string.
#[derive(Debug)]
pub struct Scanner<'a> {
  source: &'a str,
  start: usize,
  current: usize,
  line: usize,
}

impl<'a> Scanner<'a> {
  pub fn new(src: &'a str) -> Self {
    Self {
      source: src,
      start: 0,
      current: 0,
      line: 1,
    }
  }

  pub fn scan_token(&mut self) -> Token<'a> {
    self.skip_whitespace();
    self.start = self.current;

    if self.is_at_end() {
      return self.make_token(TokenType::Eof);
    }

    let c = self.advance();

    if is_alpha(c) {
      return self.identifier();
    }
    if c.is_ascii_digit() {
      return self.number();
    }

    match c {
      b'(' => self.make_token(TokenType::LeftParen),
      b')' => self.make_token(TokenType::RightParen),
      b'{' => self.make_token(TokenType::LeftBrace),
      b'}' => self.make_token(TokenType::RightBrace),
      b';' => self.make_token(TokenType::Semicolon),
      b',' => self.make_token(TokenType::Comma),
      b'.' => self.make_token(TokenType::Dot),
      b'-' => self.make_token(TokenType::Minus),
      b'+' => self.make_token(TokenType::Plus),
      b'/' => self.make_token(TokenType::Slash),
      b'*' => self.make_token(TokenType::Star),
      b'!' => {
        let t = if self.match_next(b'=') {
          TokenType::BangEqual
        } else {
          TokenType::Bang
        };
        self.make_token(t)
      }
      b'=' => {
        let t = if self.match_next(b'=') {
          TokenType::EqualEqual
        } else {
          TokenType::Equal
        };
        self.make_token(t)
      }
      b'<' => {
        let t = if self.match_next(b'=') {
          TokenType::LessEqual
        } else {
          TokenType::Less
        };
        self.make_token(t)
      }
      b'>' => {
        let t = if self.match_next(b'=') {
          TokenType::GreaterEqual
        } else {
          TokenType::Greater
        };
        self.make_token(t)
      }
      b'"' => self.string(),
      _ => self.error_token("Unexpected character."),
    }
  }
}

impl<'a> Scanner<'a> {
  fn string(&mut self) -> Token<'a> {
    while self.peek() != b'"' && !self.is_at_end() {
      if self.peek() == b'\n' {
        self.line += 1;
      }
      self.advance();
    }

    if self.is_at_end() {
      return self.error_token("Unterminated string.");
    }

    // consume the closing quote
    self.advance();
    self.make_token(TokenType::String)
  }

  fn number(&mut self) -> Token<'a> {
    while self.peek().is_ascii_digit() {
      self.advance();
    }

    if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
      self.advance();
      while self.peek().is_ascii_digit() {
        self.advance();
      }
    }

    self.make_token(TokenType::Number)
  }

  fn identifier(&mut self) -> Token<'a> {
    while is_alpha(self.peek()) || self.peek().is_ascii_digit() {
      self.advance();
    }
    self.make_token(self.identifier_type())
  }

  /// A hand-built trie on the first 1-2 characters of the lexeme;
  /// unmatched paths fall through to `Identifier`.
  fn identifier_type(&self) -> TokenType {
    let lexeme = self.current_lexeme();
    let bytes = lexeme.as_bytes();
    match bytes.first() {
      Some(b'a') => self.check_keyword(1, "nd", TokenType::And),
      Some(b'c') => self.check_keyword(1, "lass", TokenType::Class),
      Some(b'e') => self.check_keyword(1, "lse", TokenType::Else),
      Some(b'f') if bytes.len() > 1 => match bytes[1] {
        b'a' => self.check_keyword(2, "lse", TokenType::False),
        b'o' => self.check_keyword(2, "r", TokenType::For),
        b'u' => self.check_keyword(2, "nc", TokenType::Func),
        _ => TokenType::Identifier,
      },
      Some(b'i') => self.check_keyword(1, "f", TokenType::If),
      Some(b'l') => self.check_keyword(1, "et", TokenType::Let),
      Some(b'n') => self.check_keyword(1, "ull", TokenType::Null),
      Some(b'o') => self.check_keyword(1, "r", TokenType::Or),
      Some(b'p') => self.check_keyword(1, "rint", TokenType::Print),
      Some(b'r') => self.check_keyword(1, "eturn", TokenType::Return),
      Some(b's') => self.check_keyword(1, "uper", TokenType::Super),
      Some(b't') if bytes.len() > 1 => match bytes[1] {
        b'h' => self.check_keyword(2, "is", TokenType::This),
        b'r' => self.check_keyword(2, "ue", TokenType::True),
        _ => TokenType::Identifier,
      },
      Some(b'w') => self.check_keyword(1, "hile", TokenType::While),
      _ => TokenType::Identifier,
    }
  }

  fn check_keyword(&self, start: usize, rest: &str, matched: TokenType) -> TokenType {
    let lexeme = self.current_lexeme();
    if lexeme.len() == start + rest.len() && lexeme.as_bytes()[start..].eq(rest.as_bytes()) {
      matched
    } else {
      TokenType::Identifier
    }
  }

  fn current_lexeme(&self) -> &'a str {
    &self.source[self.start..self.current]
  }
}

impl<'a> Scanner<'a> {
  fn make_token(&self, token_type: TokenType) -> Token<'a> {
    Token {
      token_type,
      line: self.line,
      lexeme: self.current_lexeme(),
    }
  }

  fn error_token(&self, message: &'static str) -> Token<'a> {
    Token {
      token_type: TokenType::Error,
      line: self.line,
      lexeme: message,
    }
  }

  fn is_at_end(&self) -> bool {
    self.current >= self.source.len()
  }

  fn advance(&mut self) -> u8 {
    self.current += 1;
    self.source.as_bytes()[self.current - 1]
  }

  fn match_next(&mut self, expected: u8) -> bool {
    if self.is_at_end() || self.source.as_bytes()[self.current] != expected {
      return false;
    }
    self.current += 1;
    true
  }

  fn peek(&self) -> u8 {
    if self.is_at_end() {
      b'\0'
    } else {
      self.source.as_bytes()[self.current]
    }
  }

  fn peek_next(&self) -> u8 {
    if self.current + 1 >= self.source.len() {
      b'\0'
    } else {
      self.source.as_bytes()[self.current + 1]
    }
  }

  fn skip_whitespace(&mut self) {
    loop {
      match self.peek() {
        b' ' | b'\r' | b'\t' => {
          self.advance();
        }
        b'\n' => {
          self.line += 1;
          self.advance();
        }
        b'/' => {
          if self.peek_next() == b'/' {
            while self.peek() != b'\n' && !self.is_at_end() {
              self.advance();
            }
          } else {
            return;
          }
        }
        _ => return,
      }
    }
  }
}

fn is_alpha(c: u8) -> bool {
  c.is_ascii_alphabetic() || c == b'_'
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scan_all(src: &str) -> Vec<TokenType> {
    let mut scanner = Scanner::new(src);
    let mut out = vec![];
    loop {
      let tok = scanner.scan_token();
      let done = tok.token_type == TokenType::Eof;
      out.push(tok.token_type);
      if done {
        break;
      }
    }
    out
  }

  #[test]
  fn scans_keywords_and_identifiers() {
    assert_eq!(
      scan_all("let x = func_name;"),
      vec![
        TokenType::Let,
        TokenType::Identifier,
        TokenType::Equal,
        TokenType::Identifier,
        TokenType::Semicolon,
        TokenType::Eof,
      ]
    );
  }

  #[test]
  fn distinguishes_fun_prefixes() {
    assert_eq!(scan_all("func").first(), Some(&TokenType::Func));
    assert_eq!(scan_all("false").first(), Some(&TokenType::False));
    assert_eq!(scan_all("for").first(), Some(&TokenType::For));
    assert_eq!(scan_all("forest").first(), Some(&TokenType::Identifier));
  }

  #[test]
  fn scans_two_char_operators() {
    assert_eq!(
      scan_all("!= == <= >="),
      vec![
        TokenType::BangEqual,
        TokenType::EqualEqual,
        TokenType::LessEqual,
        TokenType::GreaterEqual,
        TokenType::Eof,
      ]
    );
  }

  #[test]
  fn strings_terminate_on_closing_quote_not_equals() {
    let toks = scan_all(r#""a = b";"#);
    assert_eq!(toks[0], TokenType::String);
  }

  #[test]
  fn unterminated_string_is_an_error_token() {
    assert_eq!(scan_all("\"abc").first(), Some(&TokenType::Error));
  }

  #[test]
  fn line_comments_are_skipped() {
    assert_eq!(
      scan_all("// comment\n1"),
      vec![TokenType::Number, TokenType::Eof]
    );
  }

  #[test]
  fn multiline_strings_bump_the_line_counter() {
    let mut scanner = Scanner::new("\"a\nb\";");
    let tok = scanner.scan_token();
    assert_eq!(tok.token_type, TokenType::String);
    let semicolon = scanner.scan_token();
    assert_eq!(semicolon.line, 2);
  }
}
