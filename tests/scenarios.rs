//! End-to-end interpreter scenarios, one per case in spec.md §8.

use std::io::Write;
use std::sync::{Arc, Mutex};

use klox::error::InterpretError;
use klox::vm::VM;

#[derive(Clone)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
  fn new() -> Self {
    Self(Arc::new(Mutex::new(Vec::new())))
  }

  fn contents(&self) -> String {
    String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
  }
}

impl Write for Capture {
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.0.lock().unwrap().extend_from_slice(buf);
    Ok(buf.len())
  }
  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

fn run(source: &str) -> (klox::Result<()>, String) {
  let capture = Capture::new();
  let mut vm = VM::with_output(Box::new(capture.clone()));
  let result = vm.interpret(source);
  (result, capture.contents())
}

#[test]
fn arithmetic_precedence() {
  let (result, output) = run("print 1 + 2 * 3;");
  assert!(result.is_ok());
  assert_eq!(output, "7\n");
}

#[test]
fn string_concatenation() {
  let (result, output) = run(r#"print "foo" + "bar";"#);
  assert!(result.is_ok());
  assert_eq!(output, "foobar\n");
}

#[test]
fn comparisons() {
  let (result, output) = run("let a = 1; let b = 2; print a == b; print a < b;");
  assert!(result.is_ok());
  assert_eq!(output, "false\ntrue\n");
}

#[test]
fn nested_block_scopes_shadow_and_restore() {
  let (result, output) = run("{ let x = 10; { let x = 20; print x; } print x; }");
  assert!(result.is_ok());
  assert_eq!(output, "20\n10\n");
}

#[test]
fn uninitialized_global_defaults_to_null_then_assigns() {
  let (result, output) = run("let x; print x; x = 5; print x;");
  assert!(result.is_ok());
  assert_eq!(output, "null\n5\n");
}

#[test]
fn adding_a_number_to_a_string_is_a_runtime_error() {
  let (result, _) = run(r#"print 1 + "two";"#);
  match result {
    Err(InterpretError::Runtime(message)) => {
      assert!(message.starts_with("operands to addition must be numbers or strings"));
      assert!(message.contains("[line 1] in script"));
    }
    other => panic!("expected a runtime error, got {other:?}"),
  }
}

#[test]
fn invalid_assignment_target_is_a_compile_error() {
  let (result, _) = run("a + b = 1;");
  match result {
    Err(InterpretError::Compile(message)) => {
      assert!(message.contains("Invalid assignment target"));
    }
    other => panic!("expected a compile error, got {other:?}"),
  }
}

#[test]
fn reading_a_local_in_its_own_initializer_is_a_compile_error() {
  let (result, _) = run("{ let x = x; }");
  match result {
    Err(InterpretError::Compile(message)) => {
      assert!(message.contains("own initializer"));
    }
    other => panic!("expected a compile error, got {other:?}"),
  }
}

#[test]
fn redeclaring_a_local_in_the_same_scope_is_a_compile_error() {
  let (result, _) = run("{ let a; let a; }");
  match result {
    Err(InterpretError::Compile(message)) => {
      assert!(message
        .to_lowercase()
        .contains("already a variable with this name in this scope"));
    }
    other => panic!("expected a compile error, got {other:?}"),
  }
}

#[test]
fn two_syntax_errors_in_one_unsynchronized_region_report_once() {
  // `)` alone is "expected expression"; the rest of the garbage line
  // should be swallowed by panic-mode suppression, not each reported.
  let (result, _) = run(") ) ) print 1;");
  match result {
    Err(InterpretError::Compile(message)) => {
      let error_lines = message.lines().count();
      assert_eq!(error_lines, 1, "expected exactly one diagnostic, got: {message}");
    }
    other => panic!("expected a compile error, got {other:?}"),
  }
}
