use std::fs::read_to_string;
use std::io::Write;
use std::sync::{Arc, Mutex};

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

#[test]
fn scoping_fixture_runs_end_to_end() {
  let project_root = project_root::get_project_root().expect("there is no project root");
  let fixture_path = project_root.join("tests/fixtures/scoping.klox");
  let source = read_to_string(fixture_path).expect("fixture script is readable");

  let capture = Capture::new();
  let mut vm = VM::with_output(Box::new(capture.clone()));
  vm.interpret(&source).expect("fixture script compiles and runs");

  assert_eq!(capture.contents(), "hello\nshadowed\nhello\n7\n");
}
