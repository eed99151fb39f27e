use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use klox::error::InterpretError;
use klox::utils::get_args;
use klox::vm::VM;

fn repl(vm: &mut VM) -> ExitCode {
  let stdin = io::stdin();
  loop {
    print!("> ");
    io::stdout().flush().expect("stdout is writable");

    let mut line = String::new();
    if stdin.read_line(&mut line).expect("stdin is readable") == 0 {
      println!();
      return ExitCode::from(0);
    }

    if let Err(err) = vm.interpret(&line) {
      eprintln!("{err}");
    }
  }
}

fn run_file(vm: &mut VM, path: &str) -> ExitCode {
  let source = match fs::read_to_string(path) {
    Ok(source) => source,
    Err(err) => {
      eprintln!("Could not read file \"{path}\": {err}");
      return ExitCode::from(74);
    }
  };

  match vm.interpret(&source) {
    Ok(()) => ExitCode::from(0),
    Err(InterpretError::Compile(message)) => {
      eprintln!("{message}");
      ExitCode::from(65)
    }
    Err(InterpretError::Runtime(message)) => {
      eprintln!("{message}");
      ExitCode::from(70)
    }
  }
}

fn main() -> ExitCode {
  let args = get_args();
  let mut vm = VM::new();

  match args.as_slice() {
    [] => repl(&mut vm),
    [path] => run_file(&mut vm, path),
    _ => {
      eprintln!("Usage: klox [path]");
      ExitCode::from(64)
    }
  }
}
