//! # Error
//!
//! The error type returned by [`crate::vm::VM::interpret`] and friends.

use thiserror::Error;

/// Any error that can occur while compiling or running a script.
///
/// Both variants already carry their fully-formatted diagnostic text (the
/// `[line N] ...` wrapper included), matching the wire format described by
/// the language surface: compile errors are reported as they're found and
/// the compiler keeps going until it runs dry; runtime errors are fatal to
/// the current `interpret` call.
#[derive(Debug, Clone, Error)]
pub enum InterpretError {
  /// The source failed to compile. The chunk that would have been produced
  /// is discarded.
  #[error("{0}")]
  Compile(String),
  /// The bytecode failed at runtime. Execution has already stopped and the
  /// value stack has already been reset by the time this is returned.
  #[error("{0}")]
  Runtime(String),
}
