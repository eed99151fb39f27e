//! # Common
//!
//! Shared constants used throughout the library.

#![allow(dead_code)]

/// Maximum number of values the VM's value stack can hold at once.
///
/// Exceeding this is a runtime error (`stack overflow`), not a panic or a
/// silent grow: see [`crate::vm::VM::push`].
pub const STACK_MAX: usize = 1024;

/// Maximum number of locals a single compile may declare (and the largest
/// value a one-byte local-slot operand can address).
pub const U8_COUNT: usize = 256;
