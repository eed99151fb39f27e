//! # Object
//!
//! The heap side of the value model: a polymorphic object header ([`Obj`])
//! threaded into a singly-linked list rooted in the VM (see
//! [`crate::vm::VM::objects`]), plus its only current variant, [`ObjString`].
//!
//! Every object is heap-allocated with [`Box::into_raw`] and freed exactly
//! once, in bulk, when the VM tears down (`vm.objects` is walked and each
//! node reclaimed with [`Box::from_raw`]). There is no collection while the
//! VM is running — see spec's Non-goals.

use std::ptr::NonNull;

/// The type tag on [`Obj`]. Only one variant exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjType {
  String,
}

/// The common header every heap object starts with.
///
/// `ObjString` is `#[repr(C)]` with `obj` as its first field, so a
/// `NonNull<ObjString>` can be legally cast down to a `NonNull<Obj>` and
/// back (see [`ObjString::into_obj_ptr`] and [`crate::value::Value::as_string`]).
#[repr(C)]
#[derive(Debug)]
pub struct Obj {
  pub obj_type: ObjType,
  /// Next node in the VM's all-objects chain, or `None` at the tail.
  pub next: Option<NonNull<Obj>>,
}

/// An interned string object: length is implicit in `chars`, plus a
/// precomputed FNV-1a hash used both by the intern table and by globals.
#[repr(C)]
#[derive(Debug)]
pub struct ObjString {
  pub obj: Obj,
  pub chars: String,
  pub hash: u32,
}

impl ObjString {
  /// Leaks `self` onto the heap and returns an owning raw pointer, linking
  /// it onto `head` as the new chain head.
  ///
  /// # Safety
  ///
  /// The caller takes on responsibility for eventually reclaiming the
  /// returned pointer with [`Box::from_raw`] (the VM does this once, at
  /// teardown, by walking the object chain).
  pub(crate) fn alloc(chars: String, hash: u32, head: Option<NonNull<Obj>>) -> NonNull<ObjString> {
    let boxed = Box::new(ObjString {
      obj: Obj {
        obj_type: ObjType::String,
        next: head,
      },
      chars,
      hash,
    });
    NonNull::new(Box::into_raw(boxed)).expect("Box::into_raw never returns null")
  }
}

/// FNV-1a over raw bytes, matching the reference implementation's constants
/// (offset basis `2166136261`, prime `16777619`).
pub fn hash_bytes(bytes: &[u8]) -> u32 {
  let mut hash: u32 = 2166136261;
  for &byte in bytes {
    hash ^= byte as u32;
    hash = hash.wrapping_mul(16777619);
  }
  hash
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_is_deterministic() {
    assert_eq!(hash_bytes(b"hello"), hash_bytes(b"hello"));
  }

  #[test]
  fn hash_differs_for_different_content() {
    assert_ne!(hash_bytes(b"hello"), hash_bytes(b"world"));
  }

  /// `ObjString`'s `repr(C)` layout with `obj` as its first field is what
  /// makes the `NonNull<ObjString> -> NonNull<Obj>` cast in
  /// `Value::as_obj`/`as_string` sound. This pins that down directly,
  /// independent of any value/table machinery.
  #[test]
  fn obj_string_casts_down_to_its_obj_header_in_place() {
    let ptr = ObjString::alloc("hi".to_owned(), hash_bytes(b"hi"), None);
    let header_ptr: NonNull<Obj> = ptr.cast();
    assert_eq!(unsafe { header_ptr.as_ref() }.obj_type, ObjType::String);
    // Freed via the same path the VM's teardown uses, so this doesn't leak.
    drop(unsafe { Box::from_raw(ptr.as_ptr()) });
  }
}
