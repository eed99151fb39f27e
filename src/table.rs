//! # Table
//!
//! An open-addressing, linear-probing hash table keyed by interned-string
//! identity (see spec §4.4). Used both as the VM's intern table (content →
//! canonical `ObjString`, value always `Null`) and as the globals table
//! (name → `Value`).
//!
//! Ported from `examples/original_source/table.c`'s probe sequence and
//! tombstone handling, re-expressed with an entry enum instead of the C
//! source's "null key + sentinel value" tombstone encoding — the states
//! are the same three spec.md describes (empty / tombstone / occupied),
//! just spelled out as a Rust enum instead of overloading a `Value` slot.

use std::ptr::NonNull;

use crate::object::ObjString;
use crate::utils::Init;
use crate::value::Value;

const MAX_LOAD: f64 = 0.75;
const MIN_CAPACITY: usize = 8;

#[derive(Debug, Clone)]
enum Slot {
  Empty,
  Tombstone,
  Occupied { key: NonNull<ObjString>, value: Value },
}

/// An open-addressing table. `count` includes tombstones (matching the
/// reference: tombstones keep counting towards the load factor so the
/// table still grows rather than degenerating into an ever-longer probe
/// chain of dead slots).
#[derive(Debug, Default, Clone)]
pub struct Table {
  count: usize,
  entries: Vec<Slot>,
}

impl Init for Table {}

impl Table {
  pub fn len(&self) -> usize {
    self.count
  }

  pub fn is_empty(&self) -> bool {
    self.count == 0
  }

  pub fn capacity(&self) -> usize {
    self.entries.len()
  }

  /// Probe from `hash % capacity`, stepping by 1 (mod capacity). Stops at
  /// the first matching key or the first empty (non-tombstone) slot,
  /// remembering the first tombstone seen along the way so inserts can
  /// reuse it.
  fn find_index(entries: &[Slot], capacity: usize, key: NonNull<ObjString>) -> usize {
    let hash = unsafe { key.as_ref() }.hash;
    let mut index = hash as usize % capacity;
    let mut tombstone: Option<usize> = None;
    loop {
      match &entries[index] {
        Slot::Empty => return tombstone.unwrap_or(index),
        Slot::Tombstone => {
          if tombstone.is_none() {
            tombstone = Some(index);
          }
        }
        Slot::Occupied { key: k, .. } if *k == key => return index,
        Slot::Occupied { .. } => {}
      }
      index = (index + 1) % capacity;
    }
  }

  pub fn get(&self, key: NonNull<ObjString>) -> Option<Value> {
    if self.entries.is_empty() {
      return None;
    }
    let index = Self::find_index(&self.entries, self.entries.len(), key);
    match &self.entries[index] {
      Slot::Occupied { value, .. } => Some(*value),
      _ => None,
    }
  }

  /// Inserts or overwrites `key`. Returns `true` iff `key` was not
  /// previously present (a brand-new key, not a tombstone reuse).
  pub fn set(&mut self, key: NonNull<ObjString>, value: Value) -> bool {
    if self.count + 1 > (self.capacity() as f64 * MAX_LOAD) as usize {
      let new_capacity = if self.capacity() < MIN_CAPACITY {
        MIN_CAPACITY
      } else {
        self.capacity() * 2
      };
      self.adjust_capacity(new_capacity);
    }

    let index = Self::find_index(&self.entries, self.entries.len(), key);
    let is_new = !matches!(self.entries[index], Slot::Occupied { .. });
    if is_new && matches!(self.entries[index], Slot::Empty) {
      self.count += 1;
    }
    self.entries[index] = Slot::Occupied { key, value };
    is_new
  }

  /// Converts the matching entry to a tombstone. Count is not decremented
  /// (keeps the load factor accounting simple and bounded, per spec).
  pub fn delete(&mut self, key: NonNull<ObjString>) -> bool {
    if self.count == 0 {
      return false;
    }
    let index = Self::find_index(&self.entries, self.entries.len(), key);
    if matches!(self.entries[index], Slot::Occupied { .. }) {
      self.entries[index] = Slot::Tombstone;
      true
    } else {
      false
    }
  }

  /// The one place content (rather than identity) is compared: used only
  /// by interning, to find a canonical already-interned string equal to
  /// `chars` by length, hash, and bytes.
  pub fn find_string(&self, chars: &str, hash: u32) -> Option<NonNull<ObjString>> {
    if self.entries.is_empty() {
      return None;
    }
    let capacity = self.entries.len();
    let mut index = hash as usize % capacity;
    loop {
      match &self.entries[index] {
        Slot::Empty => return None,
        Slot::Occupied { key, .. } => {
          let candidate = unsafe { key.as_ref() };
          if candidate.hash == hash && candidate.chars == chars {
            return Some(*key);
          }
        }
        Slot::Tombstone => {}
      }
      index = (index + 1) % capacity;
    }
  }

  fn adjust_capacity(&mut self, new_capacity: usize) {
    let mut new_entries = vec![Slot::Empty; new_capacity];
    let mut new_count = 0;
    for entry in &self.entries {
      if let Slot::Occupied { key, value } = entry {
        let index = Self::find_index(&new_entries, new_capacity, *key);
        new_entries[index] = Slot::Occupied {
          key: *key,
          value: *value,
        };
        new_count += 1;
      }
    }
    self.entries = new_entries;
    self.count = new_count;
  }

  pub fn free(&mut self) {
    self.entries.clear();
    self.count = 0;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::object::ObjString;

  fn make_key(s: &str) -> NonNull<ObjString> {
    let hash = crate::object::hash_bytes(s.as_bytes());
    ObjString::alloc(s.to_owned(), hash, None)
  }

  #[test]
  fn set_then_get_round_trips() {
    let mut table = Table::init();
    let key = make_key("hello");
    assert!(table.set(key, Value::Number(42.0)));
    assert_eq!(table.get(key), Some(Value::Number(42.0)));
  }

  #[test]
  fn set_returns_false_on_overwrite() {
    let mut table = Table::init();
    let key = make_key("hello");
    assert!(table.set(key, Value::Number(1.0)));
    assert!(!table.set(key, Value::Number(2.0)));
    assert_eq!(table.get(key), Some(Value::Number(2.0)));
  }

  #[test]
  fn delete_then_get_misses_but_new_key_can_reuse_slot() {
    let mut table = Table::init();
    let key = make_key("hello");
    table.set(key, Value::Number(1.0));
    assert!(table.delete(key));
    assert_eq!(table.get(key), None);
  }

  #[test]
  fn load_factor_never_exceeds_three_quarters() {
    let mut table = Table::init();
    let mut keys = vec![];
    for i in 0..200 {
      let key = make_key(&format!("key-{i}"));
      table.set(key, Value::Number(i as f64));
      keys.push(key);
    }
    assert!(table.len() as f64 <= table.capacity() as f64 * MAX_LOAD + 1.0);
  }

  #[test]
  fn find_string_matches_by_content() {
    let mut table = Table::init();
    let key = make_key("needle");
    table.set(key, Value::Null);
    let hash = crate::object::hash_bytes(b"needle");
    assert_eq!(table.find_string("needle", hash), Some(key));
    assert_eq!(table.find_string("other", hash), None);
  }
}
