//! Heap tail extender: grows the last heap block in place by advancing the
//! program break.
//!
//! Split into two functions with different signatures rather than one
//! function with a mode flag, since they don't actually share a
//! target-finding step: [`extend_heap_tail`] has to walk the list to find
//! the tail, while [`extend_last_block`] is always handed the tail block
//! directly by the reallocation engine, which already knows it's last
//! because its `next` link is null.

use crate::allocator::Allocator;
use crate::block::{Header, Status};
use crate::os;

/// Walks to the last entry of the Block List. If it is `Free`, extends it
/// to host `total` bytes (header + payload) and marks it `Alloc`. Returns
/// `None` if the tail isn't `Free`, or the list is empty.
///
/// # Safety
/// `alloc`'s Block List must be well-formed.
pub(crate) unsafe fn extend_heap_tail(alloc: &mut Allocator, total: usize) -> Option<*mut Header> {
  unsafe {
    if alloc.head.is_null() {
      return None;
    }
    let mut tail = alloc.head;
    while !(*tail).next.is_null() {
      tail = (*tail).next;
    }
    if (*tail).status != Status::Free {
      return None;
    }

    let new_payload = total - crate::block::HEADER_SIZE;
    let delta = new_payload - (*tail).size;
    os::sbrk_extend(delta);
    log::debug!("rallocator: grew heap tail by {delta} bytes");
    (*tail).size = new_payload;
    (*tail).status = Status::Alloc;
    Some(tail)
  }
}

/// `block` is already known to be the last heap block (its `next` link is
/// null). Grows it in place to `new_payload` bytes and keeps it `Alloc`.
///
/// # Safety
/// `block` must be the tail of its allocator's Block List, with
/// `new_payload >= block.size`.
pub(crate) unsafe fn extend_last_block(block: *mut Header, new_payload: usize) -> *mut Header {
  unsafe {
    let delta = new_payload - (*block).size;
    os::sbrk_extend(delta);
    log::debug!("rallocator: grew reallocated tail block by {delta} bytes");
    (*block).size = new_payload;
    block
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::heap::allocate_sbrk;

  #[test]
  fn extend_heap_tail_grows_free_tail() {
    let mut alloc = Allocator::new();
    unsafe {
      let block = allocate_sbrk(&mut alloc, 64);
      (*block).status = Status::Free;

      let total = crate::align::align(256) + crate::block::HEADER_SIZE;
      let grown = extend_heap_tail(&mut alloc, total).expect("tail is free, must extend");

      assert_eq!(grown, block);
      assert_eq!((*grown).status, Status::Alloc);
      assert_eq!((*grown).size, crate::align::align(256));
    }
  }

  #[test]
  fn extend_heap_tail_refuses_non_free_tail() {
    let mut alloc = Allocator::new();
    unsafe {
      let block = allocate_sbrk(&mut alloc, 64);
      (*block).status = Status::Alloc;

      let total = crate::align::align(256) + crate::block::HEADER_SIZE;
      assert!(extend_heap_tail(&mut alloc, total).is_none());
    }
  }

  #[test]
  fn extend_last_block_grows_in_place() {
    let mut alloc = Allocator::new();
    unsafe {
      let block = allocate_sbrk(&mut alloc, 128);
      let grown = extend_last_block(block, 512);
      assert_eq!(grown, block);
      assert_eq!((*grown).size, 512);
    }
  }
}
