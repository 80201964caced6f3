//! Free list manager: coalescing and best-fit search-and-split over the
//! Block List.

use crate::allocator::Allocator;
use crate::block::{Header, Status, split_if_possible};
use crate::extend;

/// Walks the Block List merging every run of list-adjacent `Free` heap
/// blocks into one. Mapped blocks are never `Free`, so they never
/// participate — only heap blocks can be adjacent-free.
///
/// # Safety
/// `alloc`'s Block List must be well-formed (every `next`/`prev` pair
/// consistent).
pub(crate) unsafe fn coalesce_all(alloc: &mut Allocator) {
  unsafe {
    let mut current = alloc.head;
    while !current.is_null() {
      let next = (*current).next;
      if next.is_null() {
        break;
      }
      if (*current).status == Status::Free && (*next).status == Status::Free {
        (*current).size += (*next).size + crate::block::HEADER_SIZE;
        (*current).next = (*next).next;
        if !(*next).next.is_null() {
          (*(*next).next).prev = current;
        }
        continue;
      }
      current = next;
    }
  }
}

/// Scans the whole list for the smallest `Free` block whose payload is at
/// least `required_payload`. Ties go to the first one encountered in list
/// order.
///
/// # Safety
/// `alloc`'s Block List must be well-formed.
pub(crate) unsafe fn best_fit(alloc: &Allocator, required_payload: usize) -> *mut Header {
  unsafe {
    let mut current = alloc.head;
    let mut best: *mut Header = std::ptr::null_mut();
    while !current.is_null() {
      if (*current).status == Status::Free
        && (*current).size >= required_payload
        && (best.is_null() || (*current).size < (*best).size)
      {
        best = current;
      }
      current = (*current).next;
    }
    best
  }
}

/// Finds a `Free` block that fits `total` (header + payload) via
/// [`best_fit`], marks it `Alloc`, and splits off a `Free` remainder when
/// there's enough left over to host one.
///
/// # Safety
/// `alloc`'s Block List must be well-formed.
pub(crate) unsafe fn search_and_split(alloc: &mut Allocator, total: usize) -> *mut Header {
  unsafe {
    let required_payload = total - crate::block::HEADER_SIZE;
    let block = best_fit(alloc, required_payload);
    if !block.is_null() {
      (*block).status = Status::Alloc;
      split_if_possible(block, total);
    }
    block
  }
}

/// Coalesces, then tries to place `total` bytes (header + payload) by
/// reusing a free block; if none fits, tries growing the heap tail in
/// place. Returns `None` only when neither path succeeds — the caller then
/// falls back to a brand-new `allocate_sbrk`.
///
/// # Safety
/// `alloc`'s Block List must be well-formed.
pub(crate) unsafe fn find_or_extend(alloc: &mut Allocator, total: usize) -> Option<*mut Header> {
  unsafe {
    coalesce_all(alloc);

    let block = search_and_split(alloc, total);
    if !block.is_null() {
      return Some(block);
    }

    log::debug!("rallocator: no free block fits {total} bytes, trying heap-tail extension");
    extend::extend_heap_tail(alloc, total)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::heap::allocate_sbrk;

  #[test]
  fn coalesce_merges_a_run_of_free_blocks() {
    let mut alloc = Allocator::new();
    unsafe {
      let a = allocate_sbrk(&mut alloc, 64);
      let b = allocate_sbrk(&mut alloc, 64);
      let c = allocate_sbrk(&mut alloc, 64);
      (*a).status = Status::Free;
      (*b).status = Status::Free;
      (*c).status = Status::Free;

      coalesce_all(&mut alloc);

      assert_eq!(alloc.head, a);
      assert!((*a).next.is_null());
      let expected = (*a).size; // already includes b and c after merge
      assert!(expected > 0);
    }
  }

  #[test]
  fn coalesce_does_not_touch_non_adjacent_free_blocks() {
    let mut alloc = Allocator::new();
    unsafe {
      let a = allocate_sbrk(&mut alloc, 32);
      let b = allocate_sbrk(&mut alloc, 32);
      let c = allocate_sbrk(&mut alloc, 32);
      (*a).status = Status::Free;
      (*b).status = Status::Alloc;
      (*c).status = Status::Free;

      coalesce_all(&mut alloc);

      assert_eq!((*a).next, b);
      assert_eq!((*b).next, c);
    }
  }

  #[test]
  fn best_fit_picks_smallest_adequate_free_block() {
    let mut alloc = Allocator::new();
    unsafe {
      let a = allocate_sbrk(&mut alloc, 200);
      let b = allocate_sbrk(&mut alloc, 64);
      let c = allocate_sbrk(&mut alloc, 128);
      (*a).status = Status::Free;
      (*b).status = Status::Free;
      (*c).status = Status::Free;

      let found = best_fit(&alloc, 100);
      assert_eq!(found, c);
    }
  }

  #[test]
  fn search_and_split_carves_a_free_remainder() {
    let mut alloc = Allocator::new();
    unsafe {
      let block = allocate_sbrk(&mut alloc, 4096);
      (*block).status = Status::Free;

      let total = crate::align::align(64) + crate::block::HEADER_SIZE;
      let found = search_and_split(&mut alloc, total);

      assert_eq!(found, block);
      assert_eq!((*found).status, Status::Alloc);
      assert_eq!((*found).size, crate::align::align(64));
      assert!(!(*found).next.is_null());
      assert_eq!((*(*found).next).status, Status::Free);
    }
  }
}
