//! Reallocation engine: shrink-split, grow-in-place (coalesce + optional
//! heap-tail extension), and copy-relocate, plus `free`.

use std::ptr::NonNull;

use crate::align::align;
use crate::allocator::Allocator;
use crate::block::{HEADER_SIZE, Status, detach, header_of, payload_of, split_if_possible};
use crate::extend;
use crate::os;

impl Allocator {
  /// Frees a previously allocated or mapped block. A `None` pointer is a
  /// no-op.
  ///
  /// Freeing an already-`Free` heap block is treated as a silent no-op
  /// rather than an error.
  ///
  /// # Safety
  /// `ptr`, if present, must have been returned by this same `Allocator`
  /// and not already freed.
  pub unsafe fn free(&mut self, ptr: Option<NonNull<u8>>) {
    unsafe {
      let Some(ptr) = ptr else { return };
      let block = header_of(ptr);
      match (*block).status {
        Status::Alloc => {
          (*block).status = Status::Free;
        }
        Status::Mapped => {
          let size = (*block).size;
          detach(self, block);
          os::unmap(block as *mut u8, size);
        }
        Status::Free => {
          log::debug!("rallocator: double free ignored at {ptr:p}");
        }
      }
    }
  }

  /// Resizes the allocation at `ptr` to `n` bytes:
  ///
  /// - `n == 0` frees `ptr` and returns `None`.
  /// - `ptr` absent delegates to [`Allocator::allocate`].
  /// - a `Free` block is rejected (`None`) — reallocating freed memory is
  ///   undefined use.
  /// - an unchanged aligned size returns `ptr` untouched.
  /// - a mapped block is always copy-relocated through a fresh `allocate`.
  /// - a heap block shrinks in place, or grows in place by coalescing its
  ///   forward neighbor and/or extending the heap tail, falling back to
  ///   copy-relocation only when neither grow path fits.
  ///
  /// # Safety
  /// `ptr`, if present, must have been returned by this same `Allocator`
  /// and not already freed.
  pub unsafe fn reallocate(&mut self, ptr: Option<NonNull<u8>>, n: usize) -> Option<NonNull<u8>> {
    unsafe {
      if n == 0 {
        self.free(ptr);
        return None;
      }

      let Some(p) = ptr else {
        return self.allocate(n);
      };

      let block = header_of(p);
      if (*block).status == Status::Free {
        return None;
      }

      let new_payload = align(n);
      if new_payload == (*block).size {
        return Some(p);
      }

      if (*block).status == Status::Mapped {
        let new_ptr = self.allocate(n)?;
        let copy_len = new_payload.min((*block).size - HEADER_SIZE);
        std::ptr::copy_nonoverlapping(p.as_ptr(), new_ptr.as_ptr(), copy_len);
        self.free(Some(p));
        return Some(new_ptr);
      }

      // status == Status::Alloc from here on.
      if new_payload < (*block).size {
        split_realloc(block, new_payload);
        return Some(p);
      }

      if !(*block).next.is_null() {
        if let Some(grown) = extend_realloc(block, new_payload) {
          return Some(payload_of(grown));
        }
        let old_size = (*block).size;
        let new_ptr = self.allocate(n)?;
        std::ptr::copy_nonoverlapping(p.as_ptr(), new_ptr.as_ptr(), old_size);
        self.free(Some(p));
        return Some(new_ptr);
      }

      let grown = extend::extend_last_block(block, new_payload);
      Some(payload_of(grown))
    }
  }
}

/// `split_realloc`: carves a `Free` remainder after `block`'s new,
/// smaller end if there's enough room, otherwise leaves `block`'s size
/// untouched (internal fragmentation instead of a pointless tiny split).
///
/// # Safety
/// `block` must be `Status::Alloc` with `new_payload <= block.size`.
unsafe fn split_realloc(block: *mut crate::block::Header, new_payload: usize) {
  unsafe {
    split_if_possible(block, new_payload + HEADER_SIZE);
  }
}

/// `extend_realloc`: merges `block`'s immediate forward neighbor if
/// it's `Free`, then checks whether the (possibly now larger) block can
/// host `new_payload`, splitting off any surplus. Returns `None` if, even
/// after merging, there still isn't enough room — the caller then
/// copy-relocates.
///
/// # Safety
/// `block` must be `Status::Alloc` and currently linked into its
/// allocator's Block List.
unsafe fn extend_realloc(
  block: *mut crate::block::Header,
  new_payload: usize,
) -> Option<*mut crate::block::Header> {
  unsafe {
    let next = (*block).next;
    if !next.is_null() && (*next).status == Status::Free {
      (*block).size += (*next).size + HEADER_SIZE;
      (*block).next = (*next).next;
      if !(*next).next.is_null() {
        (*(*next).next).prev = block;
      }
    }

    if (*block).size >= new_payload {
      split_if_possible(block, new_payload + HEADER_SIZE);
      Some(block)
    } else {
      None
    }
  }
}
