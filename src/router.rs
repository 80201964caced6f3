//! Allocation router: picks between mapped allocation, heap pre-allocation,
//! free-block reuse, and heap-tail extension.

use std::ptr::NonNull;

use crate::allocator::Allocator;
use crate::align::align;
use crate::block::{HEADER_SIZE, payload_of};
use crate::freelist;
use crate::heap;
use crate::os;

/// The heap-backed size threshold for ordinary (non-zero-fill) requests:
/// 128 KiB. Requests whose `total` (header + aligned payload) reaches this
/// are mapped instead of heap-allocated.
pub const HEAP_THRESHOLD: usize = 128 * 1024;

/// The size of the initial heap reservation performed on the first
/// heap-backed request.
pub const PREALLOCATION_QUANTUM: usize = 128 * 1024;

impl Allocator {
  /// Allocates `n` bytes. Returns `None` if `n == 0`.
  ///
  /// # Safety
  /// The returned pointer, if any, must be freed (or reallocated) through
  /// this same `Allocator` exactly once, and not used after that.
  pub unsafe fn allocate(&mut self, n: usize) -> Option<NonNull<u8>> {
    unsafe { self.allocate_inner(n, false) }
  }

  /// Allocates storage for `count` elements of `elem` bytes each, zeroed.
  /// Returns `None` if either is zero, or if `count * elem` overflows
  /// `usize`.
  ///
  /// # Safety
  /// Same contract as [`Allocator::allocate`].
  pub unsafe fn allocate_zeroed(&mut self, count: usize, elem: usize) -> Option<NonNull<u8>> {
    unsafe {
      if count == 0 || elem == 0 {
        return None;
      }
      let total_payload = count.checked_mul(elem)?;
      let ptr = self.allocate_inner(total_payload, true)?;
      std::ptr::write_bytes(ptr.as_ptr(), 0, align(total_payload));
      Some(ptr)
    }
  }

  /// Shared router logic for both `allocate` and `allocate_zeroed`.
  /// `zero_fill` selects which size-regime threshold applies: the OS page
  /// size for zero-fill requests, the 128 KiB heap threshold otherwise.
  unsafe fn allocate_inner(&mut self, n: usize, zero_fill: bool) -> Option<NonNull<u8>> {
    unsafe {
      if n == 0 {
        return None;
      }

      let total = align(n) + HEADER_SIZE;
      let threshold = if zero_fill { os::page_size() } else { HEAP_THRESHOLD };

      let header = if total >= threshold {
        heap::allocate_mapped(self, total)
      } else if !self.heap_preallocated {
        self.heap_preallocated = true;
        log::debug!("rallocator: pre-allocating {PREALLOCATION_QUANTUM} bytes on first heap request");
        heap::allocate_sbrk(self, PREALLOCATION_QUANTUM)
      } else {
        match freelist::find_or_extend(self, total) {
          Some(block) => block,
          None => heap::allocate_sbrk(self, total),
        }
      };

      Some(payload_of(header))
    }
  }
}
