//! The top-level allocator handle.
//!
//! `Allocator` bundles the two pieces of process-wide state this crate
//! needs to track: the Block List head and whether the first heap-backed
//! request has already claimed the pre-allocation quantum. It has no other
//! fields — everything else (splitting, coalescing, heap-tail growth) is
//! free functions in the sibling modules that take `&mut Allocator`.
//!
//! A caller who needs a single global allocator (rather than an explicit
//! value threaded through their own code) owns one `Allocator` and wraps it
//! in whatever synchronization their own threading model requires.

use std::ptr;

use crate::block::Header;

/// A user-space heap manager: one Block List plus the pre-allocation flag.
///
/// Not `Sync`: every method takes `&mut self`, which already prevents
/// concurrent use from safe code, but embedding this in a multithreaded
/// program additionally requires external mutual exclusion, since the
/// `sbrk`-extended program break and any `mmap`ed regions it tracks are
/// process-wide OS resources, not just this struct's fields.
pub struct Allocator {
  pub(crate) head: *mut Header,
  pub(crate) heap_preallocated: bool,
}

impl Allocator {
  /// Creates an allocator with an empty Block List and no heap
  /// pre-allocation yet performed.
  pub fn new() -> Self {
    Self {
      head: ptr::null_mut(),
      heap_preallocated: false,
    }
  }
}

impl Default for Allocator {
  fn default() -> Self {
    Self::new()
  }
}
