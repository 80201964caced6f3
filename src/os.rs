//! Thin adapters over the two OS primitives this allocator is layered on,
//! plus the fatal sink every syscall failure is routed through.
//!
//! `brk-extend` is `libc::sbrk`; `map-anon`/`unmap` are `libc::mmap`
//! (anonymous, private) and `libc::munmap`. Page size is read once via
//! `sysconf(_SC_PAGESIZE)` and cached.

use std::ffi::c_void;
use std::ptr;
use std::sync::OnceLock;

use libc::{MAP_ANONYMOUS, MAP_FAILED, MAP_PRIVATE, PROT_READ, PROT_WRITE, intptr_t};

static PAGE_SIZE: OnceLock<usize> = OnceLock::new();

/// The OS page size, queried once and cached for the process lifetime.
pub(crate) fn page_size() -> usize {
  *PAGE_SIZE.get_or_init(|| unsafe { libc::sysconf(libc::_SC_PAGESIZE) as usize })
}

/// Consults the fatal sink: if `condition` is true, logs `message` and
/// aborts the process. Every OS-primitive failure path in this crate goes
/// through here — there is no recoverable out-of-memory surface.
pub(crate) fn fatal_if(condition: bool, message: &str) {
  if condition {
    log::error!("rallocator: {message}");
    eprintln!("rallocator: fatal: {message}");
    std::process::abort();
  }
}

/// Extends the program break by `total_bytes` and returns the *previous*
/// break (the base address of the newly available region), matching
/// `sbrk`'s contract.
///
/// # Safety
/// Must not be called concurrently with another thread's heap-affecting
/// call — the program break is a single process-wide resource.
pub(crate) unsafe fn sbrk_extend(total_bytes: usize) -> *mut u8 {
  unsafe {
    let previous = libc::sbrk(total_bytes as intptr_t);
    fatal_if(
      previous == usize::MAX as *mut c_void,
      "sbrk failed to extend the program break",
    );
    previous as *mut u8
  }
}

/// Creates a fresh, page-aligned, zero-filled private anonymous mapping of
/// `total_bytes`.
pub(crate) unsafe fn map_anon(total_bytes: usize) -> *mut u8 {
  unsafe {
    let addr = libc::mmap(
      ptr::null_mut(),
      total_bytes,
      PROT_READ | PROT_WRITE,
      MAP_PRIVATE | MAP_ANONYMOUS,
      -1,
      0,
    );
    fatal_if(addr == MAP_FAILED, "mmap failed to create an anonymous mapping");
    addr as *mut u8
  }
}

/// Releases a mapping previously returned by [`map_anon`].
pub(crate) unsafe fn unmap(base: *mut u8, len: usize) {
  unsafe {
    let result = libc::munmap(base as *mut c_void, len);
    fatal_if(result != 0, "munmap failed to release a mapped block");
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_size_is_positive_and_stable() {
    let a = page_size();
    let b = page_size();
    assert!(a > 0);
    assert_eq!(a, b);
  }

  #[test]
  fn fatal_if_false_does_not_abort() {
    // If this didn't return, the whole test binary would die.
    fatal_if(false, "unreachable");
  }
}
