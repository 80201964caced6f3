//! Heap primitive wrappers: thin adapters over `sbrk`/`mmap` that come back
//! with a fully initialized, list-linked [`Header`].

use std::ptr;

use crate::allocator::Allocator;
use crate::block::{Header, Status, insert_tail};
use crate::os;

/// Obtains a fresh mapped block of `total_bytes` (header + payload) via
/// `mmap`. `size` is set to the *entire* region — the documented size-field
/// asymmetry: `unmap` needs the full length back, while heap blocks only
/// ever need their payload size.
pub(crate) unsafe fn allocate_mapped(alloc: &mut Allocator, total: usize) -> *mut Header {
  unsafe {
    let base = os::map_anon(total);
    log::trace!("rallocator: mapped {total} bytes at {base:p}");
    let block = base as *mut Header;
    (*block).size = total;
    (*block).status = Status::Mapped;
    (*block).prev = ptr::null_mut();
    (*block).next = ptr::null_mut();
    insert_tail(alloc, block);
    block
  }
}

/// Obtains a fresh heap block of `total_bytes` (header + payload) by
/// extending the program break via `sbrk`. `size` is payload-only, the
/// convention heap blocks use for split/merge arithmetic.
pub(crate) unsafe fn allocate_sbrk(alloc: &mut Allocator, total: usize) -> *mut Header {
  unsafe {
    let base = os::sbrk_extend(total);
    log::trace!("rallocator: sbrk-extended heap by {total} bytes at {base:p}");
    let block = base as *mut Header;
    (*block).size = total - crate::block::HEADER_SIZE;
    (*block).status = Status::Alloc;
    (*block).prev = ptr::null_mut();
    (*block).next = ptr::null_mut();
    insert_tail(alloc, block);
    block
  }
}
