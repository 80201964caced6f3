//! # rallocator — a general-purpose `sbrk`/`mmap` heap allocator
//!
//! This crate implements a user-space allocator in the tradition of a
//! from-scratch `malloc`/`free`/`realloc`/`calloc`: it services every
//! request from one of two OS primitives — extending the program break
//! (`sbrk`) for ordinary requests, or an anonymous `mmap` for large ones —
//! and keeps all of its own bookkeeping inline, in per-block headers linked
//! into one doubly linked list.
//!
//! ## Overview
//!
//! ```text
//!   HEAP MEMORY (sbrk-backed, grows upward)
//!
//!   ┌────────┬────────┬──────────┬────────┬─────────────────────────────┐
//!   │ Header │ Alloc  │  Header  │  Free  │           ...               │
//!   └────────┴────────┴──────────┴────────┴─────────────────────────────┘
//!                                                                      ▲
//!                                                              program break
//!
//!   MAPPED BLOCKS (one mmap per request, address-unrelated to the heap)
//!
//!   ┌────────┬───────────────────────────┐
//!   │ Header │      payload (mapped)     │
//!   └────────┴───────────────────────────┘
//! ```
//!
//! Every block — whether it's a heap slot or a standalone mapping — starts
//! with the same [`block::Header`]. Heap blocks never leave the list once
//! created; freeing one only flips its `status` back to `Free` so a later
//! request can reuse or split it. Mapped blocks are unlinked and handed
//! back to the OS the moment they're freed.
//!
//! ## Crate structure
//!
//! ```text
//!   rallocator
//!   ├── align      - the 8-byte alignment unit and align()
//!   ├── block      - Header, Status, the Block List, and block carving
//!   ├── os         - libc sbrk/mmap/munmap wrappers + the fatal sink
//!   ├── heap       - allocate_mapped / allocate_sbrk
//!   ├── freelist   - coalesce_all / best_fit / search_and_split
//!   ├── extend     - heap-tail growth, in place
//!   ├── router     - allocate() / allocate_zeroed() (src/router.rs)
//!   ├── realloc    - reallocate() / free() (src/realloc.rs)
//!   └── allocator  - the Allocator handle these all attach to
//! ```
//!
//! ## Quick start
//!
//! ```
//! use rallocator::Allocator;
//!
//! let mut heap = Allocator::new();
//!
//! unsafe {
//!     let ptr = heap.allocate(64).expect("non-zero request always succeeds");
//!     ptr.as_ptr().write(0xAB);
//!     assert_eq!(ptr.as_ptr().read(), 0xAB);
//!
//!     let ptr = heap.reallocate(Some(ptr), 256).expect("grow");
//!     heap.free(Some(ptr));
//! }
//! ```
//!
//! ## Allocation regimes
//!
//! A request that would need at least the heap threshold (128 KiB) of
//! header-plus-payload space is satisfied with its own `mmap`; everything
//! smaller comes from the heap, which is pre-allocated in one 128 KiB
//! reservation on the very first heap-backed request, then reused via
//! best-fit search, lazy coalescing, and placement splitting. See
//! [`router`] and [`freelist`] for the exact policy.
//!
//! ## Safety
//!
//! This crate is inherently unsafe: it performs raw pointer arithmetic over
//! memory obtained directly from the OS, and its public methods trust the
//! caller to pair every `allocate`/`allocate_zeroed`/successful `reallocate`
//! with exactly one later `free` or `reallocate`. It is also **not**
//! thread-safe by itself — `Allocator`'s methods all take `&mut self`, and a
//! caller sharing one instance across threads must add their own
//! synchronization (a `Mutex`, typically), since the underlying program
//! break is process-wide OS state.

pub mod align;
mod allocator;
mod block;
mod extend;
mod freelist;
mod heap;
mod os;
mod realloc;
mod router;

pub use allocator::Allocator;
pub use block::Status;
pub use router::{HEAP_THRESHOLD, PREALLOCATION_QUANTUM};
