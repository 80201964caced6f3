//! A narrated walkthrough exercising `rallocator`'s `allocate`/`free`/
//! `reallocate` surface: allocate a few differently-sized blocks, write
//! through them, free one, and watch the program break and mapped-vs-heap
//! routing react.
//!
//! Run with `cargo run --example walkthrough`.

use std::io::Read;

use libc::sbrk;
use rallocator::Allocator;

fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn print_program_break(label: &str) {
  println!(
    "[{}] PID = {}, program break (sbrk(0)) = {:?}",
    label,
    std::process::id(),
    unsafe { sbrk(0) },
  );
}

fn main() {
  let mut heap = Allocator::new();

  print_program_break("start");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 1) First allocation ever: triggers the 128 KiB heap pre-allocation.
  // --------------------------------------------------------------------
  println!("\n[1] Allocate 100 bytes (first-ever request, claims the heap quantum)");
  let first = unsafe { heap.allocate(100) }.expect("allocate 100");
  unsafe {
    first.as_ptr().cast::<u32>().write(0xDEADBEEF);
    println!("[1] Wrote 0xDEADBEEF at {first:p}");
  }
  print_program_break("after first allocation");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 2) A second, smaller allocation reuses the remaining heap space.
  // --------------------------------------------------------------------
  println!("\n[2] Allocate 12 bytes");
  let second = unsafe { heap.allocate(12) }.expect("allocate 12");
  unsafe {
    std::ptr::write_bytes(second.as_ptr(), 0xAB, 12);
  }
  println!("[2] Wrote pattern 0xAB at {second:p}");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 3) Free the first block, then allocate something smaller: best-fit
  //    should carve it out of the now-free first block.
  // --------------------------------------------------------------------
  println!("\n[3] Free first block, then allocate 2 bytes");
  unsafe { heap.free(Some(first)) };
  let third = unsafe { heap.allocate(2) }.expect("allocate 2");
  println!(
    "[3] third == first? {} ({third:p} vs {first:p})",
    third == first
  );
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 4) A large request crosses the mmap threshold.
  // --------------------------------------------------------------------
  print_program_break("before large allocation");
  println!("\n[4] Allocate 200,000 bytes (routed to mmap)");
  let big = unsafe { heap.allocate(200_000) }.expect("allocate 200000");
  println!("[4] Mapped block at {big:p}");
  print_program_break("after large allocation (unchanged: mmap, not sbrk)");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 5) Grow the large block -- still routed through reallocate's
  //    mapped-block copy-relocate path.
  // --------------------------------------------------------------------
  println!("\n[5] Reallocate the mapped block up to 400,000 bytes");
  let grown = unsafe { heap.reallocate(Some(big), 400_000) }.expect("grow mapped block");
  println!("[5] Relocated to {grown:p}");

  // --------------------------------------------------------------------
  // 6) Clean up.
  // --------------------------------------------------------------------
  unsafe {
    heap.free(Some(second));
    heap.free(Some(third));
    heap.free(Some(grown));
  }
  println!("\n[6] End of walkthrough. Process exit reclaims everything else.");
}
