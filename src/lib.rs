//! Segmented FIFO ring buffer.
//!
//! [`BulkRb`] stores its elements in a chain of fixed-size segments ("bulks")
//! of `N` slots each. Capacity grows by whole segments: growing never
//! reallocates or moves a segment's storage, so references into other segments
//! stay valid, and at most one partial segment of elements is relocated per
//! growth (see [`BulkRb::reserve`]).
//!
//! The buffer in this crate is single-threaded. A blocking thread-safe wrapper
//! with `wait`/`try_*` operations lives in the `bulkring-blocking` crate.
//!
//! ```
//! use bulkring::BulkRb;
//!
//! let mut rb = BulkRb::<i32, 2>::new(1);
//! rb.push(1).unwrap();
//! rb.push(2).unwrap();
//! rb.push(3).unwrap(); // full, grows by one segment
//! assert_eq!(rb.capacity(), 4);
//! assert_eq!(rb.pop(), Some(1));
//! assert_eq!(rb.pop(), Some(2));
//! assert_eq!(rb.pop(), Some(3));
//! assert_eq!(rb.pop(), None);
//! ```
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod chain;
mod error;
mod iter;
mod rb;
mod segment;
mod utils;


pub use error::{CapacityError, PushError};
pub use iter::Iter;
pub use rb::BulkRb;
