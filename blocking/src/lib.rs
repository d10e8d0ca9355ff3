//! Blocking thread-safe wrapper around the `bulkring` segmented ring buffer.
//!
//! [`BlockingBulkRb`] puts a [`BulkRb`] behind a mutex and a condition
//! variable: any number of producer and consumer threads may share it,
//! elements come out in the order they went in, and consumers can block on
//! [`BlockingBulkRb::wait`] / [`BlockingBulkRb::pop_wait`] instead of
//! polling.
//!
//! ```
//! use bulkring_blocking::BlockingBulkRb;
//! use std::{sync::Arc, thread};
//!
//! let rb = Arc::new(BlockingBulkRb::<u32, 4>::new(1));
//! let consumer = thread::spawn({
//!     let rb = rb.clone();
//!     move || rb.pop_wait(None).unwrap()
//! });
//! rb.push(7).unwrap();
//! assert_eq!(consumer.join().unwrap(), 7);
//! ```

mod rb;
#[cfg(test)]
mod tests;

pub use bulkring::{BulkRb, CapacityError, PushError};
pub use rb::BlockingBulkRb;
