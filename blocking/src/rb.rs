use bulkring::{BulkRb, CapacityError, PushError};
use std::{
    sync::{Condvar, Mutex, MutexGuard},
    time::Duration,
};

/// Thread-safe wrapper around [`BulkRb`].
///
/// One mutex guards the whole buffer state; no field is read or written
/// outside it. A condition variable is signaled on every successful push and
/// observed by the blocking wait family, which loops on an emptiness
/// predicate so spurious wakeups never escape.
///
/// Operations are serialized by the mutex with no fairness guarantee between
/// blocked producers, but FIFO order of the elements themselves is preserved
/// regardless of which thread pushes or pops.
pub struct BlockingBulkRb<T, const N: usize> {
    inner: Mutex<BulkRb<T, N>>,
    nonempty: Condvar,
}

impl<T, const N: usize> BlockingBulkRb<T, N> {
    /// Creates a buffer of `segments` segments with no upper bound on growth.
    ///
    /// *Panics if `N` or `segments` is zero.*
    pub fn new(segments: usize) -> Self {
        Self::from(BulkRb::new(segments))
    }

    /// Creates a buffer whose total capacity never grows beyond
    /// `max_capacity` slots.
    pub fn with_max_capacity(segments: usize, max_capacity: usize) -> Self {
        Self::from(BulkRb::with_max_capacity(segments, max_capacity))
    }

    /// Unwraps the single-threaded buffer.
    pub fn into_inner(self) -> BulkRb<T, N> {
        self.inner.into_inner().unwrap()
    }

    fn lock(&self) -> MutexGuard<'_, BulkRb<T, N>> {
        self.inner.lock().unwrap()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Number of segments in the chain.
    pub fn bulk_count(&self) -> usize {
        self.lock().bulk_count()
    }

    /// See [`BulkRb::reserve`].
    pub fn reserve(&self, new_capacity: usize) -> Result<(), CapacityError> {
        self.lock().reserve(new_capacity)
    }

    pub fn clear(&self) {
        self.lock().clear()
    }

    /// Appends `value`, growing by one segment when full; wakes one waiting
    /// consumer on success.
    pub fn push(&self, value: T) -> Result<(), PushError<T>> {
        let result = self.lock().push(value);
        if result.is_ok() {
            self.nonempty.notify_one();
        }
        result
    }

    /// Appends the result of `f`, growing by one segment when full; wakes one
    /// waiting consumer on success.
    pub fn push_with<F: FnOnce() -> T>(&self, f: F) -> Result<(), CapacityError> {
        let result = self.lock().push_with(f);
        if result.is_ok() {
            self.nonempty.notify_one();
        }
        result
    }

    /// Removes and returns the oldest element, `None` when empty.
    pub fn pop(&self) -> Option<T> {
        self.lock().pop()
    }

    /// Non-blocking push.
    ///
    /// When the buffer is full, a zero `capacity_increment` rejects the value
    /// immediately; a positive increment grows the buffer by that many slots
    /// first, rejecting if growth would pass the configured maximum. The
    /// value is handed back on rejection. Wakes one waiting consumer on
    /// success.
    pub fn try_push(&self, value: T, capacity_increment: usize) -> Result<(), T> {
        let mut rb = self.lock();
        if rb.len() == rb.capacity() {
            if capacity_increment == 0 {
                return Err(value);
            }
            let wanted = rb.capacity() + capacity_increment;
            if rb.reserve(wanted).is_err() {
                return Err(value);
            }
        }
        let result = rb.try_push(value);
        drop(rb);
        debug_assert!(result.is_ok());
        if result.is_ok() {
            self.nonempty.notify_one();
        }
        result
    }

    /// Non-blocking emplace: rejects when full, no implicit growth. Returns
    /// whether the element was appended; the closure is dropped uncalled on
    /// rejection.
    pub fn try_push_with<F: FnOnce() -> T>(&self, f: F) -> bool {
        let mut rb = self.lock();
        if rb.len() == rb.capacity() {
            return false;
        }
        let pushed = rb.push_with(f).is_ok();
        drop(rb);
        if pushed {
            self.nonempty.notify_one();
        }
        pushed
    }

    /// Emplace flavor of [`try_push`](Self::try_push): when full, grows by
    /// `capacity_increment` slots before appending.
    pub fn try_reserve_and_push_with<F: FnOnce() -> T>(&self, capacity_increment: usize, f: F) -> bool {
        let mut rb = self.lock();
        if rb.len() == rb.capacity() {
            if capacity_increment == 0 {
                return false;
            }
            let wanted = rb.capacity() + capacity_increment;
            if rb.reserve(wanted).is_err() {
                return false;
            }
        }
        let pushed = rb.push_with(f).is_ok();
        drop(rb);
        if pushed {
            self.nonempty.notify_one();
        }
        pushed
    }

    /// Non-blocking pop; `None` when the buffer is empty.
    pub fn try_pop(&self) -> Option<T> {
        self.lock().pop()
    }

    /// Moves every element out under a single lock acquisition, oldest first.
    pub fn drain(&self) -> Vec<T> {
        let mut rb = self.lock();
        let mut out = Vec::with_capacity(rb.len());
        while let Some(item) = rb.pop() {
            out.push(item);
        }
        out
    }

    /// Blocks the calling thread until the buffer is non-empty.
    ///
    /// The lock is released while waiting and reacquired before returning.
    /// Another consumer may take the element between this returning and a
    /// subsequent pop; use [`pop_wait`](Self::pop_wait) for an atomic
    /// wait-then-pop.
    pub fn wait(&self) {
        let guard = self.lock();
        let _guard = self.nonempty.wait_while(guard, |rb| rb.is_empty()).unwrap();
    }

    /// As [`wait`](Self::wait), bounded by `timeout`. Returns whether the
    /// buffer was observed non-empty before the timeout elapsed.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        let guard = self.lock();
        let (_guard, result) = self
            .nonempty
            .wait_timeout_while(guard, timeout, |rb| rb.is_empty())
            .unwrap();
        !result.timed_out()
    }

    /// Waits until the buffer is non-empty, then pops, in one critical
    /// section. A `None` timeout blocks indefinitely; with a timeout, `None`
    /// is returned once it elapses with the buffer still empty.
    pub fn pop_wait(&self, timeout: Option<Duration>) -> Option<T> {
        let guard = self.lock();
        match timeout {
            None => {
                let mut guard = self.nonempty.wait_while(guard, |rb| rb.is_empty()).unwrap();
                guard.pop()
            }
            Some(timeout) => {
                let (mut guard, _) = self
                    .nonempty
                    .wait_timeout_while(guard, timeout, |rb| rb.is_empty())
                    .unwrap();
                guard.pop()
            }
        }
    }
}

impl<T, const N: usize> From<BulkRb<T, N>> for BlockingBulkRb<T, N> {
    fn from(inner: BulkRb<T, N>) -> Self {
        Self {
            inner: Mutex::new(inner),
            nonempty: Condvar::new(),
        }
    }
}
