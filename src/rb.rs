use crate::{
    chain::{Chain, Cursor},
    error::{CapacityError, PushError},
    iter::Iter,
    segment::Segment,
};

/// Segmented FIFO ring buffer for single-threaded use.
///
/// Storage is a chain of fixed-size segments of `N` slots each; total
/// capacity is always a whole number of segments. The buffer owns every
/// element lifetime: slots are raw storage and an element is live exactly
/// when its position lies in the head..tail walk.
///
/// Pushing into a full buffer grows the chain by one segment, up to the
/// configured maximum capacity. Growth inserts segments without moving live
/// elements, with a single exception described at [`BulkRb::reserve`].
///
/// No internal synchronization; for concurrent use wrap it in
/// `bulkring-blocking`'s `BlockingBulkRb`.
pub struct BulkRb<T, const N: usize> {
    chain: Chain<T, N>,
    /// Position of the oldest live element; meaningless when `len == 0`.
    head: Cursor,
    /// Next write position.
    tail: Cursor,
    len: usize,
    /// Cleared when the logical queue has wrapped past the end of the chain,
    /// i.e. tail's position in segment order is no longer strictly after
    /// head's. Tells a full buffer from an empty one when `head == tail` and
    /// selects the growth strategy in [`BulkRb::reserve`].
    head_precedes_tail: bool,
    max_capacity: usize,
}

impl<T, const N: usize> BulkRb<T, N> {
    /// Creates a buffer of `segments` segments with no upper bound on growth.
    ///
    /// *Panics if `N` or `segments` is zero.*
    pub fn new(segments: usize) -> Self {
        Self::with_max_capacity(segments, usize::MAX)
    }

    /// Creates a buffer whose total capacity never grows beyond
    /// `max_capacity` slots.
    ///
    /// Capacity moves in whole segments, so the effective bound is the
    /// largest multiple of `N` not exceeding `max_capacity`.
    ///
    /// *Panics if `N` or `segments` is zero, or if the initial capacity
    /// already exceeds `max_capacity`.*
    pub fn with_max_capacity(segments: usize, max_capacity: usize) -> Self {
        assert!(N > 0, "bulk size must be greater than zero");
        let chain = Chain::<T, N>::with_segments(segments);
        assert!(
            chain.len() * N <= max_capacity,
            "initial capacity exceeds the configured maximum"
        );
        Self {
            chain,
            head: Cursor::ORIGIN,
            tail: Cursor::ORIGIN,
            len: 0,
            head_precedes_tail: true,
            max_capacity,
        }
    }

    /// Count of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slot count, always `N * bulk_count()`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.chain.len() * N
    }

    /// Number of segments in the chain.
    #[inline]
    pub fn bulk_count(&self) -> usize {
        self.chain.len()
    }

    /// Upper bound on total capacity in slots; `usize::MAX` means unlimited.
    #[inline]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Reference to the oldest element, `None` when empty.
    pub fn front(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            Some(unsafe { self.slot_ref(self.head) })
        }
    }

    /// Reference to the newest element, `None` when empty.
    pub fn back(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            let linear = (self.head.linear::<N>() + self.len - 1) % self.capacity();
            Some(unsafe { self.slot_ref(Cursor::from_linear::<N>(linear)) })
        }
    }

    /// Iterates over the live elements, oldest first.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter::new(self)
    }

    /// Appends `value`, growing by one segment when full.
    ///
    /// Fails only when growth would exceed the configured maximum capacity;
    /// the value is handed back inside the error.
    pub fn push(&mut self, value: T) -> Result<(), PushError<T>> {
        if self.ensure_capacity().is_err() {
            return Err(PushError::MaxCapacity(value));
        }
        self.write_tail(value);
        Ok(())
    }

    /// Appends the result of `f`, growing by one segment when full.
    ///
    /// The closure runs only after a free slot is secured and its result is
    /// written straight into the slot; on a capacity error it is dropped
    /// without being called.
    pub fn push_with<F: FnOnce() -> T>(&mut self, f: F) -> Result<(), CapacityError> {
        self.ensure_capacity()?;
        self.write_tail(f());
        Ok(())
    }

    /// Appends `value` without growing; hands it back when the buffer is
    /// full.
    pub fn try_push(&mut self, value: T) -> Result<(), T> {
        if self.len == self.capacity() {
            return Err(value);
        }
        self.write_tail(value);
        Ok(())
    }

    /// Appends items from an iterator until it is exhausted or growth fails.
    ///
    /// Returns the number of items appended.
    pub fn push_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) -> usize {
        let mut count = 0;
        for item in iter {
            if self.push(item).is_err() {
                break;
            }
            count += 1;
        }
        count
    }

    /// Removes and returns the oldest element, `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = unsafe { self.chain.segment(self.head.seg).read(self.head.slot) };
        self.len -= 1;
        if self.len == 0 {
            self.reset();
        } else if self.head.advance::<N>(self.chain.len()) {
            self.head_precedes_tail = true;
        }
        Some(value)
    }

    /// Drops every live element and resets to the canonical empty state.
    pub fn clear(&mut self) {
        // Count-bounded walk: visits the element just before tail exactly
        // once, whatever the wrap state.
        let mut cursor = self.head;
        for _ in 0..self.len {
            unsafe { self.chain.segment_mut(cursor.seg).drop_in_place(cursor.slot) };
            cursor.advance::<N>(self.chain.len());
        }
        self.len = 0;
        self.reset();
    }

    /// Grows the chain until total capacity is at least `new_capacity` slots.
    ///
    /// No-op when the buffer is already large enough. Capacity is added in
    /// whole segments and never removed. Live elements keep their storage
    /// with one exception: when the queue has wrapped and the wrapped tail
    /// run shares a segment with head, that run (the slots below head in the
    /// shared segment) is relocated into the first newly inserted segment so
    /// the free region stays contiguous in segment order.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), CapacityError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        let add = (new_capacity - self.capacity()).div_ceil(N);
        let grown = self.capacity() + add * N;
        if grown > self.max_capacity {
            return Err(CapacityError {
                requested: grown,
                max: self.max_capacity,
            });
        }
        if self.len == 0 {
            self.chain.append(add);
            self.reset();
        } else if self.head_precedes_tail {
            // Not wrapped: the free region already ends at the chain's end.
            self.chain.append(add);
        } else {
            // Wrapped: the free region ends just below head, so the new
            // segments go right before head's segment.
            let pivot = self.head.seg;
            let shared = self.head.seg == self.tail.seg;
            let run = self.tail.slot;
            self.chain.insert(pivot, add);
            if shared {
                // The wrapped tail run occupies the slots below head in the
                // pivot segment (now shifted by `add`); move it into the
                // first inserted segment and repoint tail past it.
                if run > 0 {
                    let (dst, src) = self.chain.pair_mut(pivot, pivot + add);
                    unsafe { Segment::move_range(src, dst, run) };
                }
                self.tail = Cursor { seg: pivot, slot: run };
            }
            self.head.seg += add;
        }
        debug_assert!(self.len < self.capacity());
        Ok(())
    }

    /// Makes room for one more element, growing by exactly one segment when
    /// full.
    fn ensure_capacity(&mut self) -> Result<(), CapacityError> {
        if self.len == self.capacity() {
            self.reserve(self.capacity() + N)?;
        }
        debug_assert!(self.len < self.capacity());
        Ok(())
    }

    /// Writes at tail and claims the slot. Caller ensures a free slot exists.
    fn write_tail(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        let tail = self.tail;
        unsafe { self.chain.segment_mut(tail.seg).write(tail.slot, value) };
        if self.tail.advance::<N>(self.chain.len()) {
            self.head_precedes_tail = false;
        }
        self.len += 1;
    }

    /// Canonical empty state: both cursors at the chain origin.
    fn reset(&mut self) {
        debug_assert_eq!(self.len, 0);
        self.head = Cursor::ORIGIN;
        self.tail = Cursor::ORIGIN;
        self.head_precedes_tail = true;
    }

    pub(crate) fn head_cursor(&self) -> Cursor {
        self.head
    }

    /// # Safety
    ///
    /// `cursor` must address a live element.
    pub(crate) unsafe fn slot_ref(&self, cursor: Cursor) -> &T {
        self.chain.segment(cursor.seg).get_ref(cursor.slot)
    }
}

impl<T, const N: usize> Drop for BulkRb<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}
