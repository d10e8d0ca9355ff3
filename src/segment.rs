use crate::utils::uninit_array;
use core::{mem::MaybeUninit, ptr};

/// Fixed-capacity block of raw element storage.
///
/// A segment is pure storage: it does not track which of its slots are
/// occupied and never constructs or drops elements on its own. Occupancy is
/// implied by the owning buffer's head/tail cursors, and dropping a segment
/// performs no per-slot cleanup.
pub(crate) struct Segment<T, const N: usize> {
    slots: [MaybeUninit<T>; N],
}

impl<T, const N: usize> Segment<T, N> {
    pub fn new() -> Self {
        Self { slots: uninit_array() }
    }

    /// Constructs `value` in place.
    ///
    /// # Safety
    ///
    /// `slot < N` and the slot must be empty.
    #[inline]
    pub unsafe fn write(&mut self, slot: usize, value: T) {
        debug_assert!(slot < N);
        self.slots.get_unchecked_mut(slot).write(value);
    }

    /// Moves the element out, leaving the slot uninitialized.
    ///
    /// # Safety
    ///
    /// `slot < N` and the slot must hold a live element that is not accessed
    /// again.
    #[inline]
    pub unsafe fn read(&self, slot: usize) -> T {
        debug_assert!(slot < N);
        self.slots.get_unchecked(slot).assume_init_read()
    }

    /// # Safety
    ///
    /// `slot < N` and the slot must hold a live element.
    #[inline]
    pub unsafe fn get_ref(&self, slot: usize) -> &T {
        debug_assert!(slot < N);
        self.slots.get_unchecked(slot).assume_init_ref()
    }

    /// Destroys the element in place.
    ///
    /// # Safety
    ///
    /// `slot < N` and the slot must hold a live element that is not accessed
    /// again.
    #[inline]
    pub unsafe fn drop_in_place(&mut self, slot: usize) {
        debug_assert!(slot < N);
        self.slots.get_unchecked_mut(slot).assume_init_drop();
    }

    /// Relocates the first `count` slots of `src` into the first `count`
    /// slots of `dst`, in ascending order, leaving the source slots
    /// uninitialized.
    ///
    /// The only primitive that moves elements across segment boundaries; used
    /// by the growth algorithm when the wrapped tail run shares a segment with
    /// head.
    ///
    /// # Safety
    ///
    /// `count <= N`, slots `0..count` of `src` must hold live elements and the
    /// same slots of `dst` must be empty.
    pub unsafe fn move_range(src: &mut Self, dst: &mut Self, count: usize) {
        debug_assert!(count <= N);
        ptr::copy_nonoverlapping(src.slots.as_ptr(), dst.slots.as_mut_ptr(), count);
    }
}
