use crate::{chain::Cursor, rb::BulkRb};
use core::iter::FusedIterator;

/// Forward iterator over the live elements of a [`BulkRb`], oldest first.
///
/// Walks from head toward tail, crossing segment boundaries and wrapping past
/// the end of the chain.
pub struct Iter<'a, T, const N: usize> {
    rb: &'a BulkRb<T, N>,
    cursor: Cursor,
    remaining: usize,
}

impl<'a, T, const N: usize> Iter<'a, T, N> {
    pub(crate) fn new(rb: &'a BulkRb<T, N>) -> Self {
        Self {
            rb,
            cursor: rb.head_cursor(),
            remaining: rb.len(),
        }
    }
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let item = unsafe { self.rb.slot_ref(self.cursor) };
        self.cursor.advance::<N>(self.rb.bulk_count());
        self.remaining -= 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}
impl<T, const N: usize> FusedIterator for Iter<'_, T, N> {}

impl<'a, T, const N: usize> IntoIterator for &'a BulkRb<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
