use crate::segment::Segment;
use alloc::{boxed::Box, vec::Vec};

/// Ordered sequence of heap-allocated segments.
///
/// Segments are boxed so element addresses stay stable while the sequence of
/// handles is rearranged: growth appends or inserts handles, it never moves a
/// segment's storage. The chain always holds at least one segment and
/// segments are never removed.
pub(crate) struct Chain<T, const N: usize> {
    segments: Vec<Box<Segment<T, N>>>,
}

impl<T, const N: usize> Chain<T, N> {
    pub fn with_segments(count: usize) -> Self {
        assert!(count > 0, "chain must hold at least one segment");
        let mut segments = Vec::with_capacity(count);
        segments.resize_with(count, || Box::new(Segment::new()));
        Self { segments }
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn segment(&self, index: usize) -> &Segment<T, N> {
        &self.segments[index]
    }

    #[inline]
    pub fn segment_mut(&mut self, index: usize) -> &mut Segment<T, N> {
        &mut self.segments[index]
    }

    /// Appends `count` empty segments at the end of the chain.
    pub fn append(&mut self, count: usize) {
        self.segments
            .resize_with(self.segments.len() + count, || Box::new(Segment::new()));
    }

    /// Inserts `count` empty segments before position `at`.
    pub fn insert(&mut self, at: usize, count: usize) {
        debug_assert!(at <= self.segments.len());
        self.segments.reserve(count);
        for _ in 0..count {
            self.segments.insert(at, Box::new(Segment::new()));
        }
    }

    /// Mutably borrows two distinct segments at once.
    pub fn pair_mut(&mut self, first: usize, second: usize) -> (&mut Segment<T, N>, &mut Segment<T, N>) {
        debug_assert!(first < second);
        let (left, right) = self.segments.split_at_mut(second);
        (&mut left[first], &mut right[0])
    }
}

/// Position of one slot inside the chain.
///
/// The forward-iteration core: `advance` steps one slot, crosses into the
/// next segment at a segment boundary and wraps to the chain origin past the
/// last segment, reporting the wrap to the caller. Single-pass only; there is
/// no decrement and no random access.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Cursor {
    pub seg: usize,
    pub slot: usize,
}

impl Cursor {
    pub const ORIGIN: Self = Self { seg: 0, slot: 0 };

    /// Steps forward one slot; returns whether the step wrapped past the last
    /// segment back to the origin.
    #[inline]
    pub fn advance<const N: usize>(&mut self, bulk_count: usize) -> bool {
        self.slot += 1;
        if self.slot == N {
            self.slot = 0;
            self.seg += 1;
            if self.seg == bulk_count {
                self.seg = 0;
                return true;
            }
        }
        false
    }

    /// Logical slot index in chain order.
    #[inline]
    pub fn linear<const N: usize>(&self) -> usize {
        self.seg * N + self.slot
    }

    pub fn from_linear<const N: usize>(index: usize) -> Self {
        Self {
            seg: index / N,
            slot: index % N,
        }
    }
}
