use core::mem::MaybeUninit;

// TODO: Remove on `maybe_uninit_uninit_array` stabilization.
pub(crate) fn uninit_array<T, const N: usize>() -> [MaybeUninit<T>; N] {
    unsafe { MaybeUninit::<[MaybeUninit<T>; N]>::uninit().assume_init() }
}
