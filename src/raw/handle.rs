use core::num::NonZero;

// Narrow under test so the capacity limit is reachable.
#[cfg(test)]
type Repr = u16;
#[cfg(not(test))]
type Repr = u32;

/// Position of a node in the arena.
///
/// The slot is stored plus one in a `NonZero`, so a child link
/// (`Option<Handle>`) is exactly as wide as the integer behind it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<Repr>);

impl Handle {
    /// Largest slot a handle can name.
    pub(crate) const MAX: usize = (Repr::MAX - 1) as usize;

    /// Returns the handle naming `slot`, or `None` if it is past [`MAX`](Self::MAX).
    #[inline]
    pub(crate) const fn checked(slot: usize) -> Option<Self> {
        if slot > Self::MAX {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new((slot + 1) as Repr) {
            Some(repr) => Some(Self(repr)),
            None => None,
        }
    }

    #[inline]
    pub(crate) const fn new(slot: usize) -> Self {
        match Self::checked(slot) {
            Some(handle) => handle,
            None => panic!("`Handle::new()` - `slot` > `Handle::MAX`!"),
        }
    }

    /// The arena slot this handle names.
    #[inline]
    pub(crate) const fn get(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Child links cost no more than the bare integer.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Option<Handle>, Repr);

    #[test]
    #[should_panic(expected = "`Handle::new()` - `slot` > `Handle::MAX`!")]
    fn slot_past_max_panics() {
        let _ = Handle::new(Handle::MAX + 1);
    }

    #[test]
    fn checked_stops_at_max() {
        assert_eq!(Handle::checked(0).map(Handle::get), Some(0));
        assert_eq!(Handle::checked(Handle::MAX).map(Handle::get), Some(Handle::MAX));
        assert_eq!(Handle::checked(Handle::MAX + 1), None);
        assert_eq!(Handle::checked(usize::MAX), None);
    }

    proptest! {
        #[test]
        fn slot_round_trip(slot in 0..=Handle::MAX) {
            prop_assert_eq!(Handle::new(slot).get(), slot);
            prop_assert_eq!(Handle::checked(slot), Some(Handle::new(slot)));
        }
    }
}
