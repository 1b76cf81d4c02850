use super::handle::Handle;

/// Number of nodes in a subtree, including its root.
///
/// Shares the representation of [`Handle`]: a tree can never hold more nodes
/// than the arena can address, so the same bound applies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    #[cfg(test)]
    pub(crate) const ZERO: Self = Self::from_usize(0);
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::new(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.get()
    }

    #[inline]
    pub(crate) const fn increment(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }

    #[inline]
    pub(crate) const fn decrement(self) -> Self {
        let size = self.to_usize();
        assert!(size > 0, "`Size::decrement()` - `size` is zero!");
        Self::from_usize(size - 1)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Size, Option<Size>);
    assert_eq_size!(Size, Handle);

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn invalid_size() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    #[test]
    #[should_panic(expected = "`Size::decrement()` - `size` is zero!")]
    fn decrement_zero() {
        let _ = Size::ZERO.decrement();
    }

    #[test]
    fn constants() {
        assert_eq!(Size::ZERO.to_usize(), 0);
        assert_eq!(Size::ONE.to_usize(), 1);
        assert_eq!(Size::ZERO.increment(), Size::ONE);
        assert_eq!(Size::ONE.decrement(), Size::ZERO);
    }

    proptest! {
        #[test]
        fn size_round_trip(index in 0..=Size::MAX) {
            let size = Size::from_usize(index);
            prop_assert_eq!(size.to_usize(), index);
        }

        #[test]
        fn increment_then_decrement(index in 0..Size::MAX) {
            let size = Size::from_usize(index);
            prop_assert_eq!(size.increment().decrement(), size);
        }
    }
}
