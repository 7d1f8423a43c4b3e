use core::num::NonZero;

#[cfg(test)]
pub(crate) type RawHandle = u16;
#[cfg(not(test))]
pub(crate) type RawHandle = u32;

/// A link to a node slot in the arena.
///
/// Stored off by one inside a `NonZero` so that `Option<Handle>`, the type of
/// every child link, costs no more than the handle itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// The largest slot index a handle can address.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` is non-zero and fits after the assert above.
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new((index + 1) as RawHandle) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
