use std::ops::{Bound, RangeBounds, RangeInclusive};
use crate::Val;

/// The candidate values of an integer program variable.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Ranges {
    inner: ranges::Ranges<Val>,
}

impl Ranges {
    #[inline]
    pub fn intersection<R: Into<Ranges>>(&mut self, other: R) {
        let left = std::mem::take(&mut self.inner);
        self.inner = left & other.into().inner;
    }

    #[inline]
    pub fn contains(&self, val: Val) -> bool {
        self.inner.contains(&val)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Split into the candidates `<= val` and the candidates `> val`.
    /// Either half may be empty.
    pub fn split_after(&self, val: Val) -> (Ranges, Ranges) {
        let (min, max) = match self.get_bounds() {
            Some(bounds) => bounds,
            None => return (Ranges::default(), Ranges::default()),
        };

        let mut below = Ranges::default();
        if min <= val {
            below = self.clone();
            below.intersection(min..=val.min(max));
        }

        let mut above = Ranges::default();
        if val < max {
            above = self.clone();
            above.intersection((val + 1).max(min)..=max);
        }

        (below, above)
    }

    /// The smallest and largest candidates, or None if there are none.
    pub fn get_bounds(&self) -> Option<(Val, Val)> {
        if self.is_empty() {
            return None;
        }

        let slice = self.inner.as_slice();
        let first = slice.first()?.start_bound();
        let last = slice.last()?.end_bound();

        let min = match first {
            Bound::Included(val) => *val,
            Bound::Excluded(val) => val + 1,
            Bound::Unbounded => return None,
        };

        let max = match last {
            Bound::Included(val) => *val,
            Bound::Excluded(val) => val - 1,
            Bound::Unbounded => return None,
        };

        (min <= max).then_some((min, max))
    }
}

impl From<RangeInclusive<Val>> for Ranges {
    fn from(range: RangeInclusive<Val>) -> Self {
        Self {
            inner: range.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Ranges;

    #[test]
    fn test_split_after() {
        let domain = Ranges::from(0..=10);
        let (below, above) = domain.split_after(4);
        assert_eq!(below.get_bounds(), Some((0, 4)));
        assert_eq!(above.get_bounds(), Some((5, 10)));
        assert!(below.contains(4));
        assert!(!above.contains(4));
    }

    #[test]
    fn test_split_at_edge() {
        let domain = Ranges::from(3..=3);
        let (below, above) = domain.split_after(3);
        assert_eq!(below.get_bounds(), Some((3, 3)));
        assert!(above.is_empty());
        assert_eq!(above.get_bounds(), None);
    }
}
