//! Size Sets

use serde::{Deserialize, Serialize};

use crate::{products::Size, tags::collection::TagCollection};

/// A set of garment sizes stored as a bit mask, one bit per [`Size`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Size>", into = "Vec<Size>")]
pub struct SizeSet {
    bits: u8,
}

impl SizeSet {
    /// Create a set holding every size in the fixed range.
    #[must_use]
    pub fn all() -> Self {
        Size::ALL.into_iter().collect()
    }

    /// Iterate over the sizes in the set, smallest first.
    pub fn iter(self) -> impl Iterator<Item = Size> {
        Size::ALL
            .into_iter()
            .filter(move |size| self.bits & size.bit() != 0)
    }
}

impl TagCollection for SizeSet {
    type Tag = Size;

    fn intersects(&self, other: &Self) -> bool {
        self.bits & other.bits != 0
    }

    fn contains(&self, size: &Size) -> bool {
        self.bits & size.bit() != 0
    }

    fn is_empty(&self) -> bool {
        self.bits == 0
    }

    fn len(&self) -> usize {
        self.iter().count()
    }

    fn add(&mut self, size: &Size) {
        self.bits |= size.bit();
    }

    fn remove(&mut self, size: &Size) {
        self.bits &= !size.bit();
    }
}

impl FromIterator<Size> for SizeSet {
    fn from_iter<I: IntoIterator<Item = Size>>(iter: I) -> Self {
        let mut set = Self::default();

        for size in iter {
            set.add(&size);
        }

        set
    }
}

impl From<Vec<Size>> for SizeSet {
    fn from(sizes: Vec<Size>) -> Self {
        sizes.into_iter().collect()
    }
}

impl From<SizeSet> for Vec<Size> {
    fn from(set: SizeSet) -> Self {
        set.iter().collect()
    }
}

impl<const N: usize> From<[Size; N]> for SizeSet {
    fn from(sizes: [Size; N]) -> Self {
        sizes.into_iter().collect()
    }
}
