use std::fmt;

use serde::Serialize;

use crate::city::City;

/// A set of city indices packed into the low bits of a `u32`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SubsetMask(u32);

impl SubsetMask {
    pub const EMPTY: SubsetMask = SubsetMask(0);

    #[inline(always)]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub const fn single(index: usize) -> Self {
        Self(1 << index)
    }

    /// Every index in `0..n`.
    #[inline(always)]
    pub const fn full(n: usize) -> Self {
        if n == 0 {
            Self(0)
        } else {
            Self(u32::MAX >> (32 - n))
        }
    }

    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn contains(self, index: usize) -> bool {
        (self.0 >> index) & 1 == 1
    }

    #[inline(always)]
    pub const fn with(self, index: usize) -> Self {
        Self(self.0 | (1 << index))
    }

    /// Predecessor subset: flips `index` off. Callers only pass members.
    #[inline(always)]
    pub const fn without(self, index: usize) -> Self {
        Self(self.0 ^ (1 << index))
    }

    #[inline(always)]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Member indices in ascending order.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        let mut rest = self.0;
        std::iter::from_fn(move || {
            if rest == 0 {
                return None;
            }
            let index = rest.trailing_zeros() as usize;
            rest &= rest - 1;
            Some(index)
        })
    }

    /// Masks over `n` cities with exactly `size` members that include `required`,
    /// in ascending numeric order.
    pub fn with_len(n: usize, size: usize, required: usize) -> impl Iterator<Item = SubsetMask> {
        let upper = Self::full(n).0;
        (1..=upper)
            .map(SubsetMask)
            .filter(move |mask| mask.contains(required) && mask.len() == size)
    }
}

impl fmt::Binary for SubsetMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

/// Turns masks into the `{A,C,D}` keys shown in the DP table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubsetCodec {
    names: Vec<String>,
}

impl SubsetCodec {
    pub fn new(cities: &[City]) -> Self {
        Self { names: cities.iter().map(|c| c.name.clone()).collect() }
    }

    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn key(&self, mask: SubsetMask) -> String {
        let members: Vec<&str> = mask.indices().map(|i| self.name(i)).collect();
        format!("{{{}}}", members.join(","))
    }

    /// `A->B->C` style rendering of an index path.
    pub fn path(&self, path: &[usize], separator: &str) -> String {
        let names: Vec<&str> = path.iter().map(|&i| self.name(i)).collect();
        names.join(separator)
    }
}
