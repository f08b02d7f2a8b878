//! Border-distance profiles
//!
//! A [`BorderProfile`] records, for one vertex of a cluster, the shortest-path
//! length and the shortest-path count to each border vertex of that cluster.
//! Index `i` always denotes the i-th border vertex; which graph vertex that is
//! lives with the caller.
//!
//! Two vertices whose normalized profiles compare equal reach the cluster
//! boundary identically, so shortest-path accumulation through the cluster
//! only has to be done once for the whole group.

mod arith;
pub mod element;

pub use element::ProfileElement;

use crate::error::{Error, Result};
use element::{cast, cast_all};
use num_traits::Signed;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Widths below this run elementwise loops sequentially
pub(crate) const PARALLEL_THRESHOLD: usize = 1000;

/// Shortest-path length (`W`) and count (`V`) from a vertex to every border
/// vertex of its cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorderProfile<V, W> {
    lengths: Vec<W>,
    counts: Vec<V>,
}

impl<V, W> BorderProfile<V, W> {
    /// Number of border vertices this profile covers
    pub fn border_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn lengths(&self) -> &[W] {
        &self.lengths
    }

    pub fn counts(&self) -> &[V] {
        &self.counts
    }
}

impl<V, W> BorderProfile<V, W>
where
    V: ProfileElement,
    W: ProfileElement + Signed,
{
    /// Zero-filled profile with `border_count` entries
    pub fn new(border_count: usize) -> Self {
        Self {
            lengths: vec![W::zero(); border_count],
            counts: vec![V::zero(); border_count],
        }
    }

    /// Convert a profile of another parameterization, adopting its width
    pub fn from_profile<N, E>(source: &BorderProfile<N, E>) -> Result<Self>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        Ok(Self {
            lengths: cast_all(&source.lengths)?,
            counts: cast_all(&source.counts)?,
        })
    }

    /// Overwrite this profile with a converted copy of `source`.
    ///
    /// The width follows the source. On a conversion failure `self` is left
    /// untouched.
    pub fn assign_from<N, E>(&mut self, source: &BorderProfile<N, E>) -> Result<()>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        *self = Self::from_profile(source)?;
        Ok(())
    }

    /// Shortest-path length to border `index`
    pub fn length(&self, index: usize) -> Result<W> {
        self.check_index(index)?;
        Ok(self.lengths[index])
    }

    pub fn set_length(&mut self, index: usize, value: W) -> Result<()> {
        self.check_index(index)?;
        self.lengths[index] = value;
        Ok(())
    }

    /// Shortest-path count to border `index`
    pub fn count(&self, index: usize) -> Result<V> {
        self.check_index(index)?;
        Ok(self.counts[index])
    }

    pub fn set_count(&mut self, index: usize, value: V) -> Result<()> {
        self.check_index(index)?;
        self.counts[index] = value;
        Ok(())
    }

    /// Smallest length, or zero for a profile without borders
    pub fn min_length(&self) -> W {
        self.lengths
            .iter()
            .copied()
            .reduce(|min, x| if x < min { x } else { min })
            .unwrap_or_else(W::zero)
    }

    /// Shift all lengths so the smallest becomes zero.
    ///
    /// Profiles that only differ by a constant depth offset become equal. A
    /// shifted length that leaves the range of `W` fails with
    /// [`Error::Overflow`] and leaves the profile untouched.
    pub fn normalize(&mut self) -> Result<&mut Self> {
        let min = self.min_length();
        if !min.is_zero() {
            self.lengths = self.shifted_lengths(min)?;
        }
        Ok(self)
    }

    /// Normalized copy
    pub fn normalized(&self) -> Result<Self> {
        let mut copy = self.clone();
        copy.normalize()?;
        Ok(copy)
    }

    /// Zero both sequences, keeping the width
    pub fn reset(&mut self) {
        self.lengths.iter_mut().for_each(|l| *l = W::zero());
        self.counts.iter_mut().for_each(|c| *c = V::zero());
    }

    /// Sum over borders of squared length and count differences, in `W`
    pub fn squared_distance<N, E>(&self, other: &BorderProfile<N, E>) -> Result<W>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        self.check_shape(other.border_count())?;

        let overflow = || Error::Overflow {
            operation: "squared distance",
        };
        let square = |d: W| d.try_mul(d).ok_or_else(overflow);

        let mut total = W::zero();
        for i in 0..self.border_count() {
            let dl = self.lengths[i]
                .try_sub(cast::<E, W>(other.lengths[i])?)
                .ok_or_else(overflow)?;
            let dc = cast::<V, W>(self.counts[i])?
                .try_sub(cast::<N, W>(other.counts[i])?)
                .ok_or_else(overflow)?;
            total = total.try_add(square(dl)?).ok_or_else(overflow)?;
            total = total.try_add(square(dc)?).ok_or_else(overflow)?;
        }
        Ok(total)
    }

    /// Ordering primitive behind equality and ordering of profiles.
    ///
    /// Counts are scanned first in border order and the first nonzero
    /// difference is returned; only when every count ties are lengths scanned
    /// the same way. Zero means the profiles are interchangeable. A difference
    /// that does not fit in `W` fails with [`Error::Overflow`].
    pub fn compare<N, E>(&self, other: &BorderProfile<N, E>) -> Result<W>
    where
        N: ProfileElement,
        E: ProfileElement,
    {
        self.check_shape(other.border_count())?;

        let difference = |a: W, b: W| {
            a.try_sub(b).ok_or(Error::Overflow {
                operation: "comparison",
            })
        };

        for (&a, &b) in self.counts.iter().zip(&other.counts) {
            let diff = difference(cast::<V, W>(a)?, cast::<N, W>(b)?)?;
            if !diff.is_zero() {
                return Ok(diff);
            }
        }

        for (&a, &b) in self.lengths.iter().zip(&other.lengths) {
            let diff = difference(a, cast::<E, W>(b)?)?;
            if !diff.is_zero() {
                return Ok(diff);
            }
        }

        Ok(W::zero())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.border_count() {
            return Err(Error::IndexOutOfRange {
                index,
                border_count: self.border_count(),
            });
        }
        Ok(())
    }

    fn check_shape(&self, other: usize) -> Result<()> {
        if self.border_count() != other {
            return Err(Error::ShapeMismatch {
                left: self.border_count(),
                right: other,
            });
        }
        Ok(())
    }

    fn shifted_lengths(&self, min: W) -> Result<Vec<W>> {
        let shifted: Option<Vec<W>> = if self.border_count() < PARALLEL_THRESHOLD {
            self.lengths.iter().map(|&l| l.try_sub(min)).collect()
        } else {
            self.lengths.par_iter().map(|&l| l.try_sub(min)).collect()
        };
        shifted.ok_or(Error::Overflow {
            operation: "normalization",
        })
    }
}

impl<V, W> PartialEq for BorderProfile<V, W>
where
    V: ProfileElement,
    W: ProfileElement,
{
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts && self.lengths == other.lengths
    }
}

impl<V, W> PartialOrd for BorderProfile<V, W>
where
    V: ProfileElement,
    W: ProfileElement,
{
    /// Count-first lexicographic order; profiles of different widths are
    /// unordered
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.lengths.len() != other.lengths.len() {
            return None;
        }

        for (a, b) in self.counts.iter().zip(&other.counts) {
            match a.partial_cmp(b)? {
                Ordering::Equal => continue,
                ord => return Some(ord),
            }
        }

        for (a, b) in self.lengths.iter().zip(&other.lengths) {
            match a.partial_cmp(b)? {
                Ordering::Equal => continue,
                ord => return Some(ord),
            }
        }

        Some(Ordering::Equal)
    }
}
