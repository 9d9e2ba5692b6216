//! Match length bounds.

use std::ops::Add;

/// A bound on the length of text a node can match, counted in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Len {
    /// An exact finite bound.
    Finite(usize),
    /// No finite bound exists.
    Unbounded,
    /// The bound cannot be determined (an unresolved backreference).
    Unknown,
}

impl Len {
    pub const ZERO: Self = Len::Finite(0);

    #[must_use]
    pub const fn is_finite(self) -> bool {
        matches!(self, Len::Finite(_))
    }

    /// Returns the finite value, if there is one.
    #[must_use]
    pub const fn finite(self) -> Option<usize> {
        match self {
            Len::Finite(n) => Some(n),
            Len::Unbounded | Len::Unknown => None,
        }
    }

    /// The smaller of two bounds. [`Len::Unknown`] taints the result.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        match (self, other) {
            (Len::Unknown, _) | (_, Len::Unknown) => Len::Unknown,
            (Len::Unbounded, bound) | (bound, Len::Unbounded) => bound,
            (Len::Finite(a), Len::Finite(b)) => Len::Finite(a.min(b)),
        }
    }

    /// The larger of two bounds. [`Len::Unknown`] taints the result.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        match (self, other) {
            (Len::Unknown, _) | (_, Len::Unknown) => Len::Unknown,
            (Len::Unbounded, _) | (_, Len::Unbounded) => Len::Unbounded,
            (Len::Finite(a), Len::Finite(b)) => Len::Finite(a.max(b)),
        }
    }

    /// Scales the bound by a repetition count, where [`None`] is an
    /// unbounded count. A zero count always yields zero.
    #[must_use]
    pub fn times(self, count: Option<usize>) -> Self {
        match (self, count) {
            (_, Some(0)) => Len::ZERO,
            (Len::Unknown, _) => Len::Unknown,
            (_, None) | (Len::Unbounded, _) => Len::Unbounded,
            (Len::Finite(n), Some(count)) => Len::Finite(n.saturating_mul(count)),
        }
    }
}

impl Add for Len {
    type Output = Len;

    fn add(self, rhs: Len) -> Len {
        match (self, rhs) {
            (Len::Unknown, _) | (_, Len::Unknown) => Len::Unknown,
            (Len::Unbounded, _) | (_, Len::Unbounded) => Len::Unbounded,
            (Len::Finite(a), Len::Finite(b)) => Len::Finite(a.saturating_add(b)),
        }
    }
}
