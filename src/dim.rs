use std::fmt::Debug;

use crate::error::{Axis, MatrixError, Result};

/// Extent specifier marking an axis whose length is only known at runtime.
pub const DYNAMIC: isize = -1;

/// The extent of one matrix axis, either fixed in the type ([`Const`]) or
/// carried as a runtime value ([`Dyn`]).
pub trait Dim: Copy + Debug + PartialEq + Eq + 'static {
    /// The compile-time extent, or [`DYNAMIC`].
    const EXTENT: isize;

    /// The extent as a plain count.
    fn value(&self) -> usize;

    /// The extent an axis takes when no count is given: the static value for
    /// `Const`, zero for `Dyn`.
    fn default_extent() -> Self;

    /// Build the extent from a runtime count; `None` when a static extent is
    /// asked to hold a different count.
    fn from_usize(n: usize) -> Option<Self>;

    #[inline]
    fn is_dynamic() -> bool {
        Self::EXTENT == DYNAMIC
    }
}

/// A compile-time extent. `N` must not exceed `isize::MAX`; a larger value
/// fails to compile as soon as [`Dim::EXTENT`] is evaluated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Const<const N: usize>;

/// A runtime extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dyn(pub usize);

impl<const N: usize> Dim for Const<N> {
    const EXTENT: isize = {
        assert!(N <= isize::MAX as usize, "static extent exceeds isize::MAX");
        N as isize
    };
    #[inline]
    fn value(&self) -> usize {
        N
    }
    #[inline]
    fn default_extent() -> Self {
        Const
    }
    #[inline]
    fn from_usize(n: usize) -> Option<Self> {
        if n == N {
            Some(Const)
        } else {
            None
        }
    }
}

impl Dim for Dyn {
    const EXTENT: isize = DYNAMIC;
    #[inline]
    fn value(&self) -> usize {
        self.0
    }
    #[inline]
    fn default_extent() -> Self {
        Dyn(0)
    }
    #[inline]
    fn from_usize(n: usize) -> Option<Self> {
        Some(Dyn(n))
    }
}

/// Resolve a runtime `(rows, cols)` pair against the extents of `R` and `C`.
pub(crate) fn resolve_shape<R: Dim, C: Dim>(rows: usize, cols: usize) -> Result<(R, C)> {
    let r = R::from_usize(rows).ok_or(MatrixError::ShapeMismatch {
        axis: Axis::Row,
        expected: R::EXTENT as usize,
        found: rows,
    })?;
    let c = C::from_usize(cols).ok_or(MatrixError::ShapeMismatch {
        axis: Axis::Column,
        expected: C::EXTENT as usize,
        found: cols,
    })?;
    Ok((r, c))
}

/// `rows * cols`, refusing to wrap.
#[inline]
pub(crate) fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(MatrixError::CapacityOverflow)
}
