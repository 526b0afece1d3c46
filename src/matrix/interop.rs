//! Conversions between this crate's matrices and `nalgebra`.
//!
//! Both layouts are row-major on this side and column-major on the
//! nalgebra side, so every conversion re-orders the elements.
use nalgebra as na;

use crate::alloc::{Global, RawAllocator};
use crate::dim::{Const, Dim, Dyn};
use crate::error::unwrap_or_abort;
use crate::matrix::{DMatrix, Matrix, SMatrix};
use crate::storage::{HeapStorage, InlineStorage, ShapeStorage};

impl<T: na::Scalar> From<&na::DMatrix<T>> for DMatrix<T> {
    fn from(other: &na::DMatrix<T>) -> Self {
        let (rows, cols) = other.shape();
        let data = unwrap_or_abort(HeapStorage::from_fn_in(rows * cols, Global, |k| {
            other[(k / cols, k % cols)].clone()
        }));
        Matrix::from_parts(Dyn(rows), Dyn(cols), data)
    }
}

impl<T: na::Scalar, const R: usize, const C: usize> From<na::SMatrix<T, R, C>> for SMatrix<T, R, C> {
    fn from(other: na::SMatrix<T, R, C>) -> Self {
        let data = InlineStorage::from_fn(|k| other[(k / C, k % C)].clone());
        Matrix::from_parts(Const, Const, data)
    }
}

impl<T: na::Scalar, R: Dim, C: Dim, A: RawAllocator> Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    /// Copy into a dynamically sized nalgebra matrix.
    ///
    /// Returns `None` while the elements have not been materialized, i.e.
    /// for a matrix created by `with_shape` with a non-zero shape.
    pub fn to_nalgebra(&self) -> Option<na::DMatrix<T>> {
        let (rows, cols) = self.shape();
        if self.size() != rows * cols {
            return None;
        }
        Some(na::DMatrix::from_row_slice(rows, cols, self.as_slice()))
    }
}
