//! Two-dimensional matrices whose row and column extents are either fixed at
//! compile time or chosen at run time.
//!
//! * [`SMatrix`] has both extents fixed and keeps its elements inline.
//! * [`DMatrix`] has both extents dynamic and keeps its elements in a heap
//!   buffer obtained from a [`RawAllocator`].
//! * [`Matrix`] with one [`Const`] and one [`Dyn`] extent mixes the two; any
//!   dynamic extent selects the heap buffer.
//!
//! Elements are stored in row-major order. They can be visited in row-major
//! order with [`Matrix::iter`] or in column-major order with
//! [`Matrix::column_iter`], and the whole matrix renders as text through
//! [`std::fmt::Display`]:
//! ```
//!   use matrix_base::SMatrix;
//!   let matr = SMatrix::<i32, 2, 2>::from_rows(&[[1, 2], [3, 4]]);
//!   assert_eq!(matr.column_iter().copied().collect::<Vec<_>>(), vec![1, 3, 2, 4]);
//!   assert_eq!(matr.to_string(), "{1, 2},\n{3, 4}");
//! ```
pub mod alloc;
pub mod dim;
pub mod error;
pub mod iter;
pub mod matrix;
pub mod storage;

pub use crate::alloc::{CountingAllocator, Global, RawAllocator};
pub use crate::dim::{Const, Dim, Dyn, DYNAMIC};
pub use crate::error::{Axis, MatrixError, Result};
pub use crate::iter::{
    ColumnIter, ColumnIterMut, ColumnMajor, Iter, IterMut, RowIter, RowIterMut, RowMajor, Traversal,
};
pub use crate::matrix::{DMatrix, Matrix, SMatrix};
pub use crate::storage::{HeapStorage, InlineStorage, ShapeStorage, Storage};

#[cfg(test)]
mod tests {
    use num_complex::Complex;
    use regex::Regex;

    use crate::{Axis, CountingAllocator, Const, DMatrix, Dyn, Matrix, MatrixError, SMatrix};

    #[test]
    fn static_default_assign_and_read_back() {
        let mut m = SMatrix::<i32, 2, 2>::new();
        assert!(!m.is_empty());
        assert_eq!(m.size(), 4);
        m[(0, 0)] = 1;
        m[(0, 1)] = 2;
        m[(1, 0)] = 3;
        m[(1, 1)] = 4;
        assert_eq!(m[(1, 0)], 3);
        assert_eq!(m.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn dynamic_default_is_empty() {
        let m = DMatrix::<f64>::new();
        assert_eq!(m.nrows(), 0);
        assert_eq!(m.ncols(), 0);
        assert!(m.is_empty());
    }

    #[test]
    fn dynamic_shape_only_reserves() {
        let m = DMatrix::<f64>::with_shape(2, 3);
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 3);
        assert_eq!(m.size(), 0);
        assert!(m.capacity() >= 6);
    }

    #[test]
    fn static_fill() {
        let m = SMatrix::<f64, 2, 3>::from_fill(0.0);
        assert_eq!(m.size(), 6);
        assert_eq!(m[(0, 0)], 0.0);
    }

    #[test]
    fn static_from_exact_buffer() {
        let m = SMatrix::<i32, 2, 4>::from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(m[(0, 0)], 1);
        assert_eq!(m[(1, 3)], 8);
        assert_eq!(m.size(), 8);
    }

    #[test]
    fn static_from_short_buffer_pads_tail() {
        let m = SMatrix::<i32, 3, 5>::from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(m.size(), 15);
        assert_eq!(m[(0, 0)], 1);
        assert_eq!(m[(2, 4)], 0);
        assert_eq!(m[(1, 2)], 8);
    }

    #[test]
    fn nested_source_renders() {
        let m = SMatrix::<i32, 2, 2>::from_rows(&[[1, 2], [3, 4]]);
        assert_eq!(m.to_string(), "{1, 2},\n{3, 4}");
        assert_eq!(DMatrix::<i32>::new().to_string(), "");
    }

    #[test]
    fn rendering_grammar() {
        let grammar = Regex::new(r"^\{-?\d+(, -?\d+)*\}(,\n\{-?\d+(, -?\d+)*\})*$").unwrap();
        let m = DMatrix::<i64>::from_iter_with_shape(-6..6, 4, 3);
        let text = m.to_string();
        assert!(grammar.is_match(&text), "{:?}", text);
        assert_eq!(text.matches('{').count(), 4);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn mixed_shape_round_trip() -> anyhow::Result<()> {
        let alloc = CountingAllocator::new("mixed");
        {
            let m = Matrix::<u8, Dyn, Const<3>, _>::from_iter_with_shape_in(1_u8..=6, 2, 3, alloc.clone())?;
            assert_eq!(m.shape(), (2, 3));
            assert_eq!(m.column_iter().copied().collect::<Vec<_>>(), vec![1, 4, 2, 5, 3, 6]);
            let copy = m.clone();
            assert_eq!(copy, m);
            assert_eq!(copy.allocator(), &alloc);
            assert_eq!(alloc.allocations(), 2);
        }
        assert!(alloc.is_balanced());
        Ok(())
    }

    #[test]
    fn mixed_shape_rejects_wrong_static_extent() {
        let res = Matrix::<u8, Const<2>, Dyn, _>::from_fill_with_shape_in(0, 3, 4, CountingAllocator::new("x"));
        assert!(matches!(
            res,
            Err(MatrixError::ShapeMismatch { axis: Axis::Row, expected: 2, found: 3 })
        ));
    }

    #[test]
    fn complex_elements() {
        let m = SMatrix::<Complex<f64>, 1, 2>::from_slice(&[Complex::new(1.0, 2.0)]);
        assert_eq!(m[(0, 1)], Complex::new(0.0, 0.0));
        assert_eq!(m.to_string(), "{1+2i, 0+0i}");
    }
}
