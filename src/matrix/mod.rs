use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice::{ChunksExact, ChunksExactMut};

use crate::alloc::{Global, RawAllocator};
use crate::dim::{Const, Dim, Dyn};
use crate::error::unwrap_or_abort;
use crate::iter::{ColumnIter, ColumnIterMut, Iter, IterMut, RowIter, RowIterMut};
use crate::storage::{ShapeStorage, Storage};

pub mod construct;
pub mod display;
#[cfg(feature = "nalgebra")]
pub mod interop;
#[cfg(feature = "rayon")]
pub mod parallel;

/// **Matrix** is a `row-major` 2D container whose row and column extents are
/// each either fixed in the type ([`Const<N>`](Const)) or chosen at runtime
/// ([`Dyn`]).
///
/// When both extents are static the elements live inline in the matrix
/// ([`InlineStorage`](crate::storage::InlineStorage)); as soon as one extent
/// is dynamic they live on the heap
/// ([`HeapStorage`](crate::storage::HeapStorage)), obtained from the allocator
/// `A`.
///
/// - [Construction](#construction)
/// - [Indexing](#indexing)
/// - [Iterators](#iterators)
/// - [Formatting](#formatting)
///
/// # Construction
///   Static shapes and dynamic shapes have different constructor sets; using
///   the wrong one does not compile.
///
///   1. Default construction. A static matrix holds `R * C` default elements,
///      one with any dynamic axis is `0 x 0` and allocates nothing.
/// ```
///   use matrix_base::{Const, DMatrix, Dyn, Matrix, SMatrix};
///   let matr: SMatrix<f64, 2, 2> = SMatrix::new();
///   assert_eq!(matr.size(), 4);
///   let matr: DMatrix<f64> = DMatrix::new();
///   assert!(matr.is_empty());
///   assert_eq!(matr.shape(), (0, 0));
///   let matr: Matrix<f64, Dyn, Const<2>> = Matrix::new();
///   assert_eq!(matr.shape(), (0, 0));
/// ```
///   2. Filled with a given element.
/// ```
///   use matrix_base::{DMatrix, SMatrix};
///   let matr = SMatrix::<f64, 2, 3>::from_fill(1.0);
///   let dmatr = DMatrix::from_fill_with_shape(1.0, 2, 3);
///   assert_eq!(matr.as_slice(), dmatr.as_slice());
/// ```
///   3. From an iterator, a slice or nested rows. Short sources are padded
///      with `T::default()`, long sources are truncated.
/// ```
///   use matrix_base::{DMatrix, SMatrix};
///   //| 1.0 | 2.0 | 3.0 | 4.0 | 5.0 |
///   //| 6.0 | 7.0 | 8.0 | 0.0 | 0.0 |
///   //| 0.0 | 0.0 | 0.0 | 0.0 | 0.0 |
///   let matr = SMatrix::<f64, 3, 5>::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
///   assert_eq!(matr[(1, 2)], 8.0);
///   assert_eq!(matr[(2, 4)], 0.0);
///
///   let dmatr = DMatrix::<i32>::from_iter_with_shape(1..=6, 2, 3);
///   assert_eq!(dmatr[(1, 0)], 4);
///
///   let nested = vec![vec![1, 2, 3], vec![4, 5, 6]];
///   let dmatr = DMatrix::<i64>::from_rows(&nested);
///   assert_eq!(dmatr.shape(), (2, 3));
/// ```
///   4. Reserve room for a shape without filling it. The matrix reports the
///      shape but holds no elements yet.
/// ```
///   use matrix_base::DMatrix;
///   let matr = DMatrix::<f64>::with_shape(2, 3);
///   assert_eq!((matr.nrows(), matr.ncols(), matr.size()), (2, 3, 0));
///   assert!(matr.capacity() >= 6);
/// ```
/// # Indexing
///   Elements are accessed by `(row, column)`; `(r, c)` is the element at
///   offset `r * ncols + c` of [`as_slice`](Matrix::as_slice).
/// ```
///   use matrix_base::SMatrix;
///   let mut matr = SMatrix::<i32, 2, 2>::new();
///   matr[(0, 0)] = 1;
///   matr[(0, 1)] = 2;
///   matr[[1, 0]] = 3;
///   matr[[1, 1]] = 4;
///   assert_eq!(matr.as_slice(), &[1, 2, 3, 4]);
///   assert_eq!(matr.get(2, 0), None);
/// ```
/// # Iterators
///   `iter()` walks the elements row by row, `column_iter()` column by column.
/// ```
///   use matrix_base::SMatrix;
///   let matr = SMatrix::<i32, 2, 3>::from([[1, 2, 3], [4, 5, 6]]);
///   assert_eq!(matr.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
///   assert_eq!(matr.column_iter().copied().collect::<Vec<_>>(), vec![1, 4, 2, 5, 3, 6]);
/// ```
/// # Formatting
///   Rows are rendered in braces, separated by `",\n"`.
/// ```
///   use matrix_base::SMatrix;
///   let matr = SMatrix::<i32, 2, 2>::from_rows(&[[1, 2], [3, 4]]);
///   assert_eq!(matr.to_string(), "{1, 2},\n{3, 4}");
/// ```
pub struct Matrix<T, R: Dim, C: Dim, A: RawAllocator = Global>
where
    (R, C): ShapeStorage<T, A>,
{
    rows: R,
    cols: C,
    // false until a shape is given; a default heap-backed matrix is 0 x 0
    // even when one of its axes is static
    shaped: bool,
    data: <(R, C) as ShapeStorage<T, A>>::Buffer,
}

/// A matrix whose shape is fixed in the type.
pub type SMatrix<T, const R: usize, const C: usize> = Matrix<T, Const<R>, Const<C>>;
/// A matrix whose shape is chosen at runtime.
pub type DMatrix<T, A = Global> = Matrix<T, Dyn, Dyn, A>;

impl<T, R: Dim, C: Dim, A: RawAllocator> Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    /// At least one extent is only known at runtime.
    pub const DYNAMIC_SHAPE: bool = <(R, C) as ShapeStorage<T, A>>::DYNAMIC_SHAPE;

    #[inline]
    pub(crate) fn from_parts(rows: R, cols: C, data: <(R, C) as ShapeStorage<T, A>>::Buffer) -> Self {
        Matrix { rows, cols, shaped: true, data }
    }

    /// A heap-backed matrix that has no shape yet and reports `0 x 0`.
    #[inline]
    pub(crate) fn unshaped(data: <(R, C) as ShapeStorage<T, A>>::Buffer) -> Self {
        Matrix {
            rows: R::default_extent(),
            cols: C::default_extent(),
            shaped: !Self::DYNAMIC_SHAPE,
            data,
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        if self.shaped {
            self.rows.value()
        } else {
            0
        }
    }
    #[inline]
    pub fn ncols(&self) -> usize {
        if self.shaped {
            self.cols.value()
        } else {
            0
        }
    }
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
    /// The number of stored elements. Equals `nrows() * ncols()` except for a
    /// matrix built by `with_shape`, which stores nothing.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
    #[inline]
    pub fn max_size(&self) -> usize {
        self.data.max_len()
    }
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    /// `(r, c)` with a bound check on both axes.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> Option<&T> {
        if r < self.nrows() && c < self.ncols() {
            self.as_slice().get(r * self.ncols() + c)
        } else {
            None
        }
    }
    #[inline]
    pub fn get_mut(&mut self, r: usize, c: usize) -> Option<&mut T> {
        if r < self.nrows() && c < self.ncols() {
            let ncols = self.ncols();
            self.as_mut_slice().get_mut(r * ncols + c)
        } else {
            None
        }
    }

    /// Row-major traversal.
    #[inline]
    pub fn iter(&self) -> RowIter<'_, T> {
        Iter::new(self.as_slice(), self.nrows(), self.ncols())
    }
    #[inline]
    pub fn iter_mut(&mut self) -> RowIterMut<'_, T> {
        let (nrows, ncols) = self.shape();
        IterMut::new(self.as_mut_slice(), nrows, ncols)
    }
    /// Column-major traversal.
    #[inline]
    pub fn column_iter(&self) -> ColumnIter<'_, T> {
        Iter::new(self.as_slice(), self.nrows(), self.ncols())
    }
    #[inline]
    pub fn column_iter_mut(&mut self) -> ColumnIterMut<'_, T> {
        let (nrows, ncols) = self.shape();
        IterMut::new(self.as_mut_slice(), nrows, ncols)
    }
    /// Read-only row-major traversal, even through a mutable binding.
    #[inline]
    pub fn citer(&self) -> RowIter<'_, T> {
        self.iter()
    }
    #[inline]
    pub fn ccolumn_iter(&self) -> ColumnIter<'_, T> {
        self.column_iter()
    }

    /// The stored rows as slices.
    #[inline]
    pub fn rows(&self) -> ChunksExact<'_, T> {
        let ncols = self.ncols().max(1);
        self.as_slice().chunks_exact(ncols)
    }
    #[inline]
    pub fn rows_mut(&mut self) -> ChunksExactMut<'_, T> {
        let ncols = self.ncols().max(1);
        self.as_mut_slice().chunks_exact_mut(ncols)
    }
}

impl<T: Default, R: Dim, C: Dim, A: RawAllocator + Default> Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    /// Same as `Default::default()`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Default, R: Dim, C: Dim, A: RawAllocator + Default> Default for Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    /// `R * C` default elements for a static shape. Any dynamic axis makes
    /// the whole matrix `0 x 0`, static axis included, and nothing is
    /// allocated.
    fn default() -> Self {
        let len = if Self::DYNAMIC_SHAPE {
            0
        } else {
            R::default_extent().value() * C::default_extent().value()
        };
        let data = unwrap_or_abort(<(R, C) as ShapeStorage<T, A>>::build_buffer(len, A::default(), |_| T::default()));
        Matrix::unshaped(data)
    }
}

impl<T, R: Dim, C: Dim, A: RawAllocator> Clone for Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
    <(R, C) as ShapeStorage<T, A>>::Buffer: Clone,
{
    fn clone(&self) -> Self {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            shaped: self.shaped,
            data: self.data.clone(),
        }
    }
}

impl<T: fmt::Debug, R: Dim, C: Dim, A: RawAllocator> fmt::Debug for Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("size", &[self.nrows(), self.ncols()])
            .field("data", &self.as_slice())
            .finish()
    }
}

impl<T: PartialEq, R: Dim, C: Dim, A: RawAllocator> PartialEq for Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, R: Dim, C: Dim, A: RawAllocator> Eq for Matrix<T, R, C, A> where (R, C): ShapeStorage<T, A> {}

//==========================================================================
// Index and IndexMut: (row, column) in row-major storage, no extra checks
//==========================================================================
impl<T, R: Dim, C: Dim, A: RawAllocator> Index<(usize, usize)> for Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    type Output = T;
    #[inline]
    fn index(&self, p: (usize, usize)) -> &Self::Output {
        &self.as_slice()[p.0 * self.ncols() + p.1]
    }
}

impl<T, R: Dim, C: Dim, A: RawAllocator> IndexMut<(usize, usize)> for Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    #[inline]
    fn index_mut(&mut self, p: (usize, usize)) -> &mut Self::Output {
        let ncols = self.ncols();
        &mut self.as_mut_slice()[p.0 * ncols + p.1]
    }
}

impl<T, R: Dim, C: Dim, A: RawAllocator> Index<[usize; 2]> for Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    type Output = T;
    #[inline]
    fn index(&self, p: [usize; 2]) -> &Self::Output {
        &self[(p[0], p[1])]
    }
}

impl<T, R: Dim, C: Dim, A: RawAllocator> IndexMut<[usize; 2]> for Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    #[inline]
    fn index_mut(&mut self, p: [usize; 2]) -> &mut Self::Output {
        &mut self[(p[0], p[1])]
    }
}

impl<'a, T, R: Dim, C: Dim, A: RawAllocator> IntoIterator for &'a Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    type Item = &'a T;
    type IntoIter = RowIter<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, R: Dim, C: Dim, A: RawAllocator> IntoIterator for &'a mut Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    type Item = &'a mut T;
    type IntoIter = RowIterMut<'a, T>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::CountingAllocator;

    #[test]
    fn test_default_static() {
        let m: SMatrix<f64, 2, 2> = Default::default();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.size(), 4);
        assert!(!m.is_empty());
        assert_eq!(m.max_size(), 4);
        assert!(!SMatrix::<f64, 2, 2>::DYNAMIC_SHAPE);
    }

    #[test]
    fn test_default_dynamic() {
        let m: DMatrix<f64> = DMatrix::new();
        assert_eq!((m.nrows(), m.ncols(), m.size()), (0, 0, 0));
        assert!(m.is_empty());
        assert!(DMatrix::<f64>::DYNAMIC_SHAPE);
        assert!(m.max_size() > 1 << 40);

        // one dynamic axis is enough for a 0 x 0 default
        let m: Matrix<f64, Dyn, Const<2>> = Matrix::new();
        assert_eq!((m.nrows(), m.ncols()), (0, 0));
        assert!(m.is_empty());
        assert_eq!(m.clone().shape(), (0, 0));
        let m: Matrix<f64, Const<2>, Dyn> = Matrix::new();
        assert_eq!((m.nrows(), m.ncols()), (0, 0));
        assert!(m.is_empty());
        assert_eq!(m.to_string(), "");

        // an explicit shape still reports the static axis
        let m = Matrix::<f64, Dyn, Const<2>>::with_shape(0, 2);
        assert_eq!(m.shape(), (0, 2));
    }

    #[test]
    fn test_layout_law() {
        let mut m = DMatrix::<usize>::from_iter_with_shape(0_usize..12, 3, 4);
        for r in 0..3 {
            for c in 0..4 {
                assert_eq!(m[(r, c)], m.as_slice()[r * m.ncols() + c]);
            }
        }
        m[(2, 1)] = 100;
        assert_eq!(m.as_slice()[9], 100);
        assert_eq!(m.get(2, 1), Some(&100));
        assert_eq!(m.get(3, 0), None);
        assert_eq!(m.get(0, 4), None);
        if let Some(x) = m.get_mut(0, 3) {
            *x = 7;
        }
        assert_eq!(m[[0, 3]], 7);
    }

    #[test]
    fn test_iteration_coverage() {
        let m = SMatrix::<(usize, usize), 3, 2>::from([[(0, 0), (0, 1)], [(1, 0), (1, 1)], [(2, 0), (2, 1)]]);
        let by_rows: Vec<_> = m.iter().copied().collect();
        assert_eq!(by_rows, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
        let by_columns: Vec<_> = m.ccolumn_iter().copied().collect();
        assert_eq!(by_columns, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!((&m).into_iter().len(), 6);
    }

    #[test]
    fn test_mutable_iteration() {
        let mut m = DMatrix::<i32>::from_fill_with_shape(0, 2, 3);
        m.column_iter_mut().enumerate().for_each(|(k, x)| *x = k as i32);
        assert_eq!(m.as_slice(), &[0, 2, 4, 1, 3, 5]);
        for x in &mut m {
            *x *= 10;
        }
        assert_eq!(m.citer().copied().collect::<Vec<_>>(), vec![0, 20, 40, 10, 30, 50]);
        m.rows_mut().for_each(|row| row.reverse());
        assert_eq!(m.rows().collect::<Vec<_>>(), vec![&[40, 20, 0][..], &[50, 30, 10][..]]);
    }

    #[test]
    fn test_clone_and_eq() {
        let alloc = CountingAllocator::new("matrix-clone");
        let m = DMatrix::from_fill_with_shape_in(1.5, 2, 2, alloc.clone()).unwrap();
        let copy = m.clone();
        assert_eq!(m, copy);
        assert_eq!(copy.allocator(), &alloc);
        assert_eq!(alloc.allocations(), 2);
        drop(m);
        drop(copy);
        assert!(alloc.is_balanced());

        let a = DMatrix::from_fill_with_shape(0, 2, 3);
        let b = DMatrix::from_fill_with_shape(0, 3, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_output() {
        let m = SMatrix::<i32, 1, 2>::from([[1, 2]]);
        assert_eq!(format!("{:?}", m), "Matrix { size: [1, 2], data: [1, 2] }");
    }
}
