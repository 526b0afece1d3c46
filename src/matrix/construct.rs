//! Constructors. Static shapes get the fill/iterator/slice forms without a
//! shape argument, dynamic shapes get the `_with_shape` forms; the nested-row
//! form works for both.
use crate::alloc::{Global, RawAllocator};
use crate::dim::{checked_len, resolve_shape, Const, Dim};
use crate::error::{unwrap_or_abort, Result};
use crate::matrix::Matrix;
use crate::storage::{HeapStorage, InlineStorage, ShapeStorage};

/// Build a buffer of `len` elements from `source`, padding a short source
/// with `T::default()` and ignoring the tail of a long one.
fn build_padded<T, A, S, I>(len: usize, alloc: A, source: I) -> Result<S::Buffer>
where
    T: Default,
    A: RawAllocator,
    S: ShapeStorage<T, A>,
    I: IntoIterator,
    I::Item: Into<T>,
{
    let mut source = source.into_iter();
    let mut padded = 0_usize;
    let data = S::build_buffer(len, alloc, |_| match source.next() {
        Some(value) => value.into(),
        None => {
            padded += 1;
            T::default()
        }
    })?;
    if padded > 0 {
        log::debug!("source held {} of {} elements, padded the rest with zeros", len - padded, len);
    } else if source.next().is_some() {
        log::warn!("source is longer than the {} elements of the matrix, the tail is ignored", len);
    }
    Ok(data)
}

//==========================================================================
// static shapes: the shape comes from the type
//==========================================================================
impl<T, const R: usize, const C: usize> Matrix<T, Const<R>, Const<C>> {
    #[inline]
    fn from_inline(data: InlineStorage<T, R, C>) -> Self {
        Matrix::from_parts(Const, Const, data)
    }

    /// Every element is a copy of `value`.
    pub fn from_fill(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_inline(InlineStorage::from_fn(|_| value.clone()))
    }

    /// Take up to `R * C` elements in row-major order; missing elements are
    /// `T::default()`.
    pub fn from_iter_padded<I>(source: I) -> Self
    where
        T: Default,
        I: IntoIterator,
        I::Item: Into<T>,
    {
        let data = build_padded::<T, Global, (Const<R>, Const<C>), I>(R * C, Global, source);
        Self::from_inline(unwrap_or_abort(data))
    }

    /// Copy `min(buf.len(), R * C)` elements, padding the rest.
    pub fn from_slice<U>(buf: &[U]) -> Self
    where
        T: Default,
        U: Clone + Into<T>,
    {
        Self::from_iter_padded(buf.iter().cloned())
    }

    /// The elements as `R` rows of `C`.
    #[inline]
    pub fn as_array(&self) -> &[[T; C]; R] {
        self.data.rows()
    }

    pub fn into_array(self) -> [[T; C]; R] {
        self.data.into_rows()
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T, Const<R>, Const<C>> {
    #[inline]
    fn from(rows: [[T; C]; R]) -> Self {
        Matrix::from_inline(InlineStorage::from(rows))
    }
}

impl<T: Default, const R: usize, const C: usize> FromIterator<T> for Matrix<T, Const<R>, Const<C>> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Matrix::from_iter_padded(iter)
    }
}

//==========================================================================
// dynamic shapes: the shape is given at construction, storage on the heap
//==========================================================================
impl<T, R: Dim, C: Dim, A: RawAllocator> Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A, Buffer = HeapStorage<T, A>>,
{
    /// An empty `0 x 0` matrix using `alloc`, like `Default` for a dynamic
    /// shape.
    pub fn new_in(alloc: A) -> Self {
        Matrix::unshaped(HeapStorage::new_in(alloc))
    }

    /// Report the shape `rows x cols` and reserve room for it, but store no
    /// element yet: `size()` stays zero.
    pub fn with_shape_in(rows: usize, cols: usize, alloc: A) -> Result<Self> {
        let (r, c) = resolve_shape::<R, C>(rows, cols)?;
        let data = HeapStorage::with_capacity_in(checked_len(rows, cols)?, alloc)?;
        Ok(Matrix::from_parts(r, c, data))
    }

    pub fn from_fill_with_shape_in(value: T, rows: usize, cols: usize, alloc: A) -> Result<Self>
    where
        T: Clone,
    {
        let (r, c) = resolve_shape::<R, C>(rows, cols)?;
        let data = HeapStorage::from_fn_in(checked_len(rows, cols)?, alloc, |_| value.clone())?;
        Ok(Matrix::from_parts(r, c, data))
    }

    pub fn from_iter_with_shape_in<I>(source: I, rows: usize, cols: usize, alloc: A) -> Result<Self>
    where
        T: Default,
        I: IntoIterator,
        I::Item: Into<T>,
    {
        let (r, c) = resolve_shape::<R, C>(rows, cols)?;
        let data = build_padded::<T, A, (R, C), I>(checked_len(rows, cols)?, alloc, source)?;
        Ok(Matrix::from_parts(r, c, data))
    }

    pub fn from_slice_with_shape_in<U>(buf: &[U], rows: usize, cols: usize, alloc: A) -> Result<Self>
    where
        T: Default,
        U: Clone + Into<T>,
    {
        Self::from_iter_with_shape_in(buf.iter().cloned(), rows, cols, alloc)
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        self.data.allocator()
    }
}

impl<T, R: Dim, C: Dim> Matrix<T, R, C, Global>
where
    (R, C): ShapeStorage<T, Global, Buffer = HeapStorage<T, Global>>,
{
    /// See [`with_shape_in`](Matrix::with_shape_in).
    pub fn with_shape(rows: usize, cols: usize) -> Self {
        unwrap_or_abort(Self::with_shape_in(rows, cols, Global))
    }

    /// `rows * cols` copies of `value`.
    pub fn from_fill_with_shape(value: T, rows: usize, cols: usize) -> Self
    where
        T: Clone,
    {
        unwrap_or_abort(Self::from_fill_with_shape_in(value, rows, cols, Global))
    }

    /// Take up to `rows * cols` elements in row-major order; missing elements
    /// are `T::default()`.
    pub fn from_iter_with_shape<I>(source: I, rows: usize, cols: usize) -> Self
    where
        T: Default,
        I: IntoIterator,
        I::Item: Into<T>,
    {
        unwrap_or_abort(Self::from_iter_with_shape_in(source, rows, cols, Global))
    }

    pub fn from_slice_with_shape<U>(buf: &[U], rows: usize, cols: usize) -> Self
    where
        T: Default,
        U: Clone + Into<T>,
    {
        unwrap_or_abort(Self::from_slice_with_shape_in(buf, rows, cols, Global))
    }
}

//==========================================================================
// nested rows: any shape
//==========================================================================
impl<T, R: Dim, C: Dim, A: RawAllocator> Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    /// Build from a sequence of rows.
    ///
    /// A dynamic row extent is the number of rows, a dynamic column extent is
    /// the length of the first row; static extents come from the type. The
    /// elements are read row after row and placed in row-major order, so a
    /// ragged source simply flows across row boundaries. Short sources are
    /// padded with `T::default()`, long ones truncated.
    pub fn from_rows_in<Row, U>(rows: &[Row], alloc: A) -> Result<Self>
    where
        T: Default,
        Row: AsRef<[U]>,
        U: Clone + Into<T>,
    {
        let first_len = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.iter().any(|row| row.as_ref().len() != first_len) {
            log::warn!("rows of the nested source differ in length, reading them as one stream");
        }
        let r = R::from_usize(rows.len()).unwrap_or_else(R::default_extent);
        let c = C::from_usize(first_len).unwrap_or_else(C::default_extent);
        let len = checked_len(r.value(), c.value())?;
        let source = rows.iter().flat_map(|row| row.as_ref().iter().cloned());
        let data = build_padded::<T, A, (R, C), _>(len, alloc, source)?;
        Ok(Matrix::from_parts(r, c, data))
    }
}

impl<T, R: Dim, C: Dim> Matrix<T, R, C, Global>
where
    (R, C): ShapeStorage<T, Global>,
{
    /// See [`from_rows_in`](Matrix::from_rows_in).
    pub fn from_rows<Row, U>(rows: &[Row]) -> Self
    where
        T: Default,
        Row: AsRef<[U]>,
        U: Clone + Into<T>,
    {
        unwrap_or_abort(Self::from_rows_in(rows, Global))
    }
}
