//! The two storage backends and the type-level selector that picks one from
//! the extents of a matrix.
use crate::alloc::RawAllocator;
use crate::dim::{Const, Dyn};
use crate::error::Result;

pub mod heap;
pub mod inline;

pub use crate::storage::heap::HeapStorage;
pub use crate::storage::inline::InlineStorage;

/// The logical interface both backends expose to the matrix: a contiguous,
/// row-major run of elements.
pub trait Storage<T> {
    fn as_slice(&self) -> &[T];

    fn as_mut_slice(&mut self) -> &mut [T];

    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    /// The largest element count the backend could ever hold.
    fn max_len(&self) -> usize;
}

/// Selects the storage backend for a `(rows, cols)` pair of extents.
///
/// `(Const<R>, Const<C>)` maps to [`InlineStorage`]; every pair with at least
/// one [`Dyn`] maps to [`HeapStorage`] over the allocator `A`.
pub trait ShapeStorage<T, A: RawAllocator> {
    /// At least one extent is only known at runtime.
    const DYNAMIC_SHAPE: bool;

    type Buffer: Storage<T>;

    /// Build a buffer of `len` elements, element `k` being `f(k)`. Inline
    /// buffers ignore `alloc` and always hold exactly `R * C` elements.
    fn build_buffer<F>(len: usize, alloc: A, f: F) -> Result<Self::Buffer>
    where
        F: FnMut(usize) -> T;
}

impl<T, A: RawAllocator, const R: usize, const C: usize> ShapeStorage<T, A> for (Const<R>, Const<C>) {
    const DYNAMIC_SHAPE: bool = false;

    type Buffer = InlineStorage<T, R, C>;

    #[inline]
    fn build_buffer<F>(len: usize, _alloc: A, f: F) -> Result<Self::Buffer>
    where
        F: FnMut(usize) -> T,
    {
        debug_assert_eq!(len, R * C);
        Ok(InlineStorage::from_fn(f))
    }
}

macro_rules! impl_heap_shape {
    ($([$($gen:tt)*] $shape:ty),* $(,)?) => {$(
        impl<T, A: RawAllocator, $($gen)*> ShapeStorage<T, A> for $shape {
            const DYNAMIC_SHAPE: bool = true;

            type Buffer = HeapStorage<T, A>;

            #[inline]
            fn build_buffer<F>(len: usize, alloc: A, f: F) -> Result<Self::Buffer>
            where
                F: FnMut(usize) -> T,
            {
                HeapStorage::from_fn_in(len, alloc, f)
            }
        }
    )*};
}

impl_heap_shape!(
    [] (Dyn, Dyn),
    [const C: usize] (Dyn, Const<C>),
    [const R: usize] (Const<R>, Dyn),
);
