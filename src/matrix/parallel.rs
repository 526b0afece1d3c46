use rayon::prelude::*;

use crate::alloc::RawAllocator;
use crate::dim::Dim;
use crate::matrix::Matrix;
use crate::storage::ShapeStorage;

/// Useful iterators with rayon parallization
impl<T, R: Dim, C: Dim, A: RawAllocator> Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    /// All elements, in no particular order of execution.
    #[inline]
    pub fn par_iter(&self) -> rayon::slice::Iter<'_, T>
    where
        T: Sync,
    {
        self.as_slice().par_iter()
    }
    #[inline]
    pub fn par_iter_mut(&mut self) -> rayon::slice::IterMut<'_, T>
    where
        T: Send,
    {
        self.as_mut_slice().par_iter_mut()
    }
    #[inline]
    pub fn par_rows(&self) -> rayon::slice::ChunksExact<'_, T>
    where
        T: Sync,
    {
        let ncols = self.ncols().max(1);
        self.as_slice().par_chunks_exact(ncols)
    }
    #[inline]
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksExactMut<'_, T>
    where
        T: Send,
    {
        let ncols = self.ncols().max(1);
        self.as_mut_slice().par_chunks_exact_mut(ncols)
    }
}
