use crate::storage::Storage;

/// Storage embedded in the matrix itself: `R` rows of `C` elements, laid out
/// contiguously in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InlineStorage<T, const R: usize, const C: usize> {
    data: [[T; C]; R],
}

impl<T, const R: usize, const C: usize> InlineStorage<T, R, C> {
    /// element at linear offset `k` is `f(k)`
    #[inline]
    pub fn from_fn<F: FnMut(usize) -> T>(mut f: F) -> InlineStorage<T, R, C> {
        InlineStorage {
            data: std::array::from_fn(|r| std::array::from_fn(|c| f(r * C + c))),
        }
    }

    #[inline]
    pub fn rows(&self) -> &[[T; C]; R] {
        &self.data
    }

    #[inline]
    pub fn into_rows(self) -> [[T; C]; R] {
        self.data
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for InlineStorage<T, R, C> {
    #[inline]
    fn from(data: [[T; C]; R]) -> Self {
        InlineStorage { data }
    }
}

impl<T, const R: usize, const C: usize> Storage<T> for InlineStorage<T, R, C> {
    #[inline]
    fn as_slice(&self) -> &[T] {
        self.data.as_flattened()
    }
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_flattened_mut()
    }
    #[inline]
    fn capacity(&self) -> usize {
        R * C
    }
    #[inline]
    fn max_len(&self) -> usize {
        R * C
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let mut buf: InlineStorage<i32, 2, 3> = InlineStorage::from([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4, 5, 6]);
        buf.as_mut_slice()[4] = 50;
        assert_eq!(buf.rows()[1][1], 50);
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.max_len(), 6);
    }

    #[test]
    fn test_zero_extent() {
        let buf: InlineStorage<f64, 0, 4> = InlineStorage::from_fn(|_| 1.0);
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 0);
    }
}
