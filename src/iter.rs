//! Row-major and column-major cursors over the elements of a matrix.
//!
//! Both orders share one cursor type; the [`Traversal`] parameter only changes
//! how the step count `k` maps onto the row-major storage.
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Maps a traversal step onto a linear offset into row-major storage.
pub trait Traversal: 'static {
    fn offset(step: usize, rows: usize, cols: usize) -> usize;
}

/// `(0,0), (0,1), ..., (rows-1, cols-1)`: step `k` is storage offset `k`.
#[derive(Clone, Copy, Debug)]
pub enum RowMajor {}

/// `(0,0), (1,0), ..., (rows-1, 0), (0,1), ...`
#[derive(Clone, Copy, Debug)]
pub enum ColumnMajor {}

impl Traversal for RowMajor {
    #[inline]
    fn offset(step: usize, _rows: usize, _cols: usize) -> usize {
        step
    }
}

impl Traversal for ColumnMajor {
    #[inline]
    fn offset(step: usize, rows: usize, cols: usize) -> usize {
        (step % rows) * cols + step / rows
    }
}

#[inline]
fn seek_to(front: usize, back: usize, delta: isize) -> usize {
    if delta < 0 {
        front.saturating_sub(delta.unsigned_abs())
    } else {
        front.saturating_add(delta as usize).min(back)
    }
}

/// Read-only cursor over `data`, visiting steps `front..back`.
pub struct Iter<'a, T, O> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    front: usize,
    back: usize,
    _order: PhantomData<O>,
}

pub type RowIter<'a, T> = Iter<'a, T, RowMajor>;
pub type ColumnIter<'a, T> = Iter<'a, T, ColumnMajor>;

impl<'a, T, O: Traversal> Iter<'a, T, O> {
    /// `data` is a `rows x cols` row-major block, or empty.
    #[inline]
    pub(crate) fn new(data: &'a [T], rows: usize, cols: usize) -> Iter<'a, T, O> {
        debug_assert!(data.is_empty() || data.len() == rows * cols);
        Iter {
            data,
            rows,
            cols,
            front: 0,
            back: data.len(),
            _order: PhantomData,
        }
    }

    #[inline]
    fn at(&self, step: usize) -> &'a T {
        let data: &'a [T] = self.data;
        &data[O::offset(step, self.rows, self.cols)]
    }

    /// The step the next call to `next()` yields.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.front
    }

    /// The element under the cursor, without advancing.
    #[inline]
    pub fn peek(&self) -> Option<&'a T> {
        if self.front < self.back {
            Some(self.at(self.front))
        } else {
            None
        }
    }

    /// Move the cursor by a signed step, clamped to the traversal domain.
    #[inline]
    pub fn seek(&mut self, delta: isize) {
        self.front = seek_to(self.front, self.back, delta);
    }

    /// Signed number of steps from `self` to `other`.
    #[inline]
    pub fn distance(&self, other: &Self) -> isize {
        other.front as isize - self.front as isize
    }
}

impl<'a, T, O> Clone for Iter<'a, T, O> {
    fn clone(&self) -> Self {
        Iter {
            data: self.data,
            rows: self.rows,
            cols: self.cols,
            front: self.front,
            back: self.back,
            _order: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug, O> fmt::Debug for Iter<'a, T, O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Iter")
            .field("shape", &(self.rows, self.cols))
            .field("front", &self.front)
            .field("back", &self.back)
            .finish()
    }
}

impl<'a, T, O: Traversal> Iterator for Iter<'a, T, O> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let item = self.peek()?;
        self.front += 1;
        Some(item)
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a T> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.back - self.front
    }
}

impl<'a, T, O: Traversal> DoubleEndedIterator for Iter<'a, T, O> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.at(self.back))
        } else {
            None
        }
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        self.back = self.back.saturating_sub(n).max(self.front);
        self.next_back()
    }
}

impl<'a, T, O: Traversal> ExactSizeIterator for Iter<'a, T, O> {}
impl<'a, T, O: Traversal> FusedIterator for Iter<'a, T, O> {}

// cursors order by position; comparing cursors from different matrices is meaningless
impl<'a, T, O> PartialEq for Iter<'a, T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.front == other.front
    }
}
impl<'a, T, O> Eq for Iter<'a, T, O> {}
impl<'a, T, O> PartialOrd for Iter<'a, T, O> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.front.cmp(&other.front))
    }
}
impl<'a, T, O> Ord for Iter<'a, T, O> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.front.cmp(&other.front)
    }
}

/// Mutable cursor; every step maps to a distinct storage cell, so the yielded
/// references never alias.
///
/// Unlike [`Iter`], the cursor cannot be moved back over a step it has
/// already yielded: `floor` is the lowest step that was never handed out.
pub struct IterMut<'a, T, O> {
    ptr: NonNull<T>,
    rows: usize,
    cols: usize,
    floor: usize,
    front: usize,
    back: usize,
    _marker: PhantomData<(&'a mut T, O)>,
}

pub type RowIterMut<'a, T> = IterMut<'a, T, RowMajor>;
pub type ColumnIterMut<'a, T> = IterMut<'a, T, ColumnMajor>;

unsafe impl<'a, T: Send, O> Send for IterMut<'a, T, O> {}
unsafe impl<'a, T: Sync, O> Sync for IterMut<'a, T, O> {}

impl<'a, T, O: Traversal> IterMut<'a, T, O> {
    #[inline]
    pub(crate) fn new(data: &'a mut [T], rows: usize, cols: usize) -> IterMut<'a, T, O> {
        debug_assert!(data.is_empty() || data.len() == rows * cols);
        let back = data.len();
        IterMut {
            ptr: NonNull::from(data).cast(),
            rows,
            cols,
            floor: 0,
            front: 0,
            back,
            _marker: PhantomData,
        }
    }

    /// # Safety
    /// `step` must lie in `front..back` and must not be handed out twice.
    #[inline]
    unsafe fn at(&self, step: usize) -> &'a mut T {
        &mut *self.ptr.as_ptr().add(O::offset(step, self.rows, self.cols))
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.front
    }

    /// The element under the cursor, borrowed for as long as the cursor is.
    #[inline]
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        if self.front < self.back {
            Some(unsafe { self.at(self.front) })
        } else {
            None
        }
    }

    /// Move the cursor by a signed step, clamped between the first step not yet
    /// yielded and the end of the domain.
    #[inline]
    pub fn seek(&mut self, delta: isize) {
        self.front = seek_to(self.front, self.back, delta).max(self.floor);
    }

    #[inline]
    pub fn distance(&self, other: &Self) -> isize {
        other.front as isize - self.front as isize
    }
}

impl<'a, T, O: Traversal> Iterator for IterMut<'a, T, O> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.front < self.back {
            let item = unsafe { self.at(self.front) };
            self.front += 1;
            self.floor = self.front;
            Some(item)
        } else {
            None
        }
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<'a, T, O: Traversal> DoubleEndedIterator for IterMut<'a, T, O> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.front < self.back {
            self.back -= 1;
            Some(unsafe { self.at(self.back) })
        } else {
            None
        }
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<&'a mut T> {
        self.back = self.back.saturating_sub(n).max(self.front);
        self.next_back()
    }
}

impl<'a, T, O: Traversal> ExactSizeIterator for IterMut<'a, T, O> {}
impl<'a, T, O: Traversal> FusedIterator for IterMut<'a, T, O> {}

impl<'a, T, O> PartialEq for IterMut<'a, T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.front == other.front
    }
}
impl<'a, T, O> Eq for IterMut<'a, T, O> {}
impl<'a, T, O> PartialOrd for IterMut<'a, T, O> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.front.cmp(&other.front))
    }
}
impl<'a, T, O> Ord for IterMut<'a, T, O> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.front.cmp(&other.front)
    }
}
