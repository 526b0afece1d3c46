use std::fmt;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use std::slice;

use crate::alloc::{Global, RawAllocator};
use crate::error::Result;
use crate::storage::Storage;

/// A contiguous buffer obtained from a [`RawAllocator`].
///
/// `len` elements are initialised; room for `cap` elements was requested. The
/// allocator is only consulted when `cap` is non-zero.
pub struct HeapStorage<T, A: RawAllocator = Global> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send, A: RawAllocator + Send> Send for HeapStorage<T, A> {}
unsafe impl<T: Sync, A: RawAllocator + Sync> Sync for HeapStorage<T, A> {}

impl<T, A: RawAllocator> HeapStorage<T, A> {
    /// An empty buffer; nothing is allocated.
    #[inline]
    pub fn new_in(alloc: A) -> HeapStorage<T, A> {
        HeapStorage {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Room for `cap` elements, none of them initialised yet.
    pub fn with_capacity_in(cap: usize, alloc: A) -> Result<HeapStorage<T, A>> {
        if cap == 0 {
            return Ok(HeapStorage::new_in(alloc));
        }
        let ptr = alloc.allocate::<T>(cap)?;
        log::trace!("allocated room for {} elements of {} bytes", cap, std::mem::size_of::<T>());
        Ok(HeapStorage {
            ptr,
            len: 0,
            cap,
            alloc,
            _marker: PhantomData,
        })
    }

    /// A buffer of exactly `len` elements, element `k` being `f(k)`.
    ///
    /// If `f` panics the elements written so far are dropped and the block is
    /// returned to the allocator.
    pub fn from_fn_in<F>(len: usize, alloc: A, mut f: F) -> Result<HeapStorage<T, A>>
    where
        F: FnMut(usize) -> T,
    {
        let mut buf = HeapStorage::with_capacity_in(len, alloc)?;
        for k in 0..len {
            let value = f(k);
            unsafe { buf.push_unchecked(value) };
        }
        Ok(buf)
    }

    /// # Safety
    /// `self.len < self.cap` must hold.
    #[inline]
    unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.cap);
        self.ptr.as_ptr().add(self.len).write(value);
        self.len += 1;
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }
}

impl<T, A: RawAllocator> Storage<T> for HeapStorage<T, A> {
    #[inline]
    fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
    #[inline]
    fn capacity(&self) -> usize {
        self.cap
    }
    #[inline]
    fn max_len(&self) -> usize {
        isize::MAX as usize / std::mem::size_of::<T>().max(1)
    }
}

impl<T, A: RawAllocator> Drop for HeapStorage<T, A> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
            if self.cap != 0 {
                self.alloc.deallocate(self.ptr, self.cap);
                log::trace!("released room for {} elements", self.cap);
            }
        }
    }
}

impl<T: Clone, A: RawAllocator> Clone for HeapStorage<T, A> {
    /// The copy keeps the capacity of the original and a clone of its allocator.
    fn clone(&self) -> Self {
        let res = HeapStorage::with_capacity_in(self.cap, self.alloc.clone()).map(|mut buf| {
            for value in self.as_slice() {
                unsafe { buf.push_unchecked(value.clone()) };
            }
            buf
        });
        crate::error::unwrap_or_abort(res)
    }
}

impl<T: fmt::Debug, A: RawAllocator> fmt::Debug for HeapStorage<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HeapStorage")
            .field("data", &self.as_slice())
            .field("cap", &self.cap)
            .finish()
    }
}
