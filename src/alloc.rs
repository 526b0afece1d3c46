//! The allocator hook used by heap-backed matrices.
use std::alloc::{self as std_alloc, Layout};
use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use crate::error::{MatrixError, Result};

/// Allocation capability consumed by [`HeapStorage`](crate::storage::HeapStorage).
///
/// The methods are generic over the element type, so one allocator value can
/// serve any element type (the equivalent of rebinding).
///
/// # Safety
/// `allocate::<U>(n)` must return a pointer valid for reads and writes of
/// `n` values of `U` and properly aligned for `U`, which stays valid until it
/// is handed back to `deallocate::<U>(ptr, n)` on this allocator or on one
/// comparing equal to it.
pub unsafe trait RawAllocator: Clone + PartialEq {
    /// All values of this allocator are interchangeable.
    const IS_ALWAYS_EQUAL: bool;

    fn allocate<U>(&self, n: usize) -> Result<NonNull<U>>;

    /// # Safety
    /// `ptr` must come from `allocate::<U>(n)` on an allocator equal to `self`.
    unsafe fn deallocate<U>(&self, ptr: NonNull<U>, n: usize);
}

/// The process-wide allocator from `std::alloc`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl RawAllocator for Global {
    const IS_ALWAYS_EQUAL: bool = true;

    fn allocate<U>(&self, n: usize) -> Result<NonNull<U>> {
        let layout = Layout::array::<U>(n).map_err(|_| MatrixError::CapacityOverflow)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        let ptr = unsafe { std_alloc::alloc(layout) };
        NonNull::new(ptr as *mut U).ok_or(MatrixError::AllocFailed { layout })
    }

    unsafe fn deallocate<U>(&self, ptr: NonNull<U>, n: usize) {
        // the layout was valid when the block was handed out
        let layout = Layout::array::<U>(n).unwrap_unchecked();
        if layout.size() != 0 {
            std_alloc::dealloc(ptr.as_ptr() as *mut u8, layout);
        }
    }
}

#[derive(Debug, Default)]
struct Ledger {
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    live_bytes: Cell<usize>,
    limit: Cell<Option<usize>>,
}

/// An instrumented allocator for finding leaks and exercising the failure
/// path of heap-backed matrices.
///
/// Clones share one ledger and compare equal; two allocators built
/// separately never compare equal, even with the same name.
#[derive(Clone, Debug)]
pub struct CountingAllocator {
    name: Rc<str>,
    ledger: Rc<Ledger>,
}

impl CountingAllocator {
    pub fn new(name: &str) -> CountingAllocator {
        CountingAllocator {
            name: Rc::from(name),
            ledger: Rc::new(Ledger::default()),
        }
    }

    /// An allocator that refuses any request that would push the live byte
    /// count above `max_bytes`.
    pub fn with_limit(name: &str, max_bytes: usize) -> CountingAllocator {
        let alloc = CountingAllocator::new(name);
        alloc.ledger.limit.set(Some(max_bytes));
        alloc
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn allocations(&self) -> usize {
        self.ledger.allocations.get()
    }
    pub fn deallocations(&self) -> usize {
        self.ledger.deallocations.get()
    }
    pub fn live_bytes(&self) -> usize {
        self.ledger.live_bytes.get()
    }
    /// Every allocation has been handed back.
    pub fn is_balanced(&self) -> bool {
        self.allocations() == self.deallocations() && self.live_bytes() == 0
    }
}

impl PartialEq for CountingAllocator {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.ledger, &other.ledger)
    }
}

unsafe impl RawAllocator for CountingAllocator {
    const IS_ALWAYS_EQUAL: bool = false;

    fn allocate<U>(&self, n: usize) -> Result<NonNull<U>> {
        let layout = Layout::array::<U>(n).map_err(|_| MatrixError::CapacityOverflow)?;
        let ledger = &self.ledger;
        if let Some(limit) = ledger.limit.get() {
            if ledger.live_bytes.get() + layout.size() > limit {
                log::debug!("{}: refusing {} bytes (limit {})", self.name, layout.size(), limit);
                return Err(MatrixError::AllocFailed { layout });
            }
        }
        let ptr = Global.allocate::<U>(n)?;
        ledger.allocations.set(ledger.allocations.get() + 1);
        ledger.live_bytes.set(ledger.live_bytes.get() + layout.size());
        Ok(ptr)
    }

    unsafe fn deallocate<U>(&self, ptr: NonNull<U>, n: usize) {
        Global.deallocate(ptr, n);
        let ledger = &self.ledger;
        let size = std::mem::size_of::<U>() * n;
        ledger.deallocations.set(ledger.deallocations.get() + 1);
        ledger.live_bytes.set(ledger.live_bytes.get().saturating_sub(size));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_round_trip() {
        let ptr = Global.allocate::<u64>(16).unwrap();
        unsafe {
            ptr.as_ptr().write(42);
            assert_eq!(*ptr.as_ptr(), 42);
            Global.deallocate(ptr, 16);
        }
        assert!(<Global as RawAllocator>::IS_ALWAYS_EQUAL);
        assert_eq!(Global.allocate::<u8>(usize::MAX), Err(MatrixError::CapacityOverflow));
    }

    #[test]
    fn test_counting_ledger() {
        let alloc = CountingAllocator::new("ledger");
        let copy = alloc.clone();
        let ptr = copy.allocate::<f64>(4).unwrap();
        assert_eq!(alloc.allocations(), 1);
        assert_eq!(alloc.live_bytes(), 32);
        unsafe { alloc.deallocate(ptr, 4) };
        assert_eq!(copy.deallocations(), 1);
        assert!(alloc.is_balanced());
    }

    #[test]
    fn test_counting_identity() {
        let a = CountingAllocator::new("same");
        let b = CountingAllocator::new("same");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert!(!<CountingAllocator as RawAllocator>::IS_ALWAYS_EQUAL);
    }

    #[test]
    fn test_counting_limit() {
        let alloc = CountingAllocator::with_limit("small", 16);
        let ptr = alloc.allocate::<u32>(4).unwrap();
        match alloc.allocate::<u32>(1) {
            Err(MatrixError::AllocFailed { layout }) => assert_eq!(layout.size(), 4),
            other => panic!("expected an allocation failure, got {:?}", other),
        }
        unsafe { alloc.deallocate(ptr, 4) };
        assert!(alloc.is_balanced());
        assert_eq!(alloc.name(), "small");
    }
}
