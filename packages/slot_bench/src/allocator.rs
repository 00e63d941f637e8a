use std::hint;
use std::num::NonZero;
use std::sync::atomic::{AtomicU32, Ordering};

/// Hands out unique slot indexes to worker threads as they arrive, and doubles as
/// the rendezvous gate that releases the workers once every slot has been issued.
///
/// The internal counter is the only location in the whole benchmark that is
/// concurrently mutated by more than one thread. Slot indexes are issued in
/// arrival order, which may differ from spawn order; the rendezvous makes that
/// irrelevant to the timed region.
///
/// # Preconditions
///
/// At most `expected` threads may call [`allocate()`](Self::allocate) during a
/// run. Over-issuing is not detected here; the tables indexed by the result will
/// panic on the out-of-range slot.
///
/// If fewer than `expected` threads ever allocate, every thread spinning in
/// [`wait_all_allocated()`](Self::wait_all_allocated) spins forever. That is an
/// accepted precondition violation, not a recoverable error.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use slot_bench::SlotAllocator;
///
/// let allocator = SlotAllocator::new(nz!(1));
///
/// assert_eq!(allocator.allocate(), 0);
/// allocator.wait_all_allocated(); // Returns immediately, all slots issued.
/// ```
#[derive(Debug)]
pub struct SlotAllocator {
    next: AtomicU32,
    expected: NonZero<u32>,
}

impl SlotAllocator {
    /// Creates an allocator that will consider the rendezvous complete once
    /// `expected` slots have been issued.
    #[must_use]
    pub fn new(expected: NonZero<u32>) -> Self {
        Self {
            next: AtomicU32::new(0),
            expected,
        }
    }

    /// Atomically claims the next slot index, returning the pre-increment value.
    ///
    /// Across N concurrent calls the returned values are exactly `0..N`, with no
    /// duplicates and no gaps.
    #[must_use]
    pub fn allocate(&self) -> u32 {
        self.next.fetch_add(1, Ordering::AcqRel)
    }

    /// Returns how many slots have been issued so far.
    #[must_use]
    pub fn issued(&self) -> u32 {
        self.next.load(Ordering::Acquire)
    }

    /// The number of slots that must be issued before the rendezvous releases.
    #[must_use]
    pub fn expected(&self) -> NonZero<u32> {
        self.expected
    }

    /// Spins until every expected slot has been issued.
    ///
    /// This is a deliberate busy-wait with no blocking syscall and no backoff:
    /// a blocking barrier would reintroduce the wakeup jitter this gate exists
    /// to keep out of the timed region. It trades CPU for release precision.
    pub fn wait_all_allocated(&self) {
        let expected = self.expected.get();

        while self
            .next
            .compare_exchange(expected, expected, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            hint::spin_loop();
        }
    }
}
