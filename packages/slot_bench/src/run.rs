use std::num::NonZero;
use std::sync::Arc;
use std::thread;

use crate::{
    CompletionSignal, CounterTable, IdentifierTable, RunConfig, SlotAllocator, Strategy,
    completion_channel, current_thread_id, megacycles, read_cycle_counter,
};

/// The final state of one counter slot after a completed run.
#[derive(Clone, Copy, Debug)]
pub struct SlotOutcome {
    index: usize,
    thread_id: Option<u64>,
    count: u32,
}

impl SlotOutcome {
    /// The slot index, in `0..threads`.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The identifier the owning worker recorded for this slot.
    ///
    /// Present only for [`Strategy::LinearSearch`]; the cached-slot strategy
    /// never records identifiers.
    #[must_use]
    pub fn thread_id(&self) -> Option<u64> {
        self.thread_id
    }

    /// The final counter value. Zero after any completed run.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// The result of a completed benchmark run.
#[derive(Debug)]
pub struct RunReport {
    megacycles: f64,
    slots: Vec<SlotOutcome>,
}

impl RunReport {
    /// Elapsed cycles for the whole fan-out/fan-in, scaled to millions.
    ///
    /// Covers everything from just before the first spawn to just after the
    /// last completion signal was observed.
    #[must_use]
    pub fn megacycles(&self) -> f64 {
        self.megacycles
    }

    /// Per-slot outcomes, in slot order.
    #[must_use]
    pub fn slots(&self) -> &[SlotOutcome] {
        &self.slots
    }
}

/// Executes one benchmark run to completion and reports per-slot outcomes.
///
/// All shared state (allocator, tables, completion channel) is created here and
/// handed to the workers explicitly; nothing outlives the run. Exactly
/// `config.threads()` OS threads are spawned up front and never reused. The
/// orchestrator's completion waits are the only blocking waits in the system;
/// everything else spins.
///
/// Spawn order and slot order may disagree - slots are issued in arrival order
/// at the allocator - which is expected and neutralized by the rendezvous.
///
/// A run either completes with every counter at zero or hangs; there is no
/// partial-failure path.
#[must_use]
pub fn execute(config: &RunConfig) -> RunReport {
    let threads = config.threads().get();

    let expected = NonZero::<u32>::try_from(config.threads())
        .expect("thread count is capped far below u32::MAX");

    let allocator = Arc::new(SlotAllocator::new(expected));
    let counters = Arc::new(CounterTable::new(config.threads(), config.stride()));
    let identifiers = Arc::new(IdentifierTable::new(config.threads(), config.stride()));
    let (signal, wait) = completion_channel();

    let start = read_cycle_counter();

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let allocator = Arc::clone(&allocator);
            let counters = Arc::clone(&counters);
            let identifiers = Arc::clone(&identifiers);
            let signal = signal.clone();
            let start_count = config.start_count();

            // Strategy selection happens here, once per worker, before the
            // timed loop ever runs.
            match config.strategy() {
                Strategy::CachedSlot => thread::spawn(move || {
                    cached_slot_worker(&allocator, &counters, start_count, signal);
                }),
                Strategy::LinearSearch => thread::spawn(move || {
                    linear_search_worker(&allocator, &counters, &identifiers, start_count, signal);
                }),
            }
        })
        .collect();

    // Workers now hold the only signal clones.
    drop(signal);

    for _ in 0..threads {
        wait.wait_one();
    }

    let end = read_cycle_counter();

    // The completion signals end the measured region; joining afterwards just
    // reclaims the threads before reading the tables.
    for handle in handles {
        handle
            .join()
            .expect("worker panicked after signaling completion");
    }

    let slots = (0..threads)
        .map(|index| SlotOutcome {
            index,
            thread_id: match config.strategy() {
                Strategy::CachedSlot => None,
                Strategy::LinearSearch => Some(identifiers.get(index)),
            },
            count: counters.get(index),
        })
        .collect();

    RunReport {
        megacycles: megacycles(start, end),
        slots,
    }
}

/// Cached-slot worker: the slot index is obtained once and lives in this stack
/// frame for the thread's lifetime. The hot loop touches nothing but the
/// worker's own counter.
fn cached_slot_worker(
    allocator: &SlotAllocator,
    counters: &CounterTable,
    start_count: u32,
    signal: CompletionSignal,
) {
    let slot = allocator.allocate() as usize;
    counters.reset(slot, start_count);

    allocator.wait_all_allocated();

    while counters.decrement(slot) != 0 {}

    signal.signal();
}

/// Linear-search worker: records its identity once before the rendezvous, then
/// re-resolves its slot by scanning the identifier table on every iteration.
fn linear_search_worker(
    allocator: &SlotAllocator,
    counters: &CounterTable,
    identifiers: &IdentifierTable,
    start_count: u32,
    signal: CompletionSignal,
) {
    let slot = allocator.allocate() as usize;
    identifiers.record(slot, current_thread_id());
    counters.reset(slot, start_count);

    allocator.wait_all_allocated();

    loop {
        let id = current_thread_id();
        let found = identifiers
            .find(id)
            .expect("own identifier was recorded before the rendezvous, so the scan always matches");

        if counters.decrement(found) == 0 {
            break;
        }
    }

    signal.signal();
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use new_zealand::nz;

    use super::*;

    #[test]
    fn cached_slot_four_workers_count_to_zero() {
        let config = RunConfig::new(nz!(4), 1_000, nz!(32), Strategy::CachedSlot);

        let report = execute(&config);

        assert_eq!(report.slots().len(), 4);
        for (expected_index, slot) in report.slots().iter().enumerate() {
            assert_eq!(slot.index(), expected_index);
            assert_eq!(slot.count(), 0);
            assert_eq!(slot.thread_id(), None);
        }
    }

    #[test]
    fn cached_slot_single_worker() {
        let config = RunConfig::new(nz!(1), 1_000, nz!(32), Strategy::CachedSlot);

        let report = execute(&config);

        assert_eq!(report.slots().len(), 1);
        assert_eq!(report.slots()[0].index(), 0);
        assert_eq!(report.slots()[0].count(), 0);
    }

    #[test]
    fn linear_search_three_workers_record_distinct_identifiers() {
        let config = RunConfig::new(nz!(3), 1_000, nz!(32), Strategy::LinearSearch);

        let report = execute(&config);

        let ids: HashSet<u64> = report
            .slots()
            .iter()
            .map(|slot| slot.thread_id().expect("linear search records identifiers"))
            .collect();

        assert_eq!(ids.len(), 3, "every slot must hold a distinct identifier");

        for slot in report.slots() {
            assert_eq!(slot.count(), 0);
        }
    }

    #[test]
    fn unit_stride_still_counts_correctly() {
        // False sharing slows the run down but must never corrupt the counters.
        let config = RunConfig::new(nz!(4), 1_000, nz!(1), Strategy::CachedSlot);

        let report = execute(&config);

        for slot in report.slots() {
            assert_eq!(slot.count(), 0);
        }
    }

    #[test]
    fn elapsed_is_reported() {
        let config = RunConfig::new(nz!(2), 1, nz!(32), Strategy::CachedSlot);

        let report = execute(&config);

        assert!(report.megacycles() >= 0.0);
    }
}
